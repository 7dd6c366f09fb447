use crate::core::roles::{has_role, OwnerIdentity};
use crate::domain::model::UserInfo;
use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub path: String,
    #[serde(default)]
    pub required_role: Option<String>,
    #[serde(default)]
    pub owner_only: bool,
}

impl RouteRule {
    pub fn owner_only(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_role: None,
            owner_only: true,
        }
    }

    pub fn requiring_role(path: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_role: Some(role.into()),
            owner_only: false,
        }
    }

    fn prefix(&self) -> &str {
        self.path.trim_end_matches('/')
    }

    fn prefix_len(&self) -> usize {
        self.prefix().len()
    }

    /// `/boss` covers `/boss` and `/boss/...` but not `/bossy`.
    pub fn covers(&self, path: &str) -> bool {
        let prefix = self.prefix();
        if prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Granted,
    Unauthenticated,
    Forbidden,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        self == AccessDecision::Granted
    }

    /// 被拒絕時要導向的頁面
    pub fn redirect(self) -> Option<&'static str> {
        match self {
            AccessDecision::Granted => None,
            AccessDecision::Unauthenticated => Some(LOGIN_PATH),
            AccessDecision::Forbidden => Some(UNAUTHORIZED_PATH),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    rules: Vec<RouteRule>,
    owner: OwnerIdentity,
}

impl RouteGuard {
    pub fn new(rules: Vec<RouteRule>, owner: OwnerIdentity) -> Self {
        Self { rules, owner }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Rules with the most specific prefix for `path`. `/boss` and `/boss/`
    /// are equally specific, so both are returned and both must pass.
    pub fn rules_for(&self, path: &str) -> Vec<&RouteRule> {
        let matching: Vec<&RouteRule> =
            self.rules.iter().filter(|rule| rule.covers(path)).collect();
        let Some(longest) = matching.iter().map(|rule| rule.prefix_len()).max() else {
            return Vec::new();
        };
        matching
            .into_iter()
            .filter(|rule| rule.prefix_len() == longest)
            .collect()
    }

    /// Routes without a rule are public.
    pub fn check(&self, path: &str, user: Option<&UserInfo>) -> AccessDecision {
        let rules = self.rules_for(path);
        if rules.is_empty() {
            return AccessDecision::Granted;
        }

        if user.is_none() {
            tracing::debug!("No session for protected route {}", path);
            return AccessDecision::Unauthenticated;
        }

        for rule in rules {
            if rule.owner_only && !self.owner.matches(user) {
                tracing::debug!("Route {} is restricted to the owner", path);
                return AccessDecision::Forbidden;
            }

            if let Some(role) = &rule.required_role {
                if !has_role(user, role) {
                    tracing::debug!("Route {} requires role '{}'", path, role);
                    return AccessDecision::Forbidden;
                }
            }
        }

        AccessDecision::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> RouteGuard {
        RouteGuard::new(
            vec![
                RouteRule {
                    path: "/dashboard".to_string(),
                    required_role: None,
                    owner_only: false,
                },
                RouteRule::owner_only("/boss"),
                RouteRule::requiring_role("/dashboard/admin", "admin"),
            ],
            OwnerIdentity::default(),
        )
    }

    #[test]
    fn test_covers_respects_segments() {
        let rule = RouteRule::owner_only("/boss");
        assert!(rule.covers("/boss"));
        assert!(rule.covers("/boss/reviews"));
        assert!(!rule.covers("/bossy"));
        assert!(!rule.covers("/"));
        assert!(RouteRule::owner_only("/").covers("/anything"));
    }

    #[test]
    fn test_public_route() {
        assert_eq!(guard().check("/about", None), AccessDecision::Granted);
    }

    #[test]
    fn test_protected_route_without_session() {
        let decision = guard().check("/dashboard", None);
        assert_eq!(decision, AccessDecision::Unauthenticated);
        assert_eq!(decision.redirect(), Some(LOGIN_PATH));
    }

    #[test]
    fn test_owner_route() {
        let guard = guard();
        let boss = UserInfo::with_username("boss");
        let alice = UserInfo::with_username("alice");

        assert!(guard.check("/boss/reviews", Some(&boss)).is_granted());
        let decision = guard.check("/boss/reviews", Some(&alice));
        assert_eq!(decision, AccessDecision::Forbidden);
        assert_eq!(decision.redirect(), Some(UNAUTHORIZED_PATH));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let guard = guard();
        let staff = UserInfo::with_username("alice");
        let admin = UserInfo::with_roles(["admin"]);

        assert!(guard.check("/dashboard/team", Some(&staff)).is_granted());
        assert_eq!(
            guard.check("/dashboard/admin/users", Some(&staff)),
            AccessDecision::Forbidden
        );
        assert!(guard.check("/dashboard/admin/users", Some(&admin)).is_granted());
    }

    #[test]
    fn test_equivalent_prefixes_do_not_depend_on_order() {
        let admin = UserInfo::with_roles(["admin"]);
        let rules = vec![
            RouteRule::owner_only("/boss"),
            RouteRule::requiring_role("/boss/", "admin"),
        ];
        let mut reversed = rules.clone();
        reversed.reverse();

        let forward = RouteGuard::new(rules, OwnerIdentity::default());
        let backward = RouteGuard::new(reversed, OwnerIdentity::default());

        assert_eq!(forward.rules_for("/boss").len(), 2);
        assert_eq!(forward.check("/boss", Some(&admin)), AccessDecision::Forbidden);
        assert_eq!(backward.check("/boss", Some(&admin)), AccessDecision::Forbidden);

        let boss_admin = UserInfo {
            username: Some("boss".to_string()),
            roles: Some(vec!["admin".to_string()]),
            ..UserInfo::default()
        };
        assert!(forward.check("/boss", Some(&boss_admin)).is_granted());
        assert!(backward.check("/boss", Some(&boss_admin)).is_granted());
    }
}
