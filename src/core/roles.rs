use crate::domain::model::UserInfo;
use serde::{Deserialize, Serialize};

pub const OWNER_ROLE: &str = "boss";
pub const OWNER_DISPLAY_NAME: &str = "老闆";

type RoleClaim = fn(&UserInfo, &str) -> bool;

/// Every place an upstream login flow may have put the user's role.
/// Order only affects which claim short-circuits first.
const ROLE_CLAIMS: [RoleClaim; 5] = [
    username_claim,
    roles_claim,
    role_claim,
    user_role_claim,
    type_claim,
];

fn username_claim(user: &UserInfo, target: &str) -> bool {
    user.username.as_deref() == Some(target)
}

fn roles_claim(user: &UserInfo, target: &str) -> bool {
    user.roles
        .as_ref()
        .is_some_and(|roles| roles.iter().any(|role| role == target))
}

fn role_claim(user: &UserInfo, target: &str) -> bool {
    user.role.as_deref() == Some(target)
}

fn user_role_claim(user: &UserInfo, target: &str) -> bool {
    user.user_role.as_deref() == Some(target)
}

fn type_claim(user: &UserInfo, target: &str) -> bool {
    user.r#type.as_deref() == Some(target)
}

/// 檢查使用者是否具有指定角色；沒有 session 時一律為 false
pub fn has_role(user: Option<&UserInfo>, target_role: &str) -> bool {
    let Some(user) = user else {
        return false;
    };
    ROLE_CLAIMS.iter().any(|claim| claim(user, target_role))
}

pub fn is_privileged_owner(user: Option<&UserInfo>) -> bool {
    OwnerIdentity::default().matches(user)
}

/// How the privileged owner is recognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerIdentity {
    #[serde(default = "default_owner_username")]
    pub username: String,
    #[serde(default = "default_owner_display_name")]
    pub display_name: String,
    #[serde(default = "default_owner_role")]
    pub role: String,
}

impl OwnerIdentity {
    /// The username check overlaps with `has_role`; both are kept so the
    /// two literals can be configured independently.
    pub fn matches(&self, user: Option<&UserInfo>) -> bool {
        let Some(info) = user else {
            return false;
        };
        info.username.as_deref() == Some(self.username.as_str())
            || info.name.as_deref() == Some(self.display_name.as_str())
            || has_role(user, &self.role)
    }
}

impl Default for OwnerIdentity {
    fn default() -> Self {
        Self {
            username: default_owner_username(),
            display_name: default_owner_display_name(),
            role: default_owner_role(),
        }
    }
}

fn default_owner_username() -> String {
    OWNER_ROLE.to_string()
}

fn default_owner_display_name() -> String {
    OWNER_DISPLAY_NAME.to_string()
}

fn default_owner_role() -> String {
    OWNER_ROLE.to_string()
}
