use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One row of the star rating table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingTier {
    pub tier: i64,
    pub score: i64,
    pub label: &'static str,
}

/// 使用者 session 資料
///
/// The record can come from several upstream login flows, so every field is
/// optional and a field holding the wrong JSON type is read as absent.
/// Fields this crate does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "lenient_string_list", skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub r#type: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInfo {
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    pub fn with_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: Some(roles.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Name to show in logs and tracked events.
    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.name.as_deref())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_user_info() {
        let user: UserInfo = serde_json::from_value(json!({
            "username": "alice",
            "roles": ["admin", "boss"],
            "role": "manager",
            "user_role": "employee",
            "type": "staff",
            "name": "Alice",
            "department": "R&D"
        }))
        .unwrap();

        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.roles, Some(vec!["admin".to_string(), "boss".to_string()]));
        assert_eq!(user.role.as_deref(), Some("manager"));
        assert_eq!(user.user_role.as_deref(), Some("employee"));
        assert_eq!(user.r#type.as_deref(), Some("staff"));
        assert_eq!(user.name.as_deref(), Some("Alice"));
        assert_eq!(user.extra.get("department"), Some(&json!("R&D")));
    }

    #[test]
    fn test_wrong_types_are_treated_as_absent() {
        let user: UserInfo = serde_json::from_value(json!({
            "username": 42,
            "roles": "boss",
            "role": null,
            "type": ["boss"]
        }))
        .unwrap();

        assert_eq!(user.username, None);
        assert_eq!(user.roles, None);
        assert_eq!(user.role, None);
        assert_eq!(user.r#type, None);
    }

    #[test]
    fn test_roles_keep_only_strings() {
        let user: UserInfo =
            serde_json::from_value(json!({ "roles": ["boss", 1, null, "admin"] })).unwrap();
        assert_eq!(user.roles, Some(vec!["boss".to_string(), "admin".to_string()]));
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let user = UserInfo {
            r#type: Some("boss".to_string()),
            ..UserInfo::default()
        };
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({ "type": "boss" }));
    }
}
