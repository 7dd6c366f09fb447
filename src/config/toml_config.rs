use crate::core::guard::{RouteGuard, RouteRule};
use crate::core::roles::OwnerIdentity;
use crate::core::session::DEFAULT_SESSION_KEY;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_route_path, validate_storage_key,
    validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppInfo,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub owner: Option<OwnerIdentity>,
    #[serde(default)]
    pub routes: Vec<RouteRule>,
    #[serde(default)]
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "okr-eval".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            session_key: default_session_key(),
        }
    }
}

fn default_base_path() -> String {
    "./.okr-session".to_string()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SESSION_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn owner_identity(&self) -> OwnerIdentity {
        self.owner.clone().unwrap_or_default()
    }

    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(self.routes.clone(), self.owner_identity())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("app.name", &self.app.name)?;
        validate_path("storage.base_path", &self.storage.base_path)?;
        validate_storage_key("storage.session_key", &self.storage.session_key)?;

        if let Some(owner) = &self.owner {
            validate_non_empty_string("owner.username", &owner.username)?;
            validate_non_empty_string("owner.display_name", &owner.display_name)?;
            validate_non_empty_string("owner.role", &owner.role)?;
        }

        for rule in &self.routes {
            validate_route_path("routes.path", &rule.path)?;
            if let Some(role) = &rule.required_role {
                validate_non_empty_string("routes.required_role", role)?;
            }
        }
        validate_unique(
            "routes.path",
            self.routes.iter().map(|rule| rule.path.as_str()),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::AccessDecision;
    use crate::domain::model::UserInfo;
    use crate::utils::error::OkrError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[app]
name = "okr-portal"

[storage]
base_path = "/tmp/okr"
session_key = "session"

[owner]
username = "ceo"
display_name = "Chief"
role = "executive"

[[routes]]
path = "/boss"
owner_only = true

[[routes]]
path = "/dashboard"
required_role = "employee"

[monitoring]
enabled = true
json_logs = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.app.name, "okr-portal");
        assert_eq!(config.storage.session_key, "session");
        assert_eq!(config.owner_identity().username, "ceo");
        assert_eq!(config.routes.len(), 2);
        assert!(config.monitoring_enabled());
        assert!(config.json_logs());

        let guard = config.route_guard();
        let ceo = UserInfo::with_username("ceo");
        assert!(guard.check("/boss", Some(&ceo)).is_granted());
        assert_eq!(guard.check("/dashboard", Some(&ceo)), AccessDecision::Forbidden);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.session_key, DEFAULT_SESSION_KEY);
        assert_eq!(config.owner_identity(), OwnerIdentity::default());
        assert!(!config.monitoring_enabled());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_partial_owner_section_fills_defaults() {
        let config = AppConfig::from_toml_str("[owner]\nusername = \"ceo\"\n").unwrap();
        let owner = config.owner_identity();
        assert_eq!(owner.username, "ceo");
        assert_eq!(owner.role, "boss");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OKR_TEST_SESSION_DIR", "/var/lib/okr");

        let config = AppConfig::from_toml_str(
            "[storage]\nbase_path = \"${OKR_TEST_SESSION_DIR}\"\n",
        )
        .unwrap();
        assert_eq!(config.storage.base_path, "/var/lib/okr");

        std::env::remove_var("OKR_TEST_SESSION_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_route = AppConfig::from_toml_str("[[routes]]\npath = \"boss\"\n").unwrap();
        assert!(bad_route.validate().is_err());

        let duplicate = AppConfig::from_toml_str(
            "[[routes]]\npath = \"/boss\"\n\n[[routes]]\npath = \"/boss\"\nowner_only = true\n",
        )
        .unwrap();
        assert!(duplicate.validate().is_err());

        let trailing_slash = AppConfig::from_toml_str(
            "[[routes]]\npath = \"/boss\"\nowner_only = true\n\n[[routes]]\npath = \"/boss/\"\nrequired_role = \"admin\"\n",
        )
        .unwrap();
        assert!(trailing_slash.validate().is_err());

        let bad_key =
            AppConfig::from_toml_str("[storage]\nsession_key = \"a/b\"\n").unwrap();
        assert!(bad_key.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml_str("[storage\n").unwrap_err();
        assert!(matches!(err, OkrError::ConfigParseError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[app]\nname = \"file-test\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.app.name, "file-test");
    }
}
