use crate::domain::model::UserInfo;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde_json::Value;

pub const DEFAULT_SESSION_KEY: &str = "userInfo";

/// Stored values that some front-end code writes instead of removing the key.
const SENTINEL_VALUES: [&str; 2] = ["undefined", "null"];

/// Reads and writes the logged-in user's record in session storage.
#[derive(Debug, Clone)]
pub struct SessionStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 讀取 session
    ///
    /// A missing entry, a sentinel string, or anything that is not a JSON
    /// object means "no session". Every case except a missing entry also
    /// removes the stored value. Only storage failures are returned as errors.
    pub fn load(&self) -> Result<Option<UserInfo>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            tracing::debug!("No session stored under '{}'", self.key);
            return Ok(None);
        };

        match parse_user_info(&raw) {
            Some(user) => {
                tracing::debug!(
                    "Loaded session for {}",
                    user.display_name().unwrap_or("<anonymous>")
                );
                Ok(Some(user))
            }
            None => {
                tracing::warn!("Discarding invalid session value under '{}'", self.key);
                self.storage.remove_item(&self.key)?;
                Ok(None)
            }
        }
    }

    /// Like [`load`](Self::load), but a storage failure is logged and read as "no session".
    pub fn current_user(&self) -> Option<UserInfo> {
        match self.load() {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to read session '{}': {}", self.key, e);
                None
            }
        }
    }

    /// 登入時寫入 session
    pub fn save(&self, user: &UserInfo) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(&self.key, &raw)?;
        tracing::info!(
            "Session saved for {}",
            user.display_name().unwrap_or("<anonymous>")
        );
        Ok(())
    }

    /// 登出時清除 session
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

fn parse_user_info(raw: &str) -> Option<UserInfo> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || SENTINEL_VALUES.contains(&trimmed) {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Session value is not valid JSON: {}", e);
            None
        }
    }
}
