pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{LocalStorage, MemoryStorage};
pub use config::toml_config::AppConfig;
pub use crate::core::guard::{AccessDecision, RouteGuard, RouteRule};
pub use crate::core::rating::{
    describe_score, render_stars, score_to_stars, star_label, star_to_score, RATING_TIERS,
};
pub use crate::core::roles::{has_role, is_privileged_owner, OwnerIdentity};
pub use crate::core::session::SessionStore;
pub use domain::model::{RatingTier, UserInfo};
pub use domain::ports::Storage;
pub use utils::error::{OkrError, Result};
pub use utils::monitor::EventTracker;
