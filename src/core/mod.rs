pub mod guard;
pub mod rating;
pub mod roles;
pub mod session;

pub use crate::domain::model::{RatingTier, UserInfo};
