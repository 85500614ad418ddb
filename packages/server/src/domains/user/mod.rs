//! User domain - identity records and profile management.

pub mod actions;
pub mod models;

pub use models::{ProfileUpdate, Role, User, UserProfile};
