pub mod user;

pub use user::{ProfileUpdate, Role, User, UserProfile};
