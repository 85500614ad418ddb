//! Auth domain - one-time-code verification flows and JWT issuance.

pub mod actions;
pub mod errors;
pub mod jwt;
pub mod models;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService};
