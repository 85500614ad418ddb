//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod pg_user_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioSmsAdapter};
pub use pg_user_store::PgUserStore;
pub use traits::*;
