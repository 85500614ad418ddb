pub mod code;
pub mod phone;

pub use code::{CodePurpose, VerificationCode};
pub use phone::normalize_phone_number;
