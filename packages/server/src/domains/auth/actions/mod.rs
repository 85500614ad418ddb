// Verification engine operations. One file per flow; registration, login
// and phone change share the same issue/consume mechanism with different
// preconditions.

pub mod change_phone;
pub mod check_phone;
pub mod consume;
pub mod login;
pub mod register;

pub use change_phone::{confirm_phone_change, initiate_phone_change};
pub use check_phone::phone_number_exists;
pub use consume::consume_code;
pub use login::send_login_code;
pub use register::send_registration_code;
