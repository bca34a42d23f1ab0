//! Value Object Module

pub mod email;
pub mod user_state;
pub mod verification_code;

pub use email::Email;
pub use user_state::UserState;
pub use verification_code::VerificationCode;
