pub mod email;
pub mod otp_purpose;
pub mod password;

pub use email::Email;
pub use otp_purpose::OtpPurpose;
pub use password::RawPassword;
