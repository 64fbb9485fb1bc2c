pub mod otp;
pub mod refresh_token;
pub mod user;

pub use otp::{NewOtpChallenge, OtpChallenge};
pub use refresh_token::{NewRefreshToken, RefreshTokenRecord};
pub use user::{NewUser, User};
