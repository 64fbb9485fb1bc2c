pub mod audit;
pub mod change_password;
pub mod config;
pub mod current_user;
pub mod deactivate_account;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod request_otp;
pub mod verify_otp;
