//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt, configurable cost factor)
//! - One-time-code generation (CSPRNG-backed)
//! - Client identification (IP / User-Agent extraction)

pub mod client;
pub mod otp;
pub mod password;
