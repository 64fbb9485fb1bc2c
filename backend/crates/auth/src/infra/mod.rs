pub mod notify;
pub mod postgres;
