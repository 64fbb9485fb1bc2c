pub mod entity;
pub mod notifier;
pub mod repository;
pub mod token;
pub mod value_object;
