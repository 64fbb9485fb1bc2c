//! Read-only reference data.
//!
//! Fixed lookup lists (genders, blood types, lifestyle levels and the
//! like) that profile screens consume. The set of categories is a
//! compile-time registry; the rows live in seeded tables.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::{CATEGORIES, Category, MasterItem, find_category};
pub use error::{MasterDataError, MasterDataResult};
pub use infra::PgMasterDataStore;
pub use presentation::master_data_router;
