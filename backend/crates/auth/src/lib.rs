//! Authentication & session lifecycle.
//!
//! Registration, credential login with lockout, one-time codes,
//! stateful refresh tokens and the audit trail behind them. The
//! domain layer owns the entities and repository contracts, the
//! application layer holds one use case per operation, infra binds
//! them to Postgres and presentation exposes the HTTP surface.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::AuthConfig;
pub use domain::token::{TokenCodec, TokenKind};
pub use error::{AuthError, AuthResult};
pub use infra::notify::DevNotifier;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};
