//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - `SessionValidator` implementations (JWT, mock)
//! - `http` - axum routes, middleware and DTOs
//! - `learning` - profile and knowledge-state storage (Postgres, in-memory)

pub mod auth;
pub mod http;
pub mod learning;
