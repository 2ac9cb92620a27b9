//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication identity and the error
//! types that form the vocabulary of the student model.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use timestamp::Timestamp;
