//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth identity)
//! - `learning` - Learning-style extraction, metric folds and profile updates

pub mod foundation;
pub mod learning;
