//! Learning profile and knowledge state storage adapters.

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryKnowledgeStateRepository, InMemoryLearningProfileRepository};
pub use postgres::{PostgresKnowledgeStateRepository, PostgresLearningProfileRepository};
