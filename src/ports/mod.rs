//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `LearningProfileRepository` - Per-user learning profile storage
//! - `KnowledgeStateRepository` - Per-user knowledge state storage
//!
//! ## Authentication Ports
//!
//! - `SessionValidator` - Bearer token validation

mod knowledge_state_repository;
mod learning_profile_repository;
mod session_validator;

pub use knowledge_state_repository::KnowledgeStateRepository;
pub use learning_profile_repository::LearningProfileRepository;
pub use session_validator::SessionValidator;
