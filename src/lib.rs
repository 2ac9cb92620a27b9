//! Student Model - adaptive learner profiles for a tutoring platform.
//!
//! Infers learning-style preferences from chat history, scores tutoring
//! interactions, folds quiz and concept-detective attempts into cognitive and
//! behavioral metrics, and stores one evolving profile per learner.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
