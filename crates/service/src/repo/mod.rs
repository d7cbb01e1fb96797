//! Concrete repository implementations.

pub mod memory;
pub mod seaorm;
