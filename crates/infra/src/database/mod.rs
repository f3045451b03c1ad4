//! Database implementations

pub mod manager;
pub mod opportunity_repository;
pub mod sample_repository;

pub use manager::*;
pub use opportunity_repository::*;
pub use sample_repository::*;
