//! Common data types used throughout the application

pub mod opportunity;
pub mod remote;
pub mod sample;

pub use opportunity::*;
pub use remote::*;
pub use sample::*;
