//! Sample intake

pub mod ports;
pub mod service;

pub use ports::SampleRepository;
pub use service::SampleService;
