//! Port interfaces for sample storage

use async_trait::async_trait;
use labtrack_domain::{Result, Sample};

/// Trait for loading and saving sample records.
#[async_trait]
pub trait SampleRepository: Send + Sync {
    /// Look up one sample by its 4-digit id.
    async fn get_sample(&self, unique_id: &str) -> Result<Option<Sample>>;

    /// List the samples filed under an opportunity.
    async fn list_samples(&self, opportunity_number: &str) -> Result<Vec<Sample>>;

    /// True when a sample with this id already exists.
    async fn id_exists(&self, unique_id: &str) -> Result<bool>;

    /// Insert a new sample record.
    async fn insert_sample(&self, sample: &Sample) -> Result<()>;
}
