//! Sample intake service
//!
//! Creates sample records with randomly generated 4-digit ids. Ids are
//! collision-checked against the repository and generation retries a
//! bounded number of times before giving up with an integrity error.

use std::sync::Arc;

use labtrack_domain::constants::SAMPLE_ID_MAX_ATTEMPTS;
use labtrack_domain::{LabTrackError, Result, Sample, StorageLocation};
use rand::Rng;
use tracing::{debug, info};

use super::ports::SampleRepository;
use crate::reconcile::ports::OpportunityRepository;

/// Service for receiving new samples against an opportunity.
pub struct SampleService {
    samples: Arc<dyn SampleRepository>,
    opportunities: Arc<dyn OpportunityRepository>,
}

impl SampleService {
    pub fn new(
        samples: Arc<dyn SampleRepository>,
        opportunities: Arc<dyn OpportunityRepository>,
    ) -> Self {
        Self { samples, opportunities }
    }

    /// Create a sample under an opportunity and mark the opportunity's
    /// documentation as needing a re-sync.
    pub async fn create_sample(
        &self,
        opportunity_number: &str,
        description: Option<String>,
        storage_location: Option<StorageLocation>,
    ) -> Result<Sample> {
        let opportunity = self
            .opportunities
            .get_opportunity(opportunity_number)
            .await?
            .ok_or_else(|| {
                LabTrackError::NotFound(format!("no opportunity record for {opportunity_number}"))
            })?;

        let unique_id = self.generate_unique_id().await?;
        let sample = Sample {
            unique_id: unique_id.clone(),
            opportunity_number: opportunity_number.to_string(),
            description,
            storage_location,
            audit: false,
            audit_due: None,
            date_received: Some(chrono::Utc::now().date_naive()),
        };
        self.samples.insert_sample(&sample).await?;

        let mut updated = opportunity;
        updated.sample_ids.push(unique_id.clone());
        updated.needs_update = true;
        self.opportunities.save_opportunity(&updated).await?;

        info!(number = opportunity_number, sample_id = %unique_id, "sample received");
        Ok(sample)
    }

    /// Generate a free random 4-digit id, retrying on collision.
    ///
    /// The id space is only 10000 wide, so collisions are a matter of
    /// course once the lab fills up; exhaustion of the retry budget is an
    /// integrity error for this single request, not a retryable condition.
    async fn generate_unique_id(&self) -> Result<String> {
        for attempt in 1..=SAMPLE_ID_MAX_ATTEMPTS {
            let candidate = format!("{:04}", rand::thread_rng().gen_range(0..10000));
            if !self.samples.id_exists(&candidate).await? {
                debug!(attempt, id = %candidate, "generated sample id");
                return Ok(candidate);
            }
        }
        Err(LabTrackError::Integrity(format!(
            "could not generate a free sample id after {SAMPLE_ID_MAX_ATTEMPTS} attempts"
        )))
    }
}
