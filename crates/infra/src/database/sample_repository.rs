//! SQLite implementation of the sample repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use labtrack_core::samples::ports::SampleRepository;
use labtrack_domain::{LabTrackError, Result, Sample, StorageLocation};
use rusqlite::{params, OptionalExtension, Row};

use super::manager::DbManager;

const SELECT_COLUMNS: &str =
    "unique_id, opportunity_number, description, storage_location, audit, audit_due, \
     date_received";

/// SQLite implementation of `SampleRepository`.
pub struct SqliteSampleRepository {
    db: Arc<DbManager>,
}

impl SqliteSampleRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Sample> {
    let storage: Option<String> = row.get(3)?;
    let audit_due: Option<String> = row.get(5)?;
    let date_received: Option<String> = row.get(6)?;
    Ok(Sample {
        unique_id: row.get(0)?,
        opportunity_number: row.get(1)?,
        description: row.get(2)?,
        storage_location: storage.as_deref().and_then(StorageLocation::parse),
        audit: row.get(4)?,
        audit_due: audit_due.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        date_received: date_received
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
    })
}

#[async_trait]
impl SampleRepository for SqliteSampleRepository {
    async fn get_sample(&self, unique_id: &str) -> Result<Option<Sample>> {
        let db = self.db.clone();
        let unique_id = unique_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM samples WHERE unique_id = ?1"),
                params![unique_id],
                map_row,
            )
            .optional()
            .map_err(|e| LabTrackError::Database(e.to_string()))
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn list_samples(&self, opportunity_number: &str) -> Result<Vec<Sample>> {
        let db = self.db.clone();
        let number = opportunity_number.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM samples WHERE opportunity_number = ?1"
                ))
                .map_err(|e| LabTrackError::Database(e.to_string()))?;

            let samples = stmt
                .query_map(params![number], map_row)
                .map_err(|e| LabTrackError::Database(e.to_string()))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| LabTrackError::Database(e.to_string()))?;

            Ok(samples)
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn id_exists(&self, unique_id: &str) -> Result<bool> {
        let db = self.db.clone();
        let unique_id = unique_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM samples WHERE unique_id = ?1",
                    params![unique_id],
                    |row| row.get(0),
                )
                .map_err(|e| LabTrackError::Database(e.to_string()))?;
            Ok(count > 0)
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn insert_sample(&self, sample: &Sample) -> Result<()> {
        let db = self.db.clone();
        let sample = sample.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO samples (unique_id, opportunity_number, description, \
                 storage_location, audit, audit_due, date_received) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    sample.unique_id,
                    sample.opportunity_number,
                    sample.description,
                    sample.storage_location.map(|l| l.as_str()),
                    sample.audit,
                    sample.audit_due.map(|d| d.format("%Y-%m-%d").to_string()),
                    sample.date_received.map(|d| d.format("%Y-%m-%d").to_string()),
                ],
            )
            .map_err(|e| LabTrackError::Database(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }
}
