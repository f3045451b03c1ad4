//! SQLite implementation of the opportunity repository
//!
//! The comma-joined `sample_ids` column is parsed into / serialized from
//! the `SampleIdList` value object here and nowhere else.

use std::sync::Arc;

use async_trait::async_trait;
use labtrack_core::reconcile::ports::OpportunityRepository;
use labtrack_domain::{LabTrackError, Opportunity, Result, SampleIdList};
use rusqlite::{params, OptionalExtension, Row};

use super::manager::DbManager;

const SELECT_COLUMNS: &str = "opportunity_number, customer, rsm, description, sample_ids, \
     sharepoint_folder_name, sample_info_id, sample_info_url, needs_update, is_new";

/// SQLite implementation of `OpportunityRepository`.
pub struct SqliteOpportunityRepository {
    db: Arc<DbManager>,
}

impl SqliteOpportunityRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Opportunity> {
    let sample_ids: String = row.get(4)?;
    Ok(Opportunity {
        opportunity_number: row.get(0)?,
        customer: row.get(1)?,
        rsm: row.get(2)?,
        description: row.get(3)?,
        sample_ids: SampleIdList::from_joined(&sample_ids),
        sharepoint_folder_name: row.get(5)?,
        sample_info_id: row.get(6)?,
        sample_info_url: row.get(7)?,
        needs_update: row.get(8)?,
        is_new: row.get(9)?,
    })
}

#[async_trait]
impl OpportunityRepository for SqliteOpportunityRepository {
    async fn get_opportunity(&self, number: &str) -> Result<Option<Opportunity>> {
        let db = self.db.clone();
        let number = number.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!(
                    "SELECT {SELECT_COLUMNS} FROM opportunities WHERE opportunity_number = ?1"
                ),
                params![number],
                map_row,
            )
            .optional()
            .map_err(|e| LabTrackError::Database(e.to_string()))
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM opportunities ORDER BY opportunity_number"
                ))
                .map_err(|e| LabTrackError::Database(e.to_string()))?;

            let opportunities = stmt
                .query_map([], map_row)
                .map_err(|e| LabTrackError::Database(e.to_string()))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| LabTrackError::Database(e.to_string()))?;

            Ok(opportunities)
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn count_samples(&self, opportunity_number: &str) -> Result<usize> {
        let db = self.db.clone();
        let number = opportunity_number.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM samples WHERE opportunity_number = ?1",
                    params![number],
                    |row| row.get(0),
                )
                .map_err(|e| LabTrackError::Database(e.to_string()))?;
            Ok(count as usize)
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn list_sample_ids(&self, opportunity_number: &str) -> Result<Vec<String>> {
        let db = self.db.clone();
        let number = opportunity_number.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare("SELECT unique_id FROM samples WHERE opportunity_number = ?1")
                .map_err(|e| LabTrackError::Database(e.to_string()))?;

            let ids = stmt
                .query_map(params![number], |row| row.get::<_, String>(0))
                .map_err(|e| LabTrackError::Database(e.to_string()))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| LabTrackError::Database(e.to_string()))?;

            Ok(ids)
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }

    async fn save_opportunity(&self, opportunity: &Opportunity) -> Result<()> {
        let db = self.db.clone();
        let opportunity = opportunity.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO opportunities (opportunity_number, customer, rsm, description, \
                 sample_ids, sharepoint_folder_name, sample_info_id, sample_info_url, \
                 needs_update, is_new) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
                 ON CONFLICT(opportunity_number) DO UPDATE SET \
                 customer = excluded.customer, rsm = excluded.rsm, \
                 description = excluded.description, sample_ids = excluded.sample_ids, \
                 sharepoint_folder_name = excluded.sharepoint_folder_name, \
                 sample_info_id = excluded.sample_info_id, \
                 sample_info_url = excluded.sample_info_url, \
                 needs_update = excluded.needs_update, is_new = excluded.is_new",
                params![
                    opportunity.opportunity_number,
                    opportunity.customer,
                    opportunity.rsm,
                    opportunity.description,
                    opportunity.sample_ids.to_joined(),
                    opportunity.sharepoint_folder_name,
                    opportunity.sample_info_id,
                    opportunity.sample_info_url,
                    opportunity.needs_update,
                    opportunity.is_new,
                ],
            )
            .map_err(|e| LabTrackError::Database(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| LabTrackError::Internal(e.to_string()))?
    }
}
