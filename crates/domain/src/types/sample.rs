//! Physical sample records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a sample is physically stored in the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    Warehouse,
    LabShelf,
    ColdStorage,
    Disposed,
    ReturnedToCustomer,
}

impl StorageLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::LabShelf => "lab_shelf",
            Self::ColdStorage => "cold_storage",
            Self::Disposed => "disposed",
            Self::ReturnedToCustomer => "returned_to_customer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "warehouse" => Some(Self::Warehouse),
            "lab_shelf" => Some(Self::LabShelf),
            "cold_storage" => Some(Self::ColdStorage),
            "disposed" => Some(Self::Disposed),
            "returned_to_customer" => Some(Self::ReturnedToCustomer),
            _ => None,
        }
    }
}

/// A physical item received against one opportunity.
///
/// `unique_id` is a random 4-digit string, collision-checked at creation.
/// `opportunity_number` is a foreign key by value, not by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub unique_id: String,
    pub opportunity_number: String,
    pub description: Option<String>,
    pub storage_location: Option<StorageLocation>,
    pub audit: bool,
    pub audit_due: Option<NaiveDate>,
    pub date_received: Option<NaiveDate>,
}
