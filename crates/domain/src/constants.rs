//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Folder naming
pub const MAX_FOLDER_NAME_LENGTH: usize = 400;
pub const FOLDER_NAME_TRUNCATE_SUFFIX: &str = "...";
pub const DEFAULT_ARCHIVE_FOLDER: &str = "_Archive";

// Remote listing
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 200;

// Sample identifiers: random 4-digit ids, collision-checked at creation
pub const SAMPLE_ID_LENGTH: usize = 4;
pub const SAMPLE_ID_MAX_ATTEMPTS: usize = 100;

// Remote listItem metadata column names
pub const FIELD_CUSTOMER: &str = "Customer";
pub const FIELD_RSM: &str = "RSM";
pub const FIELD_DESCRIPTION: &str = "_ExtendedDescription";
