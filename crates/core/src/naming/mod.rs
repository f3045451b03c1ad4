//! Folder naming rules
//!
//! Everything about mapping an opportunity to its canonical remote folder
//! name lives here: sanitization of free-text descriptions, the resolution
//! rules (cached name wins, then description, then bare number), and the
//! reverse extraction of an opportunity number from legacy folder names.

pub mod resolver;
pub mod sanitizer;

pub use resolver::{extract_opportunity_number, resolve_folder_name, resolve_from_parts};
pub use sanitizer::sanitize_folder_name;
