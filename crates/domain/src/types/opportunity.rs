//! Opportunity record and the sample-id mirror value object

use serde::{Deserialize, Serialize};

/// A sales/engineering opportunity that physical samples are filed under.
///
/// `opportunity_number` is the stable business key; everything else is
/// mutable metadata. `sharepoint_folder_name` caches the canonical remote
/// folder name once one has been chosen and is authoritative from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub opportunity_number: String,
    pub customer: Option<String>,
    pub rsm: Option<String>,
    pub description: Option<String>,
    /// Denormalized mirror of the sample ids currently filed under this
    /// opportunity. Frequently drifts from the live sample set; the
    /// consistency checker detects that drift.
    pub sample_ids: SampleIdList,
    pub sharepoint_folder_name: Option<String>,
    /// Remote id of the Sample Info destination folder in the separate
    /// Sales Engineering library, if one has been linked.
    pub sample_info_id: Option<String>,
    pub sample_info_url: Option<String>,
    /// Documentation workbook must be re-synced.
    pub needs_update: bool,
    /// Documentation header cells have not been written yet.
    pub is_new: bool,
}

impl Opportunity {
    /// Create a bare opportunity with just the business key set.
    pub fn new(opportunity_number: impl Into<String>) -> Self {
        Self {
            opportunity_number: opportunity_number.into(),
            customer: None,
            rsm: None,
            description: None,
            sample_ids: SampleIdList::default(),
            sharepoint_folder_name: None,
            sample_info_id: None,
            sample_info_url: None,
            needs_update: false,
            is_new: false,
        }
    }
}

/// Ordered set of sample ids.
///
/// Persisted as a comma-joined string column; the join/split happens only at
/// the repository boundary. In-process code works with the parsed form and
/// never touches the joined representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleIdList(Vec<String>);

impl SampleIdList {
    /// Build from ids, preserving order and dropping duplicates.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for id in ids {
            list.push(id.into());
        }
        list
    }

    /// Parse the comma-joined column form. Empty segments are ignored.
    pub fn from_joined(joined: &str) -> Self {
        Self::new(joined.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    /// Serialize back to the comma-joined column form.
    pub fn to_joined(&self) -> String {
        self.0.join(",")
    }

    /// Append an id unless it is already present.
    pub fn push(&mut self, id: String) {
        if !self.0.contains(&id) {
            self.0.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|s| s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Set equality, ignoring order. The repository makes no ordering
    /// guarantee, so equality of the mirror is always set-based.
    pub fn same_set(&self, other: &[String]) -> bool {
        if self.0.len() != other.len() {
            return false;
        }
        let mut a: Vec<&str> = self.0.iter().map(String::as_str).collect();
        let mut b: Vec<&str> = other.iter().map(String::as_str).collect();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl From<Vec<String>> for SampleIdList {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_round_trip_ignores_blanks() {
        let list = SampleIdList::from_joined("1234, 5678,,9012,");
        assert_eq!(list.len(), 3);
        assert_eq!(list.to_joined(), "1234,5678,9012");
    }

    #[test]
    fn push_deduplicates() {
        let mut list = SampleIdList::default();
        list.push("1234".into());
        list.push("1234".into());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn same_set_ignores_order() {
        let list = SampleIdList::from_joined("1234,5678");
        assert!(list.same_set(&["5678".into(), "1234".into()]));
        assert!(!list.same_set(&["5678".into()]));
    }
}
