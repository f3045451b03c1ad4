//! Mock port implementations for testing
//!
//! In-memory fakes for the remote store, repositories, and documentation
//! sync, enabling deterministic reconciliation tests without network or
//! database dependencies.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use labtrack_core::reconcile::ports::{DocumentationSync, OpportunityRepository, RemoteFileStore};
use labtrack_core::samples::ports::SampleRepository;
use labtrack_domain::{
    FolderPage, FolderRef, LabTrackError, Opportunity, RemoteFolderItem, Result, Sample,
};

pub const MAIN_PATH: &str = "/";
pub const ARCHIVE_PATH: &str = "/_Archive";

/// Page size the mock store serves, small enough that multi-page listing
/// paths get exercised by ordinary fixtures.
const PAGE_SIZE: usize = 2;

/// In-memory remote drive with optional per-item failure injection.
#[derive(Default)]
pub struct InMemoryRemoteStore {
    items: Mutex<Vec<RemoteFolderItem>>,
    metadata: Mutex<HashMap<String, HashMap<String, String>>>,
    fail_rename: Mutex<HashSet<String>>,
    fail_move: Mutex<HashSet<String>>,
    fail_metadata: Mutex<HashSet<String>>,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, id: &str, name: &str, parent_path: &str) {
        self.items.lock().unwrap().push(RemoteFolderItem {
            id: id.to_string(),
            name: name.to_string(),
            parent_path: Some(parent_path.to_string()),
            is_folder: true,
            web_url: None,
        });
    }

    pub fn fail_rename_for(&self, item_id: &str) {
        self.fail_rename.lock().unwrap().insert(item_id.to_string());
    }

    pub fn fail_move_for(&self, item_id: &str) {
        self.fail_move.lock().unwrap().insert(item_id.to_string());
    }

    pub fn fail_metadata_for(&self, item_id: &str) {
        self.fail_metadata.lock().unwrap().insert(item_id.to_string());
    }

    /// Clone the full folder state, for before/after dry-run comparisons.
    pub fn snapshot(&self) -> Vec<RemoteFolderItem> {
        self.items.lock().unwrap().clone()
    }

    pub fn metadata_for(&self, item_id: &str) -> Option<HashMap<String, String>> {
        self.metadata.lock().unwrap().get(item_id).cloned()
    }

    pub fn find(&self, item_id: &str) -> Option<RemoteFolderItem> {
        self.items.lock().unwrap().iter().find(|i| i.id == item_id).cloned()
    }

    fn parent_path_of(folder: &FolderRef) -> String {
        match folder {
            FolderRef::Root => MAIN_PATH.to_string(),
            FolderRef::Path(path) => path.clone(),
            FolderRef::Id(id) => format!("/id/{id}"),
        }
    }
}

#[async_trait]
impl RemoteFileStore for InMemoryRemoteStore {
    async fn list_children_page(
        &self,
        _library_id: &str,
        folder: &FolderRef,
        page_token: Option<&str>,
    ) -> Result<FolderPage> {
        let parent = Self::parent_path_of(folder);
        let all: Vec<RemoteFolderItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.parent_path.as_deref() == Some(parent.as_str()))
            .cloned()
            .collect();

        let offset: usize = page_token.map(|t| t.parse().unwrap_or(0)).unwrap_or(0);
        let page: Vec<RemoteFolderItem> =
            all.iter().skip(offset).take(PAGE_SIZE).cloned().collect();
        let next = offset + page.len();
        let next_page_token = (next < all.len()).then(|| next.to_string());

        Ok(FolderPage { items: page, next_page_token })
    }

    async fn search_by_name(
        &self,
        _library_id: &str,
        query: &str,
    ) -> Result<Vec<RemoteFolderItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.name.contains(query))
            .cloned()
            .collect())
    }

    async fn rename(&self, _library_id: &str, item_id: &str, new_name: &str) -> Result<()> {
        if self.fail_rename.lock().unwrap().contains(item_id) {
            return Err(LabTrackError::remote(500, "injected rename failure"));
        }
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| LabTrackError::NotFound(format!("item {item_id}")))?;
        item.name = new_name.to_string();
        Ok(())
    }

    async fn move_item(
        &self,
        _library_id: &str,
        item_id: &str,
        new_parent_path: &str,
    ) -> Result<()> {
        if self.fail_move.lock().unwrap().contains(item_id) {
            return Err(LabTrackError::remote(500, "injected move failure"));
        }
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| LabTrackError::NotFound(format!("item {item_id}")))?;
        item.parent_path = Some(new_parent_path.to_string());
        Ok(())
    }

    async fn patch_metadata(
        &self,
        _library_id: &str,
        item_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<()> {
        if self.fail_metadata.lock().unwrap().contains(item_id) {
            return Err(LabTrackError::remote(500, "injected metadata failure"));
        }
        self.metadata
            .lock()
            .unwrap()
            .entry(item_id.to_string())
            .or_default()
            .extend(fields.clone());
        Ok(())
    }

    async fn get_details(&self, _library_id: &str, item_id: &str) -> Result<RemoteFolderItem> {
        self.find(item_id)
            .ok_or_else(|| LabTrackError::NotFound(format!("item {item_id}")))
    }
}

/// In-memory opportunity store with a separately controlled live sample
/// set, so the `sample_ids` mirror can be made stale on purpose.
#[derive(Default)]
pub struct InMemoryOpportunityRepository {
    opportunities: Mutex<HashMap<String, Opportunity>>,
    live_samples: Mutex<HashMap<String, Vec<String>>>,
    saves: AtomicUsize,
}

impl InMemoryOpportunityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, opportunity: Opportunity) {
        self.opportunities
            .lock()
            .unwrap()
            .insert(opportunity.opportunity_number.clone(), opportunity);
    }

    pub fn set_live_samples(&self, number: &str, ids: &[&str]) {
        self.live_samples
            .lock()
            .unwrap()
            .insert(number.to_string(), ids.iter().map(|s| s.to_string()).collect());
    }

    pub fn get(&self, number: &str) -> Option<Opportunity> {
        self.opportunities.lock().unwrap().get(number).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Clone the full opportunity state, for dry-run comparisons.
    pub fn snapshot(&self) -> HashMap<String, Opportunity> {
        self.opportunities.lock().unwrap().clone()
    }
}

#[async_trait]
impl OpportunityRepository for InMemoryOpportunityRepository {
    async fn get_opportunity(&self, number: &str) -> Result<Option<Opportunity>> {
        Ok(self.get(number))
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>> {
        let mut all: Vec<Opportunity> =
            self.opportunities.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.opportunity_number.cmp(&b.opportunity_number));
        Ok(all)
    }

    async fn count_samples(&self, opportunity_number: &str) -> Result<usize> {
        Ok(self
            .live_samples
            .lock()
            .unwrap()
            .get(opportunity_number)
            .map(Vec::len)
            .unwrap_or(0))
    }

    async fn list_sample_ids(&self, opportunity_number: &str) -> Result<Vec<String>> {
        Ok(self
            .live_samples
            .lock()
            .unwrap()
            .get(opportunity_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_opportunity(&self, opportunity: &Opportunity) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.insert(opportunity.clone());
        Ok(())
    }
}

/// Documentation sync that records the order of calls.
#[derive(Default)]
pub struct RecordingDocumentationSync {
    calls: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl RecordingDocumentationSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentationSync for RecordingDocumentationSync {
    async fn sync_documentation(&self, opportunity_number: &str) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(LabTrackError::Internal("injected documentation failure".into()));
        }
        self.calls.lock().unwrap().push(opportunity_number.to_string());
        Ok(())
    }
}

/// In-memory sample store; `saturated` makes every candidate id collide.
#[derive(Default)]
pub struct InMemorySampleRepository {
    samples: Mutex<HashMap<String, Sample>>,
    saturated: Mutex<bool>,
}

impl InMemorySampleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saturate(&self) {
        *self.saturated.lock().unwrap() = true;
    }
}

#[async_trait]
impl SampleRepository for InMemorySampleRepository {
    async fn get_sample(&self, unique_id: &str) -> Result<Option<Sample>> {
        Ok(self.samples.lock().unwrap().get(unique_id).cloned())
    }

    async fn list_samples(&self, opportunity_number: &str) -> Result<Vec<Sample>> {
        Ok(self
            .samples
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.opportunity_number == opportunity_number)
            .cloned()
            .collect())
    }

    async fn id_exists(&self, unique_id: &str) -> Result<bool> {
        if *self.saturated.lock().unwrap() {
            return Ok(true);
        }
        Ok(self.samples.lock().unwrap().contains_key(unique_id))
    }

    async fn insert_sample(&self, sample: &Sample) -> Result<()> {
        self.samples.lock().unwrap().insert(sample.unique_id.clone(), sample.clone());
        Ok(())
    }
}
