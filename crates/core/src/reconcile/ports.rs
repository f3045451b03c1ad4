//! Port interfaces for reconciliation

use async_trait::async_trait;
use labtrack_domain::{FolderPage, FolderRef, Opportunity, RemoteFolderItem, Result};
use std::collections::HashMap;

/// Abstract remote hierarchical document store (a SharePoint drive in
/// production). Items are addressed by opaque ids; parents by path.
#[async_trait]
pub trait RemoteFileStore: Send + Sync {
    /// Fetch one page of the children of a folder. Pass the token from the
    /// previous page to continue; `None` starts from the beginning.
    async fn list_children_page(
        &self,
        library_id: &str,
        folder: &FolderRef,
        page_token: Option<&str>,
    ) -> Result<FolderPage>;

    /// Search the library for items matching a name query.
    async fn search_by_name(&self, library_id: &str, query: &str)
        -> Result<Vec<RemoteFolderItem>>;

    /// Rename an item in place.
    async fn rename(&self, library_id: &str, item_id: &str, new_name: &str) -> Result<()>;

    /// Move an item under a new parent path (drive-root relative).
    async fn move_item(&self, library_id: &str, item_id: &str, new_parent_path: &str)
        -> Result<()>;

    /// Patch listItem metadata columns on an item.
    async fn patch_metadata(
        &self,
        library_id: &str,
        item_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<()>;

    /// Fetch a single item by id.
    async fn get_details(&self, library_id: &str, item_id: &str) -> Result<RemoteFolderItem>;
}

/// Exhaustively list the children of a folder, following continuation
/// tokens until the remote store reports no more pages.
pub async fn list_all_children(
    store: &dyn RemoteFileStore,
    library_id: &str,
    folder: &FolderRef,
) -> Result<Vec<RemoteFolderItem>> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = store.list_children_page(library_id, folder, token.as_deref()).await?;
        items.extend(page.items);
        match page.next_page_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    Ok(items)
}

/// Trait for loading and saving opportunity records.
#[async_trait]
pub trait OpportunityRepository: Send + Sync {
    /// Look up one opportunity by its business key.
    async fn get_opportunity(&self, number: &str) -> Result<Option<Opportunity>>;

    /// Load every opportunity.
    async fn list_opportunities(&self) -> Result<Vec<Opportunity>>;

    /// Count the samples currently filed under an opportunity. This is the
    /// live count, independent of the denormalized `sample_ids` mirror.
    async fn count_samples(&self, opportunity_number: &str) -> Result<usize>;

    /// List the ids of the samples currently filed under an opportunity.
    /// Ordering is whatever the backing store returns; callers must not
    /// depend on it being stable across calls.
    async fn list_sample_ids(&self, opportunity_number: &str) -> Result<Vec<String>>;

    /// Persist an opportunity.
    async fn save_opportunity(&self, opportunity: &Opportunity) -> Result<()>;
}

/// Trait for the external documentation (workbook) sync.
///
/// The actual Excel automation lives outside this system; the archive saga
/// only needs the ordering guarantee that documentation is synced before
/// the folder moves out from under its main-library path.
#[async_trait]
pub trait DocumentationSync: Send + Sync {
    /// Bring the opportunity's documentation up to date.
    async fn sync_documentation(&self, opportunity_number: &str) -> Result<()>;
}
