//! Graph drive client
//!
//! Implements the remote file store port against the Microsoft Graph
//! `/drives/{id}` API. Pagination relies on `@odata.nextLink` being an
//! absolute URL that can be replayed verbatim as the next page request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use labtrack_core::RemoteFileStore;
use labtrack_domain::{FolderPage, FolderRef, LabTrackError, RemoteFolderItem, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::debug;

use super::auth::AccessTokenProvider;
use super::types::{DriveItem, DriveItemListResponse};

const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";
const CHILD_SELECT: &str = "id,name,parentReference,folder,webUrl";

/// Remote file store backed by a Graph drive.
pub struct GraphFileStore {
    client: Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
    page_size: u32,
}

impl GraphFileStore {
    pub fn new(tokens: Arc<dyn AccessTokenProvider>, page_size: u32) -> Self {
        Self::with_base_url(tokens, page_size, GRAPH_API_BASE)
    }

    /// Use a non-default API base URL. Tests point this at a mock server.
    pub fn with_base_url(
        tokens: Arc<dyn AccessTokenProvider>,
        page_size: u32,
        base_url: &str,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            page_size,
        }
    }

    /// Path segment addressing an item inside a drive.
    fn item_segment(folder: &FolderRef) -> String {
        match folder {
            FolderRef::Root => "root".to_string(),
            FolderRef::Id(id) => format!("items/{id}"),
            FolderRef::Path(path) => format!("root:{path}:"),
        }
    }

    async fn authed(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| LabTrackError::Network(format!("Graph request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(LabTrackError::remote(status, body));
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(self.authed(Method::GET, url).await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| LabTrackError::Network(format!("failed to parse Graph response: {e}")))
    }

    async fn patch_json(&self, url: &str, body: &Value) -> Result<()> {
        let request = self.authed(Method::PATCH, url).await?.json(body);
        self.send(request).await?;
        Ok(())
    }

    /// Graph expects the move destination as a drive-absolute root path.
    fn destination_path(library_id: &str, parent_path: &str) -> String {
        if parent_path == "/" {
            format!("/drives/{library_id}/root:")
        } else {
            format!("/drives/{library_id}/root:{parent_path}")
        }
    }
}

#[async_trait]
impl RemoteFileStore for GraphFileStore {
    async fn list_children_page(
        &self,
        library_id: &str,
        folder: &FolderRef,
        page_token: Option<&str>,
    ) -> Result<FolderPage> {
        // A continuation token is the full nextLink URL; replay it as-is.
        let url = match page_token {
            Some(link) => link.to_string(),
            None => format!(
                "{}/drives/{}/{}/children?$top={}&$select={}",
                self.base_url,
                library_id,
                Self::item_segment(folder),
                self.page_size,
                CHILD_SELECT,
            ),
        };

        let page: DriveItemListResponse = self.get_json(&url).await?;
        debug!(library_id, count = page.value.len(), "listed folder children page");

        Ok(FolderPage {
            items: page.value.into_iter().map(DriveItem::into_folder_item).collect(),
            next_page_token: page.next_link,
        })
    }

    async fn search_by_name(
        &self,
        library_id: &str,
        query: &str,
    ) -> Result<Vec<RemoteFolderItem>> {
        let url = format!(
            "{}/drives/{}/root/search(q='{}')?$select={}",
            self.base_url,
            library_id,
            urlencoding::encode(query),
            CHILD_SELECT,
        );

        let mut items = Vec::new();
        let mut next = Some(url);
        while let Some(page_url) = next {
            let page: DriveItemListResponse = self.get_json(&page_url).await?;
            items.extend(page.value.into_iter().map(DriveItem::into_folder_item));
            next = page.next_link;
        }
        Ok(items)
    }

    async fn rename(&self, library_id: &str, item_id: &str, new_name: &str) -> Result<()> {
        let url = format!("{}/drives/{}/items/{}", self.base_url, library_id, item_id);
        self.patch_json(&url, &json!({ "name": new_name })).await
    }

    async fn move_item(
        &self,
        library_id: &str,
        item_id: &str,
        new_parent_path: &str,
    ) -> Result<()> {
        let url = format!("{}/drives/{}/items/{}", self.base_url, library_id, item_id);
        let body = json!({
            "parentReference": { "path": Self::destination_path(library_id, new_parent_path) }
        });
        self.patch_json(&url, &body).await
    }

    async fn patch_metadata(
        &self,
        library_id: &str,
        item_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<()> {
        let url = format!(
            "{}/drives/{}/items/{}/listItem/fields",
            self.base_url, library_id, item_id
        );
        let body = serde_json::to_value(fields)
            .map_err(|e| LabTrackError::Internal(format!("failed to encode metadata: {e}")))?;
        self.patch_json(&url, &body).await
    }

    async fn get_details(&self, library_id: &str, item_id: &str) -> Result<RemoteFolderItem> {
        let url = format!(
            "{}/drives/{}/items/{}?$select={}",
            self.base_url, library_id, item_id, CHILD_SELECT
        );
        let item: DriveItem = self.get_json(&url).await?;
        Ok(item.into_folder_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_segments_cover_all_folder_refs() {
        assert_eq!(GraphFileStore::item_segment(&FolderRef::Root), "root");
        assert_eq!(GraphFileStore::item_segment(&FolderRef::Id("abc".into())), "items/abc");
        assert_eq!(
            GraphFileStore::item_segment(&FolderRef::Path("/_Archive".into())),
            "root:/_Archive:"
        );
    }

    #[test]
    fn move_destination_handles_the_drive_root() {
        assert_eq!(GraphFileStore::destination_path("d1", "/"), "/drives/d1/root:");
        assert_eq!(
            GraphFileStore::destination_path("d1", "/_Archive"),
            "/drives/d1/root:/_Archive"
        );
    }
}
