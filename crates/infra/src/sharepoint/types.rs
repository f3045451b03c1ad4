//! Wire types for the Graph drive API

use labtrack_domain::RemoteFolderItem;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct DriveItemListResponse {
    pub value: Vec<DriveItem>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriveItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "parentReference")]
    pub parent_reference: Option<ParentReference>,
    pub folder: Option<FolderFacet>,
    #[serde(rename = "webUrl")]
    pub web_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParentReference {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FolderFacet {
    #[serde(rename = "childCount")]
    #[allow(dead_code)]
    pub child_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

impl DriveItem {
    /// Convert into the transport-agnostic folder item. The Graph parent
    /// path (`/drives/{id}/root:/_Archive`) is reduced to its drive-root
    /// relative form (`/_Archive`); direct children of the root get `/`.
    pub fn into_folder_item(self) -> RemoteFolderItem {
        let parent_path = self.parent_reference.and_then(|p| p.path).map(|path| {
            match path.split_once("root:") {
                Some((_, "")) => "/".to_string(),
                Some((_, rest)) => rest.to_string(),
                None => path,
            }
        });
        RemoteFolderItem {
            id: self.id,
            name: self.name,
            parent_path,
            is_folder: self.folder.is_some(),
            web_url: self.web_url,
        }
    }
}
