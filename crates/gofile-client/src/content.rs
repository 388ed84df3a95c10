//! Content model: files, folders and not-yet-resolved references
//!
//! A [`Content`] is one of three variants. `File` and `Folder` are built
//! from a server payload. `Unknown` holds only identity and is produced when
//! a folder listing names a child without embedding it; [`Content::reload`]
//! resolves it in place, so whoever holds the `Content` sees the new variant
//! without the identity changing.
//!
//! `File` and `Folder` never revert to `Unknown`.
//!
//! ## Reload paths
//!
//! | variant            | parent  | how it is refreshed                        |
//! |--------------------|---------|--------------------------------------------|
//! | `Folder`           | any     | fetch by own id                            |
//! | `Unknown`          | none    | fetch by own id (assumed to be a root)     |
//! | `Unknown` / `File` | set     | fetch the parent, find self in its listing |
//! | `File`             | none    | `UnsupportedOperation`                     |
//!
//! The service has no "get file by id" endpoint, which is why files resolve
//! through their parent.

use crate::{
    ClientError, GofileClient, MissingChildPolicy, Result,
    options::OptionValue,
    types::{ContentPayload, DirectLink, DirectLinkOptions, UploadSource},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Type tag of a [`Content`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    File,
    Folder,
    Unknown,
}

impl ContentKind {
    /// Parse the service's `type` field
    pub fn from_tag(tag: Option<&str>) -> Result<Self> {
        match tag {
            Some("file") => Ok(Self::File),
            Some("folder") => Ok(Self::Folder),
            other => Err(ClientError::InvalidContentType(other.map(str::to_string))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Unknown => "unknown",
        }
    }
}

/// Content whose kind has not been resolved yet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnknownContent {
    pub content_id: String,
    pub parent_id: Option<String>,
    pub is_deleted: bool,
}

impl UnknownContent {
    pub fn new(content_id: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            content_id: content_id.into(),
            parent_id,
            is_deleted: false,
        }
    }
}

/// A file
///
/// Fields are `None` until the service has reported them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct File {
    pub content_id: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub time_created: Option<DateTime<Utc>>,
    /// Size in bytes
    pub size: Option<u64>,
    pub download_cnt: Option<u64>,
    pub mimetype: Option<String>,
    /// Hex MD5 digest
    pub md5: Option<String>,
    /// Storage server the file is retrieved from
    pub server: Option<String>,
    /// Human-facing download page
    pub page_link: Option<String>,
    /// Download URL reported by the service (premium accounts)
    pub link: Option<String>,
    /// Direct links created for this file
    pub direct_links: Vec<DirectLink>,
    pub is_deleted: bool,
}

impl File {
    /// Build a file from a payload
    pub fn from_payload(payload: ContentPayload) -> Result<Self> {
        let content_id = payload
            .id
            .clone()
            .ok_or_else(|| ClientError::InvalidResponse("file payload has no id".to_string()))?;
        let mut file = Self {
            content_id,
            parent_id: None,
            name: None,
            time_created: None,
            size: None,
            download_cnt: None,
            mimetype: None,
            md5: None,
            server: None,
            page_link: None,
            link: None,
            direct_links: Vec::new(),
            is_deleted: false,
        };
        file.merge(payload)?;
        Ok(file)
    }

    /// Overwrite fields the payload carries; others keep their value
    pub fn merge(&mut self, payload: ContentPayload) -> Result<()> {
        if let Some(kind) = payload.kind.as_deref() {
            if kind != "file" {
                return Err(ClientError::InvalidContentType(Some(kind.to_string())));
            }
        }
        let direct_links = match payload.direct_links.clone() {
            Some(links) => Some(
                links
                    .into_iter()
                    .map(DirectLink::from_payload)
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        let server = payload.server();
        let time_created = payload.created_at();
        if let Some(id) = payload.id {
            self.content_id = id;
        }
        set(&mut self.parent_id, payload.parent_folder);
        set(&mut self.name, payload.name);
        set(&mut self.time_created, time_created);
        set(&mut self.size, payload.size);
        set(&mut self.download_cnt, payload.download_count);
        set(&mut self.mimetype, payload.mimetype);
        set(&mut self.md5, payload.md5);
        set(&mut self.server, server);
        set(&mut self.link, payload.link);
        set(&mut self.page_link, payload.download_page);
        if let Some(links) = direct_links {
            self.direct_links = links;
        }
        Ok(())
    }

    /// Refresh from the parent folder's listing
    pub async fn reload(&mut self, client: &GofileClient) -> Result<()> {
        let parent_id = self.parent_id.clone().ok_or_else(|| {
            ClientError::UnsupportedOperation(format!(
                "file {} has no parent folder to reload through",
                self.content_id
            ))
        })?;
        if let Some(payload) = fetch_from_parent(client, &self.content_id, &parent_id).await? {
            self.merge(payload)?;
        }
        Ok(())
    }

    /// URL to fetch the file's bytes from, if any
    pub fn download_url(&self) -> Option<&str> {
        self.direct_links
            .first()
            .map(|l| l.link.as_str())
            .or(self.link.as_deref())
    }

    /// Download to `save_path`
    ///
    /// When `save_path` is a directory the file is named after the last
    /// segment of the download URL. Returns the path written.
    pub async fn download(&self, client: &GofileClient, save_path: impl AsRef<Path>) -> Result<PathBuf> {
        let url = self.download_url().ok_or_else(|| {
            ClientError::InvalidArgument(format!(
                "file {} has no direct link; create one first (premium only)",
                self.content_id
            ))
        })?;
        client.download(url, save_path.as_ref()).await
    }

    /// Create a direct link and record it on this file
    pub async fn create_direct_link(
        &mut self,
        client: &GofileClient,
        options: &DirectLinkOptions,
    ) -> Result<DirectLink> {
        let link = client
            .create_file_direct_link(&self.content_id, options, None)
            .await?;
        self.direct_links.push(link.clone());
        Ok(link)
    }
}

/// A folder
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Folder {
    pub content_id: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub time_created: Option<DateTime<Utc>>,
    /// Child contents; `Unknown` stubs when the listing only carried ids
    pub children: Vec<Content>,
    pub children_ids: Vec<String>,
    pub total_size: Option<u64>,
    pub total_download_cnt: Option<u64>,
    pub is_public: Option<bool>,
    pub is_owner: Option<bool>,
    pub is_root: bool,
    pub has_password: Option<bool>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Public shortcode
    pub code: Option<String>,
    pub is_deleted: bool,
}

impl Folder {
    /// Build a folder (and its children) from a payload
    pub fn from_payload(payload: ContentPayload) -> Result<Self> {
        let content_id = payload
            .id
            .clone()
            .ok_or_else(|| ClientError::InvalidResponse("folder payload has no id".to_string()))?;
        let mut folder = Self {
            content_id,
            parent_id: None,
            name: None,
            time_created: None,
            children: Vec::new(),
            children_ids: Vec::new(),
            total_size: None,
            total_download_cnt: None,
            is_public: None,
            is_owner: None,
            is_root: false,
            has_password: None,
            description: None,
            tags: Vec::new(),
            code: None,
            is_deleted: false,
        };
        folder.merge(payload)?;
        Ok(folder)
    }

    /// Overwrite fields the payload carries and rebuild the children
    pub fn merge(&mut self, payload: ContentPayload) -> Result<()> {
        if let Some(kind) = payload.kind.as_deref() {
            if kind != "folder" {
                return Err(ClientError::InvalidContentType(Some(kind.to_string())));
            }
        }
        let content_id = payload.id.clone().unwrap_or_else(|| self.content_id.clone());
        // Everything fallible happens before the first field is touched
        let (children, children_ids) = build_children(&content_id, &payload, &self.children)?;

        let time_created = payload.created_at();
        let has_password = payload.has_password();
        let tags = payload.tag_list();
        self.content_id = content_id;
        set(&mut self.parent_id, payload.parent_folder);
        set(&mut self.name, payload.name);
        set(&mut self.time_created, time_created);
        set(&mut self.is_public, payload.public);
        set(&mut self.is_owner, payload.is_owner);
        self.is_root = payload.is_root.unwrap_or(false);
        set(&mut self.has_password, has_password);
        set(&mut self.description, payload.description);
        if let Some(tags) = tags {
            self.tags = tags;
        }
        set(&mut self.code, payload.code);
        set(&mut self.total_size, payload.total_size);
        set(&mut self.total_download_cnt, payload.total_download_count);
        self.children = children;
        self.children_ids = children_ids;
        Ok(())
    }

    /// Refresh by fetching this folder directly
    pub async fn reload(&mut self, client: &GofileClient) -> Result<()> {
        let payload = client.get_content_payload(&self.content_id, None).await?;
        self.merge(payload)
    }

    /// Upload into this folder
    pub async fn upload(&self, client: &GofileClient, source: UploadSource) -> Result<File> {
        client.upload(source, Some(&self.content_id), None).await
    }

    /// Create a subfolder
    pub async fn create_folder(&self, client: &GofileClient, name: &str) -> Result<Folder> {
        client.create_folder(name, &self.content_id, None).await
    }

    /// Find a direct child by id
    pub fn child(&self, content_id: &str) -> Option<&Content> {
        self.children.iter().find(|c| c.content_id() == content_id)
    }

    pub fn child_mut(&mut self, content_id: &str) -> Option<&mut Content> {
        self.children.iter_mut().find(|c| c.content_id() == content_id)
    }

    /// Child files that have been resolved
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.children.iter().filter_map(Content::as_file)
    }

    /// Child folders that have been resolved
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.children.iter().filter_map(Content::as_folder)
    }
}

/// Any addressable item in the store
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Content {
    Unknown(UnknownContent),
    File(File),
    Folder(Folder),
}

impl Content {
    /// Resolve a payload into a file or folder by its type tag
    pub fn from_payload(payload: ContentPayload) -> Result<Self> {
        match ContentKind::from_tag(payload.kind.as_deref())? {
            ContentKind::File => Ok(Self::File(File::from_payload(payload)?)),
            ContentKind::Folder => Ok(Self::Folder(Folder::from_payload(payload)?)),
            ContentKind::Unknown => Err(ClientError::InvalidContentType(payload.kind)),
        }
    }

    /// A shallow reference to be resolved by [`Content::reload`]
    pub fn unresolved(content_id: impl Into<String>, parent_id: Option<String>) -> Self {
        Self::Unknown(UnknownContent::new(content_id, parent_id))
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Unknown(_) => ContentKind::Unknown,
            Self::File(_) => ContentKind::File,
            Self::Folder(_) => ContentKind::Folder,
        }
    }

    pub fn content_id(&self) -> &str {
        match self {
            Self::Unknown(c) => &c.content_id,
            Self::File(f) => &f.content_id,
            Self::Folder(f) => &f.content_id,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Self::Unknown(c) => c.parent_id.as_deref(),
            Self::File(f) => f.parent_id.as_deref(),
            Self::Folder(f) => f.parent_id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unknown(_) => None,
            Self::File(f) => f.name.as_deref(),
            Self::Folder(f) => f.name.as_deref(),
        }
    }

    pub fn time_created(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unknown(_) => None,
            Self::File(f) => f.time_created,
            Self::Folder(f) => f.time_created,
        }
    }

    /// True only after a successful `delete()` on this instance
    pub fn is_deleted(&self) -> bool {
        match self {
            Self::Unknown(c) => c.is_deleted,
            Self::File(f) => f.is_deleted,
            Self::Folder(f) => f.is_deleted,
        }
    }

    fn mark_deleted(&mut self) {
        match self {
            Self::Unknown(c) => c.is_deleted = true,
            Self::File(f) => f.is_deleted = true,
            Self::Folder(f) => f.is_deleted = true,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut File> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_file(self) -> Option<File> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_folder(self) -> Option<Folder> {
        match self {
            Self::Folder(f) => Some(f),
            _ => None,
        }
    }

    /// Resync with the service, resolving `Unknown` into its real kind
    ///
    /// On error the content is left untouched.
    #[instrument(skip(self, client), fields(content_id = %self.content_id(), kind = self.kind().as_str()))]
    pub async fn reload(&mut self, client: &GofileClient) -> Result<&mut Self> {
        match self {
            Self::Folder(folder) => folder.reload(client).await?,
            Self::Unknown(UnknownContent {
                content_id,
                parent_id: None,
                ..
            }) => {
                let payload = client.get_content_payload(content_id, None).await?;
                let resolved = Content::from_payload(payload)?;
                debug!(kind = resolved.kind().as_str(), "resolved content");
                *self = resolved;
            }
            Self::Unknown(UnknownContent {
                content_id,
                parent_id: Some(parent_id),
                ..
            }) => {
                let (content_id, parent_id) = (content_id.clone(), parent_id.clone());
                if let Some(mut payload) = fetch_from_parent(client, &content_id, &parent_id).await? {
                    payload.parent_folder.get_or_insert(parent_id);
                    let resolved = Content::from_payload(payload)?;
                    debug!(kind = resolved.kind().as_str(), "resolved content");
                    *self = resolved;
                }
            }
            Self::File(file) => file.reload(client).await?,
        }
        Ok(self)
    }

    /// Set an option, then reload unless `reload` is false
    ///
    /// The update response does not echo the new value, hence the reload.
    pub async fn set_option(
        &mut self,
        client: &GofileClient,
        option: &str,
        value: impl Into<OptionValue>,
        reload: bool,
    ) -> Result<()> {
        client
            .set_content_option(self.content_id(), option, value, None)
            .await?;
        if reload {
            self.reload(client).await?;
        }
        Ok(())
    }

    /// Delete on the service and mark this instance deleted
    pub async fn delete(&mut self, client: &GofileClient) -> Result<()> {
        client.delete(&[self.content_id()], None).await?;
        self.mark_deleted();
        Ok(())
    }

    /// Copy into `dest_id`
    ///
    /// The service does not report the copy's id; fetch the destination
    /// folder to observe it.
    pub async fn copy_to(&self, client: &GofileClient, dest_id: &str) -> Result<()> {
        client.copy_content(&[self.content_id()], dest_id, None).await
    }
}

impl From<File> for Content {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Folder> for Content {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Gofile {}: content_id={} name={}>",
            self.kind().as_str().to_uppercase(),
            self.content_id(),
            self.name().unwrap_or("None")
        )
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

// Children are ordered by the id list when one is present. An id-only
// listing keeps children in `existing` that were already resolved.
fn build_children(
    folder_id: &str,
    payload: &ContentPayload,
    existing: &[Content],
) -> Result<(Vec<Content>, Vec<String>)> {
    let embedded = payload.contents.as_deref().unwrap_or_default();

    if !embedded.is_empty() {
        let mut ordered: Vec<&ContentPayload> = Vec::with_capacity(embedded.len());
        if let Some(ids) = &payload.childs {
            for id in ids {
                if let Some(child) = embedded.iter().find(|c| c.id.as_deref() == Some(id.as_str())) {
                    ordered.push(child);
                }
            }
        }
        for child in embedded {
            if !ordered.iter().any(|c| std::ptr::eq(*c, child)) {
                ordered.push(child);
            }
        }

        let children = ordered
            .into_iter()
            .map(|child| {
                let mut child = child.clone();
                child.parent_folder.get_or_insert_with(|| folder_id.to_string());
                Content::from_payload(child)
            })
            .collect::<Result<Vec<_>>>()?;
        let ids = children.iter().map(|c| c.content_id().to_string()).collect();
        return Ok((children, ids));
    }

    let ids = payload.childs.clone().unwrap_or_default();
    let children = ids
        .iter()
        .map(|id| {
            existing
                .iter()
                .find(|c| c.content_id() == id && c.kind() != ContentKind::Unknown)
                .cloned()
                .unwrap_or_else(|| Content::unresolved(id.clone(), Some(folder_id.to_string())))
        })
        .collect();
    Ok((children, ids))
}

/// Locate `content_id` in its parent's listing, applying the client's
/// missing-child policy when it is absent.
async fn fetch_from_parent(
    client: &GofileClient,
    content_id: &str,
    parent_id: &str,
) -> Result<Option<ContentPayload>> {
    let parent = client.get_content_payload(parent_id, None).await?;
    match parent.child(content_id) {
        Some(payload) => Ok(Some(payload.clone())),
        None if parent.lists_child(content_id) => {
            debug!(content_id, parent_id, "content listed by id only; nothing to resolve from");
            Ok(None)
        }
        None => match client.config().missing_child_policy {
            MissingChildPolicy::Ignore => {
                warn!(content_id, parent_id, "content not found in parent listing; leaving unchanged");
                Ok(None)
            }
            MissingChildPolicy::Error => Err(ClientError::NotFound {
                status: format!("content {} not listed in folder {}", content_id, parent_id),
                code: 200,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload(value: Value) -> ContentPayload {
        ContentPayload::from_value(value).unwrap()
    }

    fn folder_with_contents() -> Value {
        json!({
            "id": "root-id", "type": "folder", "name": "root", "isRoot": true,
            "code": "AbC123", "public": true, "totalSize": 30, "createTime": 1700000000,
            "childs": ["f1", "d1"],
            "contents": {
                "d1": {"id": "d1", "type": "folder", "name": "docs", "parentFolder": "root-id",
                       "childs": ["x1", "x2"]},
                "f1": {"id": "f1", "type": "file", "name": "a.txt", "parentFolder": "root-id",
                       "size": 30, "md5": "d41d8cd98f00b204e9800998ecf8427e", "mimetype": "text/plain"}
            }
        })
    }

    #[test]
    fn test_folder_with_contents_resolves_children() {
        let content = Content::from_payload(payload(folder_with_contents())).unwrap();
        let folder = content.as_folder().unwrap();

        assert_eq!(folder.children.len(), 2);
        assert_eq!(folder.children[0].kind(), ContentKind::File);
        assert_eq!(folder.children[1].kind(), ContentKind::Folder);
        assert_eq!(folder.children_ids, vec!["f1", "d1"]);
        assert!(folder.is_root);
        assert_eq!(folder.code.as_deref(), Some("AbC123"));
        assert_eq!(folder.time_created.unwrap().timestamp(), 1700000000);

        let file = folder.child("f1").and_then(Content::as_file).unwrap();
        assert_eq!(file.size, Some(30));
        assert_eq!(file.parent_id.as_deref(), Some("root-id"));
    }

    #[test]
    fn test_nested_folder_follows_same_rules() {
        let content = Content::from_payload(payload(folder_with_contents())).unwrap();
        let docs = content.as_folder().unwrap().folders().next().unwrap();

        assert_eq!(docs.children.len(), 2);
        for child in &docs.children {
            assert_eq!(child.kind(), ContentKind::Unknown);
            assert_eq!(child.parent_id(), Some("d1"));
        }
    }

    #[test]
    fn test_folder_with_child_ids_only() {
        let folder = Folder::from_payload(payload(json!({
            "id": "p", "type": "folder", "name": "p", "childs": ["a", "b", "c"]
        })))
        .unwrap();

        assert_eq!(folder.children.len(), 3);
        assert!(folder.children.iter().all(|c| c.kind() == ContentKind::Unknown));
        assert!(folder.children.iter().all(|c| c.parent_id() == Some("p")));
        assert_eq!(folder.children_ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_children_without_id_list() {
        let folder = Folder::from_payload(payload(json!({
            "id": "p", "type": "folder",
            "contents": {"z": {"type": "file"}, "y": {"type": "file", "parentFolder": "p"}}
        })))
        .unwrap();
        assert_eq!(folder.children_ids.len(), 2);
        assert!(folder.child("z").unwrap().parent_id() == Some("p"));
    }

    #[test]
    fn test_children_ids_mirror_children() {
        let folder = Folder::from_payload(payload(json!({
            "id": "p", "type": "folder",
            "childs": ["f1", "ghost"],
            "contents": {
                "f1": {"id": "f1", "type": "file"},
                "extra": {"id": "extra", "type": "file"}
            }
        })))
        .unwrap();

        assert_eq!(folder.children_ids, vec!["f1", "extra"]);
        assert_eq!(folder.children.len(), folder.children_ids.len());
    }

    #[test]
    fn test_id_only_merge_keeps_resolved_children() {
        let listing = json!({"id": "p", "type": "folder", "childs": ["f1", "f2"]});
        let mut folder = Folder::from_payload(payload(listing)).unwrap();
        let file = File::from_payload(payload(json!({
            "id": "f1", "type": "file", "parentFolder": "p", "size": 5
        })))
        .unwrap();
        *folder.child_mut("f1").unwrap() = Content::from(file);

        folder
            .merge(payload(json!({"id": "p", "type": "folder", "childs": ["f1", "f3"]})))
            .unwrap();

        assert_eq!(folder.children_ids, vec!["f1", "f3"]);
        assert_eq!(folder.child("f1").unwrap().kind(), ContentKind::File);
        assert_eq!(folder.child("f1").and_then(Content::as_file).unwrap().size, Some(5));
        assert_eq!(folder.child("f3").unwrap().kind(), ContentKind::Unknown);
        assert!(folder.child("f2").is_none());
    }

    #[test]
    fn test_unrecognized_type_tag() {
        let err = Content::from_payload(payload(json!({"id": "x", "type": "symlink"}))).unwrap_err();
        assert!(matches!(err, ClientError::InvalidContentType(Some(t)) if t == "symlink"));

        let err = Content::from_payload(payload(json!({"id": "x"}))).unwrap_err();
        assert!(matches!(err, ClientError::InvalidContentType(None)));
    }

    #[test]
    fn test_bad_child_leaves_folder_untouched() {
        let mut folder = Folder::from_payload(payload(json!({
            "id": "p", "type": "folder", "name": "before", "childs": ["a"]
        })))
        .unwrap();
        let before = folder.clone();

        let err = folder.merge(payload(json!({
            "id": "p", "type": "folder", "name": "after",
            "contents": {"a": {"id": "a", "type": "weird"}}
        })));
        assert!(err.is_err());
        assert_eq!(folder, before);
    }

    #[test]
    fn test_merge_keeps_unreported_fields() {
        let mut file = File::from_payload(payload(json!({
            "id": "f", "type": "file", "name": "a.txt", "md5": "abc", "size": 3
        })))
        .unwrap();
        file.merge(payload(json!({"id": "f", "downloadCount": 7}))).unwrap();

        assert_eq!(file.md5.as_deref(), Some("abc"));
        assert_eq!(file.size, Some(3));
        assert_eq!(file.download_cnt, Some(7));
    }

    #[test]
    fn test_file_merge_rejects_folder_payload() {
        let mut file = File::from_payload(payload(json!({"id": "f", "type": "file"}))).unwrap();
        assert!(matches!(
            file.merge(payload(json!({"id": "f", "type": "folder"}))),
            Err(ClientError::InvalidContentType(_))
        ));
    }

    #[test]
    fn test_display() {
        let content = Content::unresolved("abc", None);
        assert_eq!(content.to_string(), "<Gofile UNKNOWN: content_id=abc name=None>");

        let file = File::from_payload(payload(json!({"id": "f", "name": "a.txt"}))).unwrap();
        assert_eq!(Content::from(file).to_string(), "<Gofile FILE: content_id=f name=a.txt>");
    }

    #[test]
    fn test_download_url_prefers_direct_link() {
        let file = File::from_payload(payload(json!({
            "id": "f", "link": "https://store1.gofile.io/download/f/a.txt",
            "directLinks": {"dl": {"directLink": "https://store1.gofile.io/download/direct/dl/a.txt"}}
        })))
        .unwrap();
        assert_eq!(file.download_url(), Some("https://store1.gofile.io/download/direct/dl/a.txt"));
    }
}
