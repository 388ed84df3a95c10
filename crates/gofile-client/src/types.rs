//! Wire payloads and small value types shared by the client

use crate::{ClientError, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A storage server descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Subdomain, e.g. "store1"
    pub name: String,
    /// Zone the server belongs to, e.g. "eu"
    #[serde(default)]
    pub zone: String,
}

/// Payload of the server discovery endpoint
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServerList {
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default, rename = "serversAllZone")]
    pub servers_all_zone: Vec<Server>,
    /// Legacy single-server form
    #[serde(default)]
    pub server: Option<String>,
}

impl ServerList {
    /// All descriptors, zone-local ones first
    pub fn into_servers(self) -> Vec<Server> {
        let mut servers = self.servers;
        for server in self.servers_all_zone {
            if !servers.contains(&server) {
                servers.push(server);
            }
        }
        if let Some(name) = self.server {
            if !servers.iter().any(|s| s.name == name) {
                servers.push(Server {
                    name,
                    zone: String::new(),
                });
            }
        }
        servers
    }
}

/// Pick the first server in `zone`; otherwise the first server overall,
/// unless `strict` is set.
pub fn select_server<'a>(servers: &'a [Server], zone: Option<&str>, strict: bool) -> Option<&'a Server> {
    if let Some(zone) = zone {
        if let Some(server) = servers.iter().find(|s| s.zone == zone) {
            return Some(server);
        }
        if strict {
            return None;
        }
    }
    servers.first()
}

/// Raw content payload as returned by the service
///
/// Every field is optional: the same shape carries files, folders, upload
/// results and nested children, each with a different subset populated.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    #[serde(alias = "fileId")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(alias = "fileName")]
    pub name: Option<String>,
    pub parent_folder: Option<String>,
    pub create_time: Option<i64>,

    // File fields
    pub size: Option<u64>,
    pub download_count: Option<u64>,
    pub mimetype: Option<String>,
    pub md5: Option<String>,
    #[serde(rename = "serverChoosen")]
    pub server_choosen: Option<String>,
    pub servers: Option<Vec<String>>,
    pub link: Option<String>,
    pub download_page: Option<String>,
    #[serde(default, deserialize_with = "deserialize_keyed")]
    pub direct_links: Option<Vec<DirectLinkPayload>>,

    // Folder fields
    pub public: Option<bool>,
    pub is_owner: Option<bool>,
    pub is_root: Option<bool>,
    pub password: Option<Value>,
    pub description: Option<String>,
    pub tags: Option<Value>,
    pub code: Option<String>,
    pub total_size: Option<u64>,
    pub total_download_count: Option<u64>,
    #[serde(alias = "childrenIds")]
    pub childs: Option<Vec<String>>,
    #[serde(alias = "children", default, deserialize_with = "deserialize_keyed")]
    pub contents: Option<Vec<ContentPayload>>,
}

impl ContentPayload {
    /// Decode from an unwrapped envelope payload
    pub fn from_value(data: Value) -> Result<Self> {
        crate::envelope::decode(data)
    }

    /// Find a nested child by id
    pub fn child(&self, id: &str) -> Option<&ContentPayload> {
        self.contents
            .as_ref()?
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
    }

    /// Whether `id` is named in the child id list
    pub fn lists_child(&self, id: &str) -> bool {
        self.childs
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|c| c == id))
    }

    /// Server the file is retrieved from
    pub fn server(&self) -> Option<String> {
        self.server_choosen
            .clone()
            .or_else(|| self.servers.as_ref()?.first().cloned())
    }

    /// Whether the folder is password protected
    pub fn has_password(&self) -> Option<bool> {
        match self.password.as_ref()? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(!s.is_empty()),
            Value::Null => None,
            _ => Some(true),
        }
    }

    /// Tags as a list, accepting either comma-joined text or an array
    pub fn tag_list(&self) -> Option<Vec<String>> {
        match self.tags.as_ref()? {
            Value::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time.and_then(|t| DateTime::from_timestamp(t, 0))
    }
}

trait Keyed {
    fn id_slot(&mut self) -> &mut Option<String>;
}

impl Keyed for ContentPayload {
    fn id_slot(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

impl Keyed for DirectLinkPayload {
    fn id_slot(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyedRepr<T> {
    Map(BTreeMap<String, T>),
    List(Vec<T>),
}

// Collections arrive keyed by id; an empty one may be sent as `[]`.
fn deserialize_keyed<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Keyed,
{
    let repr = Option::<KeyedRepr<T>>::deserialize(deserializer)?;
    Ok(repr.map(|repr| match repr {
        KeyedRepr::Map(map) => map
            .into_iter()
            .map(|(id, mut item)| {
                item.id_slot().get_or_insert(id);
                item
            })
            .collect(),
        KeyedRepr::List(list) => list,
    }))
}

/// Raw direct-link payload
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectLinkPayload {
    pub id: Option<String>,
    pub direct_link: Option<String>,
    pub expire_time: Option<i64>,
    #[serde(default)]
    pub source_ips_allowed: Vec<String>,
    #[serde(default)]
    pub domains_allowed: Vec<String>,
    #[serde(default)]
    pub auth: Vec<String>,
}

/// A provisioned direct download link
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectLink {
    pub id: String,
    pub link: String,
    /// Expiry as epoch seconds; `None` never expires
    pub expire: Option<i64>,
    /// Empty means unrestricted
    pub ips_allowed: Vec<String>,
    /// Empty means unrestricted
    pub domains_allowed: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DirectLink {
    pub fn from_payload(payload: DirectLinkPayload) -> Result<Self> {
        let link = payload
            .direct_link
            .ok_or_else(|| ClientError::InvalidResponse("direct link payload has no URL".to_string()))?;
        let id = payload.id.unwrap_or_default();
        let (username, password) = match payload.auth.first().and_then(|a| a.split_once(':')) {
            Some((user, pass)) => (Some(user.to_string()), Some(pass.to_string())),
            None => (None, None),
        };
        Ok(Self {
            id,
            link,
            // The service uses 0 for "no expiry"
            expire: payload.expire_time.filter(|t| *t > 0),
            ips_allowed: payload.source_ips_allowed,
            domains_allowed: payload.domains_allowed,
            username,
            password,
        })
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expire.and_then(|t| DateTime::from_timestamp(t, 0))
    }
}

/// Options for creating a direct link
#[derive(Clone, Debug, Default)]
pub struct DirectLinkOptions {
    /// Expiry as epoch seconds
    pub expire: Option<i64>,
    pub ips_allowed: Vec<String>,
    pub domains_allowed: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DirectLinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expire_at(mut self, epoch_secs: i64) -> Self {
        self.expire = Some(epoch_secs);
        self
    }

    pub fn allow_ip(mut self, ip: impl Into<String>) -> Self {
        self.ips_allowed.push(ip.into());
        self
    }

    pub fn allow_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains_allowed.push(domain.into());
        self
    }

    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Check the argument contract and build the request body
    pub fn to_body(&self) -> Result<Value> {
        let mut body = serde_json::Map::new();
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => {
                body.insert("auth".to_string(), Value::from(vec![format!("{}:{}", user, pass)]));
            }
            (None, None) => {}
            _ => {
                return Err(ClientError::InvalidArgument(
                    "direct link username and password must be set together".to_string(),
                ))
            }
        }
        if let Some(expire) = self.expire {
            body.insert("expireTime".to_string(), Value::from(expire));
        }
        if !self.ips_allowed.is_empty() {
            body.insert("sourceIpsAllowed".to_string(), Value::from(self.ips_allowed.clone()));
        }
        if !self.domains_allowed.is_empty() {
            body.insert("domainsAllowed".to_string(), Value::from(self.domains_allowed.clone()));
        }
        Ok(Value::Object(body))
    }
}

/// What to upload
#[derive(Clone, Debug)]
pub enum UploadSource {
    /// A local file, read when the upload starts
    Path(PathBuf),
    /// In-memory content with the file name to store it under
    Bytes { name: String, data: Bytes },
}

impl UploadSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    /// File name the content is stored under
    pub fn file_name(&self) -> Result<String> {
        let name = match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Bytes { name, .. } => name.clone(),
        };
        if name.is_empty() {
            return Err(ClientError::InvalidArgument(
                "upload requires a file name or a file path".to_string(),
            ));
        }
        Ok(name)
    }
}
