//! Main client implementation

use crate::{
    Account, ClientError, Config, Content, File, Folder, Result,
    account::AccountPayload,
    envelope,
    options::{self, OptionValue},
    types::*,
};
use futures::StreamExt;
use reqwest::{Client, Method, RequestBuilder, header, multipart};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Gofile API client
///
/// Construction performs server discovery (and, with a token, loads the
/// account). Every other call is a fixed sequence of awaited requests;
/// nothing runs in the background and nothing is retried.
pub struct GofileClient {
    config: Config,
    http: Client,
    server: String,
    account: Option<Account>,
}

impl GofileClient {
    /// Create a new client with the given configuration
    pub async fn new(config: Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::Config(format!("invalid user agent: {}", e)))?,
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        let mut client = Self {
            config,
            http,
            server: String::new(),
            account: None,
        };
        client.server = client.best_server().await?;
        info!(server = %client.server, "selected storage server");

        if client.config.fetch_account && client.token(None).is_some() {
            client.account = Some(client.get_account(None).await?);
        }
        Ok(client)
    }

    /// Create an anonymous client with default configuration
    pub async fn guest() -> Result<Self> {
        Self::new(Config::default()).await
    }

    /// Create with an account token
    pub async fn with_token(token: &str) -> Result<Self> {
        Self::new(Config::default().with_token(token)).await
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Storage server chosen at construction
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Account loaded for the configured token, if any
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Re-fetch the configured token's account
    pub async fn refresh_account(&mut self) -> Result<Option<&Account>> {
        if self.token(None).is_none() {
            return Ok(None);
        }
        self.account = Some(self.get_account(None).await?);
        Ok(self.account.as_ref())
    }

    // ==================== Servers ====================

    /// List storage servers, optionally for a zone
    #[instrument(skip(self))]
    pub async fn get_servers(&self, zone: Option<&str>) -> Result<Vec<Server>> {
        let mut req = self.http.get(self.config.api("/servers"));
        if let Some(zone) = zone {
            req = req.query(&[("zone", zone)]);
        }
        let data = self.send(req).await?;
        Ok(envelope::decode::<ServerList>(data)?.into_servers())
    }

    /// Pick the storage server for the configured zone
    pub async fn best_server(&self) -> Result<String> {
        let zone = self.config.zone.as_deref();
        let servers = self.get_servers(zone).await?;
        select_server(&servers, zone, self.config.strict_zone)
            .map(|s| s.name.clone())
            .ok_or_else(|| {
                ClientError::InvalidResponse(match zone {
                    Some(zone) => format!("no storage server available in zone {}", zone),
                    None => "no storage server available".to_string(),
                })
            })
    }

    // ==================== Content Operations ====================

    /// Upload a file, optionally into folder `parent_id`
    #[instrument(skip(self, source, token))]
    pub async fn upload(
        &self,
        source: UploadSource,
        parent_id: Option<&str>,
        token: Option<&str>,
    ) -> Result<File> {
        let file_name = source.file_name()?;
        let data = match source {
            UploadSource::Path(path) => tokio::fs::read(&path).await?,
            UploadSource::Bytes { data, .. } => data.to_vec(),
        };
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        let part = multipart::Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str(mime.as_ref())?;

        let mut form = multipart::Form::new().part("file", part);
        if let Some(parent_id) = parent_id {
            form = form.text("folderId", parent_id.to_string());
        }

        let url = format!("{}/contents/uploadfile", self.config.store_base(&self.server));
        let mut req = self.http.post(&url).multipart(form);
        if let Some(token) = self.token(token) {
            req = req.bearer_auth(token);
        }

        debug!("Uploading {} to {}", file_name, url);
        let data = self.send(req).await?;
        let mut payload = ContentPayload::from_value(data)?;
        if payload.parent_folder.is_none() {
            payload.parent_folder = parent_id.map(str::to_string);
        }
        File::from_payload(payload)
    }

    /// Fetch content and resolve it into a file or folder
    #[instrument(skip(self, token))]
    pub async fn get(&self, content_id: &str, token: Option<&str>) -> Result<Content> {
        let payload = self.get_content_payload(content_id, token).await?;
        Content::from_payload(payload)
    }

    /// Fetch a folder
    pub async fn get_folder(&self, content_id: &str, token: Option<&str>) -> Result<Folder> {
        match self.get(content_id, token).await? {
            Content::Folder(folder) => Ok(folder),
            other => Err(ClientError::InvalidContentType(Some(other.kind().as_str().to_string()))),
        }
    }

    pub(crate) async fn get_content_payload(
        &self,
        content_id: &str,
        token: Option<&str>,
    ) -> Result<ContentPayload> {
        let url = self.config.api(&format!("/contents/{}", content_id));
        let data = self.request(Method::GET, &url, token, None).await?;
        ContentPayload::from_value(data)
    }

    /// Delete one or more contents
    #[instrument(skip(self, token))]
    pub async fn delete(&self, content_ids: &[&str], token: Option<&str>) -> Result<()> {
        if content_ids.is_empty() {
            return Err(ClientError::InvalidArgument(
                "delete requires at least one content id".to_string(),
            ));
        }
        let body = json!({ "contentsId": content_ids.join(",") });
        self.request(Method::DELETE, &self.config.api("/contents"), token, Some(body))
            .await?;
        Ok(())
    }

    /// Copy contents into folder `parent_id`
    ///
    /// The service does not return the new content ids.
    #[instrument(skip(self, token))]
    pub async fn copy_content(
        &self,
        content_ids: &[&str],
        parent_id: &str,
        token: Option<&str>,
    ) -> Result<()> {
        if parent_id.is_empty() {
            return Err(ClientError::InvalidArgument(
                "copy requires a destination folder id".to_string(),
            ));
        }
        if content_ids.is_empty() {
            return Err(ClientError::InvalidArgument(
                "copy requires at least one content id".to_string(),
            ));
        }
        let body = json!({
            "contentsId": content_ids.join(","),
            "folderId": parent_id,
        });
        self.request(Method::POST, &self.config.api("/contents/copy"), token, Some(body))
            .await?;
        Ok(())
    }

    /// Create a folder named `name` inside `parent_id`
    #[instrument(skip(self, token))]
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: &str,
        token: Option<&str>,
    ) -> Result<Folder> {
        let body = json!({
            "parentFolderId": parent_id,
            "folderName": name,
        });
        let data = self
            .request(Method::POST, &self.config.api("/contents/createFolder"), token, Some(body))
            .await?;

        let mut payload = ContentPayload::from_value(data)?;
        payload.name.get_or_insert_with(|| name.to_string());
        payload.parent_folder.get_or_insert_with(|| parent_id.to_string());
        Folder::from_payload(payload)
    }

    /// Validate, format and set an option on a content
    #[instrument(skip(self, value, token))]
    pub async fn set_content_option(
        &self,
        content_id: &str,
        option: &str,
        value: impl Into<OptionValue>,
        token: Option<&str>,
    ) -> Result<()> {
        let value = options::validate(option, &value.into())?;
        let body = json!({
            "attribute": option,
            "attributeValue": value,
        });
        let url = self.config.api(&format!("/contents/{}/update", content_id));
        self.request(Method::PUT, &url, token, Some(body)).await?;
        Ok(())
    }

    /// Create a direct link for a file (premium only)
    #[instrument(skip(self, options, token))]
    pub async fn create_file_direct_link(
        &self,
        content_id: &str,
        options: &DirectLinkOptions,
        token: Option<&str>,
    ) -> Result<DirectLink> {
        let body = options.to_body()?;
        let url = self.config.api(&format!("/contents/{}/directlinks", content_id));
        let data = self.request(Method::POST, &url, token, Some(body)).await?;
        DirectLink::from_payload(envelope::decode(data)?)
    }

    /// Stream `url` to `dest`
    ///
    /// When `dest` is an existing directory the file is named after the
    /// URL's last path segment. Returns the path written.
    #[instrument(skip(self))]
    pub async fn download(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        let is_dir = tokio::fs::metadata(dest)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let target = if is_dir {
            dest.join(file_name_from_url(url)?)
        } else {
            dest.to_path_buf()
        };

        debug!("Downloading {} to {}", url, target.display());
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: format!("download failed: {}", status),
                code: status.as_u16(),
            });
        }

        let file = tokio::fs::File::create(&target).await?;
        if let Err(e) = write_stream(file, response).await {
            // Leave nothing half-written behind
            let _ = tokio::fs::remove_file(&target).await;
            return Err(e);
        }
        Ok(target)
    }

    // ==================== Account Operations ====================

    /// Id of the account owning the token
    #[instrument(skip(self, token))]
    pub async fn get_account_id(&self, token: Option<&str>) -> Result<String> {
        #[derive(Deserialize)]
        struct AccountId {
            id: String,
        }

        let data = self
            .request(Method::GET, &self.config.api("/accounts/getid"), token, None)
            .await?;
        Ok(envelope::decode::<AccountId>(data)?.id)
    }

    pub(crate) async fn get_account_payload(&self, token: Option<&str>) -> Result<AccountPayload> {
        let account_id = self.get_account_id(token).await?;
        let url = self.config.api(&format!("/accounts/{}", account_id));
        let data = self.request(Method::GET, &url, token, None).await?;
        let mut payload: AccountPayload = envelope::decode(data)?;
        payload.id.get_or_insert(account_id);
        Ok(payload)
    }

    /// Fetch the account for `token` (or the configured token)
    #[instrument(skip(self, token))]
    pub async fn get_account(&self, token: Option<&str>) -> Result<Account> {
        let token = self
            .token(token)
            .ok_or_else(|| ClientError::InvalidArgument("an account token is required".to_string()))?
            .to_string();
        let payload = self.get_account_payload(Some(&token)).await?;
        Ok(Account::from_payload(token, payload))
    }

    // ==================== Helper Methods ====================

    // The per-call override wins; an empty token counts as none.
    fn token<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        token
            .or(self.config.token.as_deref())
            .filter(|t| !t.is_empty())
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value> {
        debug!("Sending {} request to {}", method, url);
        let mut req = self.http.request(method, url);

        if let Some(token) = self.token(token) {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        self.send(req).await
    }

    async fn send(&self, req: RequestBuilder) -> Result<Value> {
        let response = req.send().await?;
        let code = response.status().as_u16();
        let body = response.bytes().await?;
        envelope::unwrap(code, &body)
    }
}

async fn write_stream(mut file: tokio::fs::File, response: reqwest::Response) -> Result<()> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}

fn file_name_from_url(url: &str) -> Result<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()?
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        })
        .ok_or_else(|| ClientError::InvalidArgument(format!("cannot derive a file name from {}", url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://store1.gofile.io/download/direct/abc/report.pdf").unwrap(),
            "report.pdf"
        );
        assert_eq!(file_name_from_url("https://x.io/a/b/").unwrap(), "b");
        assert!(file_name_from_url("https://x.io/").is_err());
        assert!(file_name_from_url("not a url").is_err());
    }
}
