//! Client configuration

use std::time::Duration;

/// What `reload()` does when a file is missing from its parent's listing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingChildPolicy {
    /// Leave the content unchanged and return successfully
    #[default]
    Ignore,
    /// Fail with `ClientError::NotFound`
    Error,
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// API endpoint URL
    pub api_url: String,
    /// Domain the storage servers live under
    pub base_domain: String,
    /// Storage host override; otherwise `https://{server}.{base_domain}`
    pub store_url: Option<String>,
    /// Account token (sent as a bearer token)
    pub token: Option<String>,
    /// Preferred server zone (e.g. "eu", "na")
    pub zone: Option<String>,
    /// Fail construction when no server matches `zone`
    pub strict_zone: bool,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Load the account snapshot at construction when a token is set
    pub fetch_account: bool,
    /// Reload behavior for content absent from its parent folder
    pub missing_child_policy: MissingChildPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.gofile.io".to_string(),
            base_domain: "gofile.io".to_string(),
            store_url: None,
            token: None,
            zone: None,
            strict_zone: false,
            timeout: Duration::from_secs(30),
            user_agent: format!("gofile-client/{}", env!("CARGO_PKG_VERSION")),
            fetch_account: true,
            missing_child_policy: MissingChildPolicy::Ignore,
        }
    }
}

impl Config {
    /// Create a new config with the given API endpoint
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Build a config from `GOFILE_TOKEN`, `GOFILE_ZONE` and `GOFILE_API_URL`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("GOFILE_API_URL") {
            config.api_url = url;
        }
        config.token = std::env::var("GOFILE_TOKEN").ok().filter(|t| !t.is_empty());
        config.zone = std::env::var("GOFILE_ZONE").ok().filter(|z| !z.is_empty());
        config
    }

    /// Set the account token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the preferred zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Require a server in the preferred zone
    pub fn strict_zone(mut self) -> Self {
        self.strict_zone = true;
        self
    }

    /// Override the storage host URL
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = Some(url.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip loading the account at construction
    pub fn without_account(mut self) -> Self {
        self.fetch_account = false;
        self
    }

    /// Set the missing-child reload policy
    pub fn with_missing_child_policy(mut self, policy: MissingChildPolicy) -> Self {
        self.missing_child_policy = policy;
        self
    }

    /// Base URL of the storage server named `server`
    pub fn store_base(&self, server: &str) -> String {
        match &self.store_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}", server, self.base_domain),
        }
    }

    /// Build the full URL for an API path
    pub fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_base() {
        let config = Config::default();
        assert_eq!(config.store_base("store3"), "https://store3.gofile.io");

        let config = config.with_store_url("http://127.0.0.1:8080/");
        assert_eq!(config.store_base("store3"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_builder() {
        let config = Config::new("http://localhost:1234")
            .with_token("abc")
            .with_zone("eu")
            .strict_zone()
            .without_account();

        assert_eq!(config.api("/servers"), "http://localhost:1234/servers");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.zone.as_deref(), Some("eu"));
        assert!(config.strict_zone);
        assert!(!config.fetch_account);
        assert_eq!(config.missing_child_policy, MissingChildPolicy::Ignore);
    }
}
