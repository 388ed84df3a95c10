//! Account metadata snapshot

use crate::{GofileClient, Result};
use serde::{Deserialize, Serialize};

/// Account tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Guest,
    Standard,
    Premium,
    #[serde(other)]
    Unknown,
}

/// Raw account payload
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    pub id: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub tier: Option<Tier>,
    pub root_folder: Option<String>,
    #[serde(alias = "folderCount")]
    pub folders_count: Option<u64>,
    #[serde(alias = "fileCount")]
    pub files_count: Option<u64>,
    #[serde(alias = "storage")]
    pub total_size: Option<u64>,
    pub total_download_count: Option<u64>,
    pub stats_current: Option<AccountStats>,
}

/// Usage counters nested under `statsCurrent`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub folder_count: Option<u64>,
    pub file_count: Option<u64>,
    pub storage: Option<u64>,
    pub traffic_direct_generated: Option<u64>,
}

/// Account details tied to a token
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Identity key; never changes once set
    pub token: String,
    pub account_id: Option<String>,
    pub email: Option<String>,
    pub tier: Option<Tier>,
    /// Root folder content id
    pub root_id: Option<String>,
    pub folder_cnt: Option<u64>,
    pub file_cnt: Option<u64>,
    pub total_size: Option<u64>,
    pub total_download_cnt: Option<u64>,
}

impl Account {
    /// Build from a payload fetched with `token`
    pub fn from_payload(token: impl Into<String>, payload: AccountPayload) -> Self {
        let mut account = Self {
            token: token.into(),
            account_id: None,
            email: None,
            tier: None,
            root_id: None,
            folder_cnt: None,
            file_cnt: None,
            total_size: None,
            total_download_cnt: None,
        };
        account.merge(payload);
        account
    }

    /// Overwrite every reported field in place; the token is kept
    pub fn merge(&mut self, payload: AccountPayload) {
        let stats = payload.stats_current.unwrap_or_default();
        set(&mut self.account_id, payload.id);
        set(&mut self.email, payload.email);
        set(&mut self.tier, payload.tier);
        set(&mut self.root_id, payload.root_folder);
        set(&mut self.folder_cnt, payload.folders_count.or(stats.folder_count));
        set(&mut self.file_cnt, payload.files_count.or(stats.file_count));
        set(&mut self.total_size, payload.total_size.or(stats.storage));
        set(&mut self.total_download_cnt, payload.total_download_count);
    }

    pub fn is_premium(&self) -> bool {
        self.tier == Some(Tier::Premium)
    }

    /// Re-fetch and overwrite all fields
    pub async fn reload(&mut self, client: &GofileClient) -> Result<()> {
        let payload = client.get_account_payload(Some(&self.token)).await?;
        self.merge(payload);
        Ok(())
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_payload() {
        let payload: AccountPayload = serde_json::from_value(json!({
            "token": "tok", "email": "me@example.com", "tier": "standard",
            "rootFolder": "root-id", "foldersCount": 2, "filesCount": 5,
            "totalSize": 1024, "totalDownloadCount": 9
        }))
        .unwrap();
        let account = Account::from_payload("tok", payload);

        assert_eq!(account.tier, Some(Tier::Standard));
        assert_eq!(account.root_id.as_deref(), Some("root-id"));
        assert_eq!(account.folder_cnt, Some(2));
        assert_eq!(account.file_cnt, Some(5));
        assert_eq!(account.total_size, Some(1024));
        assert!(!account.is_premium());
    }

    #[test]
    fn test_nested_stats_payload() {
        let payload: AccountPayload = serde_json::from_value(json!({
            "id": "acc-1", "tier": "premium", "rootFolder": "r",
            "statsCurrent": {"folderCount": 1, "fileCount": 3, "storage": 77}
        }))
        .unwrap();
        let account = Account::from_payload("tok", payload);

        assert!(account.is_premium());
        assert_eq!(account.account_id.as_deref(), Some("acc-1"));
        assert_eq!(account.file_cnt, Some(3));
        assert_eq!(account.total_size, Some(77));
    }

    #[test]
    fn test_unrecognized_tier() {
        let payload: AccountPayload = serde_json::from_value(json!({"tier": "enterprise"})).unwrap();
        assert_eq!(payload.tier, Some(Tier::Unknown));
    }

    #[test]
    fn test_merge_preserves_token() {
        let mut account = Account::from_payload("tok", AccountPayload::default());
        account.merge(AccountPayload {
            token: Some("other".into()),
            email: Some("new@example.com".into()),
            ..Default::default()
        });
        assert_eq!(account.token, "tok");
        assert_eq!(account.email.as_deref(), Some("new@example.com"));
    }
}
