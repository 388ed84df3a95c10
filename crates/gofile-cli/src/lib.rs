//! Gofile CLI
//!
//! Command-line front end for the Gofile client library. Results are
//! printed to stdout as JSON.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use gofile_client::{
    options, Config, DirectLinkOptions, GofileClient, MissingChildPolicy, UploadSource,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gofile")]
#[command(about = "Command-line client for the Gofile file-hosting service")]
#[command(version)]
pub struct Cli {
    /// Account token
    #[arg(long, env = "GOFILE_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Preferred storage zone (e.g. eu, na)
    #[arg(long, env = "GOFILE_ZONE", global = true)]
    pub zone: Option<String>,

    /// Fail instead of falling back when no server is in the zone
    #[arg(long, global = true)]
    pub strict_zone: bool,

    /// API base URL
    #[arg(long, default_value = "https://api.gofile.io", env = "GOFILE_API_URL", global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", env = "GOFILE_TIMEOUT", global = true)]
    pub timeout: u64,

    /// Error when a reload finds content missing from its parent folder
    #[arg(long, global = true)]
    pub strict_reload: bool,

    /// Enable debug logging
    #[arg(short, long, env = "GOFILE_DEBUG", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Upload a local file
    Upload {
        path: PathBuf,
        /// Destination folder id (a guest folder is created when omitted)
        #[arg(long)]
        folder: Option<String>,
    },
    /// Show a content and its children
    #[command(alias = "ls")]
    Get { content_id: String },
    /// Delete contents
    Rm {
        #[arg(required = true)]
        content_ids: Vec<String>,
    },
    /// Copy contents into a folder
    Cp {
        #[arg(required = true)]
        content_ids: Vec<String>,
        /// Destination folder id
        #[arg(long)]
        to: String,
    },
    /// Create a folder
    Mkdir {
        name: String,
        /// Parent folder id; defaults to the account's root folder
        #[arg(long)]
        parent: Option<String>,
    },
    /// Set a content option (name, directLink, public, password, description, tags, expiry)
    Set {
        content_id: String,
        key: String,
        value: String,
        /// Skip reloading the content afterwards
        #[arg(long)]
        no_reload: bool,
    },
    /// Create a direct link for a file (premium)
    Link {
        content_id: String,
        /// Expiry as epoch seconds
        #[arg(long)]
        expire: Option<i64>,
        /// Allowed source IP (repeatable)
        #[arg(long = "ip")]
        ips: Vec<String>,
        /// Allowed referring domain (repeatable)
        #[arg(long = "domain")]
        domains: Vec<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the account for the token
    Account,
    /// Download a URL to a local path
    Download {
        url: String,
        #[arg(default_value = ".")]
        dest: PathBuf,
    },
}

impl Cli {
    /// Client configuration from the global flags
    pub fn client_config(&self) -> Config {
        let mut config = Config::new(&self.api_url).with_timeout(Duration::from_secs(self.timeout));
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        if let Some(zone) = &self.zone {
            config = config.with_zone(zone);
        }
        if self.strict_zone {
            config = config.strict_zone();
        }
        if self.strict_reload {
            config = config.with_missing_child_policy(MissingChildPolicy::Error);
        }
        config
    }
}

/// Execute `command` against `client`
pub async fn run(client: &GofileClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Upload { path, folder } => {
            let file = client
                .upload(UploadSource::path(&path), folder.as_deref(), None)
                .await
                .with_context(|| format!("uploading {}", path.display()))?;
            print_json(&file)
        }
        Command::Get { content_id } => {
            let content = client.get(&content_id, None).await?;
            print_json(&content)
        }
        Command::Rm { content_ids } => {
            let ids: Vec<&str> = content_ids.iter().map(String::as_str).collect();
            client.delete(&ids, None).await?;
            tracing::info!("Deleted {} content(s)", ids.len());
            Ok(())
        }
        Command::Cp { content_ids, to } => {
            let ids: Vec<&str> = content_ids.iter().map(String::as_str).collect();
            client.copy_content(&ids, &to, None).await?;
            tracing::info!("Copied {} content(s) into {}", ids.len(), to);
            Ok(())
        }
        Command::Mkdir { name, parent } => {
            let parent = match parent {
                Some(parent) => parent,
                None => match client.account().and_then(|a| a.root_id.clone()) {
                    Some(root) => root,
                    None => bail!("--parent is required without an account token"),
                },
            };
            let folder = client.create_folder(&name, &parent, None).await?;
            print_json(&folder)
        }
        Command::Set {
            content_id,
            key,
            value,
            no_reload,
        } => {
            let value = parse_option(&key, &value)?;
            client.set_content_option(&content_id, &key, value, None).await?;
            tracing::info!("Set {} on {}", key, content_id);
            if no_reload {
                return Ok(());
            }
            let content = client.get(&content_id, None).await?;
            print_json(&content)
        }
        Command::Link {
            content_id,
            expire,
            ips,
            domains,
            username,
            password,
        } => {
            let options = DirectLinkOptions {
                expire,
                ips_allowed: ips,
                domains_allowed: domains,
                username,
                password,
            };
            let link = client
                .create_file_direct_link(&content_id, &options, None)
                .await?;
            print_json(&link)
        }
        Command::Account => match client.account() {
            Some(account) => print_json(account),
            None => bail!("no account token configured (set --token or GOFILE_TOKEN)"),
        },
        Command::Download { url, dest } => {
            let written = client.download(&url, &dest).await?;
            println!("{}", written.display());
            Ok(())
        }
    }
}

/// Parse a raw command-line value for option `key`
pub fn parse_option(key: &str, raw: &str) -> anyhow::Result<options::OptionValue> {
    let spec = options::lookup(key)?;
    Ok(spec.parse_value(raw)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofile_client::OptionValue;
    use rstest::rstest;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from(["gofile", "upload", "cat.jpg", "--folder", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Upload {
                path: PathBuf::from("cat.jpg"),
                folder: Some("abc".to_string())
            }
        );
    }

    #[test]
    fn test_ls_alias() {
        let cli = Cli::try_parse_from(["gofile", "ls", "root-id"]).unwrap();
        assert_eq!(cli.command, Command::Get { content_id: "root-id".to_string() });
    }

    #[test]
    fn test_rm_requires_ids() {
        assert!(Cli::try_parse_from(["gofile", "rm"]).is_err());
    }

    #[test]
    fn test_cp_requires_destination() {
        assert!(Cli::try_parse_from(["gofile", "cp", "a", "b"]).is_err());
    }

    #[test]
    fn test_global_flags_build_config() {
        let cli = Cli::try_parse_from([
            "gofile", "account", "--token", "tok", "--zone", "eu", "--strict-zone",
            "--strict-reload", "--api-url", "http://localhost:1234",
        ])
        .unwrap();
        let config = cli.client_config();

        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.zone.as_deref(), Some("eu"));
        assert!(config.strict_zone);
        assert_eq!(config.missing_child_policy, MissingChildPolicy::Error);
        assert_eq!(config.api_url, "http://localhost:1234");
    }

    #[rstest]
    #[case("public", "true", OptionValue::Bool(true))]
    #[case("directLink", "false", OptionValue::Bool(false))]
    #[case("description", "holiday", OptionValue::Str("holiday".to_string()))]
    #[case("tags", "a,b", OptionValue::List(vec!["a".to_string(), "b".to_string()]))]
    #[case("expiry", "1700000000", OptionValue::Int(1700000000))]
    fn test_parse_option(#[case] key: &str, #[case] raw: &str, #[case] expected: OptionValue) {
        assert_eq!(parse_option(key, raw).unwrap(), expected);
    }

    #[rstest]
    #[case("colour", "red")]
    #[case("public", "maybe")]
    fn test_parse_option_rejects(#[case] key: &str, #[case] raw: &str) {
        assert!(parse_option(key, raw).is_err());
    }
}
