//! # Gofile Client SDK
//!
//! A client SDK for the Gofile file-hosting REST API.
//!
//! ## Features
//!
//! - **Content model**: files, folders and lazily-resolved references that
//!   are re-typed in place on reload
//! - **Option validation**: folder and file options checked and formatted
//!   before anything is sent
//! - **Direct links**: restricted, time-boxed download URLs (premium)
//! - **Streaming downloads** to a local path
//!
//! ## Example
//!
//! ```rust,ignore
//! use gofile_client::{Config, GofileClient, UploadSource, options::folder_option};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GofileClient::new(Config::default().with_token("your-token")).await?;
//!     let root = client.account().and_then(|a| a.root_id.clone()).unwrap();
//!
//!     // Create a folder and upload into it
//!     let folder = client.create_folder("photos", &root, None).await?;
//!     let file = folder.upload(&client, UploadSource::path("cat.jpg")).await?;
//!     println!("Uploaded {:?} -> {:?}", file.name, file.page_link);
//!
//!     // Make the folder public
//!     let mut folder = gofile_client::Content::from(folder);
//!     folder.set_option(&client, folder_option::IS_PUBLIC, true, true).await?;
//!
//!     Ok(())
//! }
//! ```

mod account;
mod client;
mod config;
mod content;
pub mod envelope;
mod error;
pub mod options;
mod types;

pub use account::{Account, AccountPayload, AccountStats, Tier};
pub use client::GofileClient;
pub use config::{Config, MissingChildPolicy};
pub use content::{Content, ContentKind, File, Folder, UnknownContent};
pub use error::{ClientError, Result};
pub use options::{OptionNamespace, OptionValue};
pub use types::*;
