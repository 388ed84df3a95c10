//! Basic usage example for the Gofile client
//!
//! This example demonstrates:
//! - Connecting with an account token
//! - Creating a folder and uploading into it
//! - Browsing a folder and resolving its children
//! - Setting folder options
//! - Cleaning up
//!
//! Run with: GOFILE_TOKEN=... cargo run --example basic_usage

use gofile_client::{Config, Content, GofileClient, UploadSource, options::folder_option};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚀 Gofile - Basic Usage Example\n");

    // Picks up GOFILE_TOKEN / GOFILE_ZONE / GOFILE_API_URL
    let config = Config::from_env();
    let client = GofileClient::new(config).await?;
    println!("🌐 Storage server: {}", client.server());

    let Some(account) = client.account() else {
        println!("⚠️  Set GOFILE_TOKEN to run this example");
        return Ok(());
    };
    println!("👤 Account {:?} (tier: {:?})", account.email, account.tier);
    let root_id = account
        .root_id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("account has no root folder"))?;

    // ==================== Folders & Uploads ====================

    println!("\n📁 Creating folder 'example-folder'...");
    let folder = client.create_folder("example-folder", &root_id, None).await?;
    println!("   ✅ Created {}", folder.content_id);

    println!("\n📤 Uploading 'hello.txt'...");
    let file = folder
        .upload(&client, UploadSource::bytes("hello.txt", "Hello from Rust!"))
        .await?;
    println!("   ✅ Uploaded {} ({:?})", file.content_id, file.page_link);

    // ==================== Browsing ====================

    println!("\n📋 Listing folder...");
    let mut content = Content::from(folder);
    content.reload(&client).await?;
    if let Some(folder) = content.as_folder_mut() {
        for child in folder.children.iter_mut() {
            // Resolve stubs the listing did not embed
            child.reload(&client).await?;
            println!("   - {}", child);
        }
    }

    // ==================== Options ====================

    println!("\n🔧 Updating folder options...");
    content
        .set_option(&client, folder_option::DESCRIPTION, "Created by the basic usage example", false)
        .await?;
    content
        .set_option(&client, folder_option::TAGS, vec!["example", "rust"], true)
        .await?;
    if let Some(folder) = content.as_folder() {
        println!("   ✅ description={:?} tags={:?}", folder.description, folder.tags);
    }

    // ==================== Cleanup ====================

    println!("\n🗑️  Deleting folder...");
    content.delete(&client).await?;
    println!("   ✅ Deleted: {}", content.is_deleted());

    println!("\n✨ Done!");
    Ok(())
}
