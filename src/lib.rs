//! # moveitlib
//!
//! Rust client library for automating MOVEit Transfer deployments.
//!
//! ## Features
//!
//! - **REST API client**: password-grant token authentication with a single
//!   bounded re-authentication on 401, folder/file listing and creation,
//!   multipart file uploads.
//! - **Folder-path resolution**: walk "/"-delimited logical paths over the
//!   paginated folder hierarchy down to a numeric folder id.
//! - **Direct database lookups**: parameterized folder/file id queries
//!   against the backing store, for deployments where the DMZ database is
//!   reachable.
//! - **Browser flows**: WebDriver-driven login and downloads for the parts
//!   of MOVEit that are only exposed through the web UI.
//!
//! Lookups distinguish absence from failure: "not found" is `Ok(None)`,
//! failures are `Err(MoveitError)`. Folder id 0 carries no special meaning.
//!
//! ## Example
//!
//! ```no_run
//! use moveitlib::{ApiClient, MoveitConfig};
//!
//! # async fn example() -> moveitlib::Result<()> {
//! let config = MoveitConfig::new("https://moveit.example.com/api/v1", "user", "secret");
//! let mut api = ApiClient::connect(config).await?;
//!
//! if let Some(folder_id) = api.resolve_folder("Home/reports/2024").await? {
//!     api.add_file(folder_id, "report.csv").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod browser;
pub mod config;
pub mod db;
pub mod error;
pub mod fs;
pub mod http;

// Re-export commonly used types
pub use api::ApiClient;
pub use browser::MoveitBrowser;
pub use config::MoveitConfig;
pub use db::MoveitDb;
pub use error::{MoveitError, Result};
pub use fs::{FileRecord, FolderNode, FolderType};
