//! Remote folder/file models and path resolution.

pub(crate) mod node;
mod resolve;

pub use node::{FileRecord, FolderNode, FolderType, ItemsPage};
