//! Wire models for MOVEit folders and files.

use serde::Deserialize;

/// Folder classification reported by the API (`folderType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum FolderType {
    /// The unique starting point of the folder hierarchy.
    Root,
    /// Regular folder.
    #[default]
    Normal,
    /// Any type this library does not act on.
    #[serde(other)]
    Other,
}

impl FolderType {
    pub fn is_root(&self) -> bool {
        matches!(self, FolderType::Root)
    }
}

/// A folder entry as returned by the listing endpoints.
///
/// Transient: fetched fresh on every query, never cached across calls. The
/// parent relationship only exists through the containment endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderNode {
    pub id: u64,
    pub name: String,
    #[serde(rename = "folderType", default)]
    pub folder_type: FolderType,
}

/// A file entry within a folder listing. Same lifecycle as [`FolderNode`].
#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    pub id: u64,
    pub name: String,
}

/// Paginated response envelope used by every listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsPage<T> {
    // `default = "Vec::new"` keeps the derive from demanding `T: Default`.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_deserialization() {
        let folder: FolderNode =
            serde_json::from_str(r#"{"id": 42, "name": "reports", "folderType": "Normal"}"#)
                .unwrap();
        assert_eq!(folder.id, 42);
        assert_eq!(folder.name, "reports");
        assert_eq!(folder.folder_type, FolderType::Normal);
        assert!(!folder.folder_type.is_root());
    }

    #[test]
    fn test_root_folder_type() {
        let folder: FolderNode =
            serde_json::from_str(r#"{"id": 1, "name": "/", "folderType": "Root"}"#).unwrap();
        assert!(folder.folder_type.is_root());
    }

    #[test]
    fn test_unknown_folder_type_tolerated() {
        let folder: FolderNode =
            serde_json::from_str(r#"{"id": 7, "name": "archive", "folderType": "Recycle"}"#)
                .unwrap();
        assert_eq!(folder.folder_type, FolderType::Other);
    }

    #[test]
    fn test_missing_folder_type_defaults_to_normal() {
        let folder: FolderNode =
            serde_json::from_str(r#"{"id": 7, "name": "inbox"}"#).unwrap();
        assert_eq!(folder.folder_type, FolderType::Normal);
    }

    #[test]
    fn test_items_page() {
        let page: ItemsPage<FileRecord> = serde_json::from_str(
            r#"{"items": [{"id": 5, "name": "a.csv"}, {"id": 6, "name": "b.csv"}]}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].name, "b.csv");

        // A payload without "items" reads as an empty page.
        let empty: ItemsPage<FileRecord> = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());
    }
}
