//! Folder-path resolution over the paginated remote hierarchy.
//!
//! A "/"-delimited logical path is walked one segment at a time: each step
//! lists the current folder's direct subfolders page by page and descends
//! into the first exact name match. Nothing is cached; every resolution
//! sees the live hierarchy.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::fs::node::FolderNode;

impl ApiClient {
    /// Find the root folder id by scanning the full folder listing for the
    /// unique node of type `Root`. `Ok(None)` when no Root entry exists.
    pub async fn root_folder_id(&mut self) -> Result<Option<u64>> {
        let per_page = self.config.per_page;
        let mut page = 1u32;
        loop {
            let folders = self.get_folders(Some(page), Some(per_page)).await?;
            let last_page = folders.len() < per_page as usize;
            if let Some(root) = folders.iter().find(|f| f.folder_type.is_root()) {
                return Ok(Some(root.id));
            }
            if last_page {
                debug!("no root folder in the folder listing");
                return Ok(None);
            }
            page += 1;
        }
    }

    /// First direct subfolder of `folder_id` whose name equals `name`
    /// exactly (case-sensitive). Pages through the whole listing before
    /// concluding absence.
    pub async fn find_subfolder(&mut self, folder_id: u64, name: &str) -> Result<Option<FolderNode>> {
        let per_page = self.config.per_page;
        let mut page = 1u32;
        loop {
            let subfolders = self.get_subfolders(folder_id, Some(page), Some(per_page)).await?;
            let last_page = subfolders.len() < per_page as usize;
            if let Some(found) = subfolders.into_iter().find(|f| f.name == name) {
                return Ok(Some(found));
            }
            if last_page {
                return Ok(None);
            }
            page += 1;
        }
    }

    /// First file in `folder_id` whose name equals `name` exactly.
    pub async fn find_file(&mut self, folder_id: u64, name: &str) -> Result<Option<u64>> {
        let per_page = self.config.per_page;
        let mut page = 1u32;
        loop {
            let files = self.get_files(folder_id, Some(page), Some(per_page)).await?;
            let last_page = files.len() < per_page as usize;
            if let Some(found) = files.into_iter().find(|f| f.name == name) {
                return Ok(Some(found.id));
            }
            if last_page {
                debug!(folder_id, name, "no file match");
                return Ok(None);
            }
            page += 1;
        }
    }

    /// Resolve a "/"-delimited folder path to its numeric id, starting at
    /// the root folder. `Ok(None)` when the root is missing or any segment
    /// has no match.
    ///
    /// # Example
    /// ```no_run
    /// # use moveitlib::{ApiClient, MoveitConfig};
    /// # async fn example() -> moveitlib::Result<()> {
    /// let config = MoveitConfig::new("https://host/api/v1", "user", "secret");
    /// let mut api = ApiClient::connect(config).await?;
    /// if let Some(id) = api.resolve_folder("/Home/reports/2024").await? {
    ///     println!("folder id: {id}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn resolve_folder(&mut self, path: &str) -> Result<Option<u64>> {
        let Some(root_id) = self.root_folder_id().await? else {
            return Ok(None);
        };
        self.resolve_folder_from(root_id, path).await
    }

    /// Resolve a path relative to an explicit starting folder.
    ///
    /// Empty segments are skipped, so an empty path (or one reducible to
    /// empty, like "/" or "//") resolves to `start_id` itself. Resolution
    /// stops at the first segment with no match; no further remote calls
    /// are made past it.
    pub async fn resolve_folder_from(&mut self, start_id: u64, path: &str) -> Result<Option<u64>> {
        let mut current = start_id;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match self.find_subfolder(current, segment).await? {
                Some(folder) => current = folder.id,
                None => {
                    debug!(segment, "no subfolder match, giving up");
                    return Ok(None);
                }
            }
        }
        Ok(Some(current))
    }

    /// Whether `file_name` exists in the folder at `folder_path`.
    pub async fn file_exists(&mut self, folder_path: &str, file_name: &str) -> Result<bool> {
        let Some(folder_id) = self.resolve_folder(folder_path).await? else {
            return Ok(false);
        };
        Ok(self.find_file(folder_id, file_name).await?.is_some())
    }
}
