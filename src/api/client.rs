//! MOVEit REST API client with token handling and bounded 401 retry.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::MoveitConfig;
use crate::error::{MoveitError, Result};
use crate::fs::node::{FileRecord, FolderNode, ItemsPage};
use crate::http::{ApiRequest, ApiResponse, RequestBody, ReqwestTransport, Transport};

/// Authenticated MOVEit REST API client.
///
/// Owns the bearer token and injects it into every call. A 401 triggers one
/// re-authentication and one replay of the original request; a second 401 is
/// a terminal [`MoveitError::AuthenticationFailed`]. All other non-success
/// statuses are reported to the caller without retry.
///
/// Methods take `&mut self` because the token is mutated in place; the
/// client is meant for single-owner use.
pub struct ApiClient {
    pub(crate) config: MoveitConfig,
    transport: Box<dyn Transport>,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client over HTTPS and perform the token exchange eagerly.
    ///
    /// Any authentication failure here is terminal: the constructor fails
    /// and no client exists to issue further calls.
    pub async fn connect(config: MoveitConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        let mut client = Self {
            config,
            transport: Box::new(transport),
            token: None,
        };
        client.authorize().await?;
        Ok(client)
    }

    /// Build a client over an injected transport. Authorization happens
    /// lazily on the first call.
    pub fn with_transport(config: MoveitConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            token: None,
        }
    }

    /// Current bearer token, if one has been acquired.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchange the configured credentials for a fresh bearer token.
    async fn authorize(&mut self) -> Result<()> {
        debug!("requesting access token");
        let form = vec![
            ("grant_type".to_string(), "password".to_string()),
            ("username".to_string(), self.config.username.clone()),
            ("password".to_string(), self.config.password.clone()),
        ];
        let request = ApiRequest::post(self.config.endpoint("token"), RequestBody::Form(form));
        let response = self.transport.execute(request).await?;
        if response.status != 200 {
            error!(status = response.status, "token request failed");
            return Err(MoveitError::AuthenticationFailed(format!(
                "token endpoint returned {}: {}",
                response.status, response.body
            )));
        }
        let payload: Value = serde_json::from_str(&response.body)?;
        match payload.get("access_token").and_then(|v| v.as_str()) {
            Some(token) if !token.is_empty() => {
                info!("access token acquired");
                self.token = Some(token.to_string());
                Ok(())
            }
            _ => Err(MoveitError::AuthenticationFailed(
                "no access token in the token response".to_string(),
            )),
        }
    }

    /// Issue a request with bearer injection and a single re-auth on 401.
    async fn send_authed(&mut self, request: ApiRequest) -> Result<ApiResponse> {
        if self.token.is_none() {
            self.authorize().await?;
        }
        let replay = request.clone();
        let mut request = request;
        request.bearer = self.token.clone();
        let response = self.transport.execute(request).await?;
        if response.status != 401 {
            return Ok(response);
        }

        warn!("401 from API, re-authenticating");
        self.authorize().await?;
        let mut replay = replay;
        replay.bearer = self.token.clone();
        let response = self.transport.execute(replay).await?;
        if response.status == 401 {
            return Err(MoveitError::AuthenticationFailed(
                "still unauthorized after re-authentication".to_string(),
            ));
        }
        Ok(response)
    }

    /// GET a URL and deserialize a 200 response body.
    async fn get_json<T: DeserializeOwned>(&mut self, url: String) -> Result<T> {
        let response = self.send_authed(ApiRequest::get(url)).await?;
        if response.status != 200 {
            error!(status = response.status, "HTTP GET error");
            return Err(MoveitError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET one page of a paginated listing endpoint.
    async fn get_items<T: DeserializeOwned>(
        &mut self,
        entity_path: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<T>> {
        let mut url = self.config.endpoint(entity_path);
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(format!("page={page}"));
        }
        if let Some(per_page) = per_page {
            query.push(format!("perPage={per_page}"));
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        let page: ItemsPage<T> = self.get_json(url).await?;
        Ok(page.items)
    }

    /// Fetch a single folder by id.
    pub async fn get_folder(&mut self, folder_id: u64) -> Result<FolderNode> {
        let url = self.config.endpoint(&format!("folders/{folder_id}"));
        self.get_json(url).await
    }

    /// List one page of all folders visible to the user.
    pub async fn get_folders(
        &mut self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<FolderNode>> {
        self.get_items("folders", page, per_page).await
    }

    /// List one page of a folder's direct subfolders.
    pub async fn get_subfolders(
        &mut self,
        folder_id: u64,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<FolderNode>> {
        let path = format!("folders/{folder_id}/subfolders");
        self.get_items(&path, page, per_page).await
    }

    /// List one page of a folder's files.
    pub async fn get_files(
        &mut self,
        folder_id: u64,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<FileRecord>> {
        let path = format!("folders/{folder_id}/files");
        self.get_items(&path, page, per_page).await
    }

    /// Create a subfolder under `parent_id` and return the created node.
    ///
    /// Permissions are not inherited, matching the web UI default for
    /// automation-created folders.
    pub async fn add_folder(&mut self, parent_id: u64, name: &str) -> Result<FolderNode> {
        let url = self.config.endpoint(&format!("folders/{parent_id}/subfolders"));
        let body = serde_json::json!({
            "inheritPermissions": "None",
            "name": name,
        });
        let response = self
            .send_authed(ApiRequest::post(url, RequestBody::Json(body)))
            .await?;
        if response.status != 201 {
            error!(status = response.status, name, "folder creation failed");
            return Err(MoveitError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        info!(name, "folder created");
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Upload a local file into the folder `parent_id`.
    pub async fn add_file(&mut self, parent_id: u64, local_path: impl AsRef<Path>) -> Result<()> {
        let local_path = local_path.as_ref();
        let bytes = tokio::fs::read(local_path).await?;
        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                MoveitError::Custom(format!("invalid file name: {}", local_path.display()))
            })?
            .to_string();
        let url = self.config.endpoint(&format!("folders/{parent_id}/files"));
        let upload = RequestBody::FileUpload {
            field: "file".to_string(),
            file_name,
            bytes,
        };
        let response = self.send_authed(ApiRequest::post(url, upload)).await?;
        if response.status != 201 {
            error!(status = response.status, "file upload failed");
            return Err(MoveitError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        info!(path = %local_path.display(), "file uploaded");
        Ok(())
    }
}
