//! HTTP transport layer for MOVEit API requests.
//!
//! The [`Transport`] trait is the seam between the API client and the wire:
//! production code uses [`ReqwestTransport`], tests script responses through
//! an in-memory fake.

use async_trait::async_trait;

use crate::config::MoveitConfig;
use crate::error::Result;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Body of an outbound request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
    /// `application/json` payload.
    Json(serde_json::Value),
    /// Single-part `multipart/form-data` file upload.
    FileUpload {
        field: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// An outbound API request, kept cloneable so a 401 can be replayed.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token, injected by the API client before dispatch.
    pub bearer: Option<String>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: String, body: RequestBody) -> Self {
        Self {
            method: Method::Post,
            url,
            bearer: None,
            body: Some(body),
        }
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Performs a single HTTP exchange. Implementations return `Ok` for any
/// completed exchange regardless of status code; `Err` means the request
/// never produced a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        (**self).execute(request).await
    }
}

/// reqwest-backed transport used outside of tests.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeout and TLS policy.
    ///
    /// Redirects are not followed; MOVEit uses them to hand off downloads
    /// and the API client wants to see the original status.
    pub fn new(config: &MoveitConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        builder = builder.header("accept", "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        match request.body {
            None => {}
            Some(RequestBody::Form(fields)) => builder = builder.form(&fields),
            Some(RequestBody::Json(value)) => builder = builder.json(&value),
            Some(RequestBody::FileUpload {
                field,
                file_name,
                bytes,
            }) => {
                let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                let form = reqwest::multipart::Form::new().part(field, part);
                builder = builder.multipart(form);
            }
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for exercising the API client without a server.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ApiRequest, ApiResponse, Transport};
    use crate::error::{MoveitError, Result};

    /// Replays a fixed sequence of responses and records every request.
    pub(crate) struct FakeTransport {
        responses: Mutex<VecDeque<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        pub(crate) fn new(responses: Vec<(u16, &str)>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| ApiResponse {
                            status,
                            body: body.to_string(),
                        })
                        .collect(),
                ),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| MoveitError::Custom("no scripted response left".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let config = MoveitConfig::new("https://host/api/v1", "u", "p");
        assert!(ReqwestTransport::new(&config).is_ok());

        let lax = config.clone().danger_accept_invalid_certs(true);
        assert!(ReqwestTransport::new(&lax).is_ok());
    }

    #[test]
    fn test_request_constructors() {
        let get = ApiRequest::get("https://host/api/v1/folders".to_string());
        assert_eq!(get.method, Method::Get);
        assert!(get.bearer.is_none());
        assert!(get.body.is_none());

        let post = ApiRequest::post(
            "https://host/api/v1/token".to_string(),
            RequestBody::Form(vec![("grant_type".to_string(), "password".to_string())]),
        );
        assert_eq!(post.method, Method::Post);
        assert!(matches!(post.body, Some(RequestBody::Form(_))));
    }
}
