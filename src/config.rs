//! Client configuration.

use std::time::Duration;

/// Configuration shared by the API, browser, and database clients.
///
/// An explicit value handed to each constructor, so independent clients (and
/// tests) can run side by side without process-wide state.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use moveitlib::MoveitConfig;
///
/// let config = MoveitConfig::new("https://moveit.example.com/api/v1", "user", "secret")
///     .with_request_timeout(Duration::from_secs(10))
///     .danger_accept_invalid_certs(true);
/// ```
#[derive(Debug, Clone)]
pub struct MoveitConfig {
    /// Base URL of the REST API (or of the site for browser flows),
    /// without a trailing slash.
    pub base_url: String,
    /// Login used for the password grant and the login form.
    pub username: String,
    /// Password used for the password grant and the login form.
    pub password: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// Skip TLS certificate verification. Off by default; MOVEit DMZ hosts
    /// with self-signed certificates need this turned on explicitly.
    pub accept_invalid_certs: bool,
    /// Page size requested from the paginated listing endpoints.
    pub per_page: u32,
}

impl MoveitConfig {
    /// Default page size for listing endpoints.
    pub const DEFAULT_PER_PAGE: u32 = 100;

    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a configuration with default timeout, page size, and TLS
    /// verification enabled.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            username: username.into(),
            password: password.into(),
            request_timeout: Self::DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Opt in to (or back out of) accepting invalid TLS certificates.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the page size used by listing endpoints.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Build a full URL for an API path relative to the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MoveitConfig::new("https://host/api/v1", "u", "p");
        assert_eq!(config.per_page, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = MoveitConfig::new("https://host/api/v1/", "u", "p");
        assert_eq!(config.base_url, "https://host/api/v1");
        assert_eq!(config.endpoint("token"), "https://host/api/v1/token");
    }

    #[test]
    fn test_builder_options() {
        let config = MoveitConfig::new("https://host", "u", "p")
            .with_request_timeout(Duration::from_secs(5))
            .danger_accept_invalid_certs(true)
            .with_per_page(25);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.accept_invalid_certs);
        assert_eq!(config.per_page, 25);
    }
}
