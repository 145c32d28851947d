//! WebDriver-driven flows for the MOVEit web UI.
//!
//! Login and ad-hoc downloads are only exposed through the web application,
//! so this client drives a real browser session instead of the REST API.
//! There is no logic here beyond fixed element ids and settle pauses; the
//! web application is an external collaborator.

use std::time::Duration;

use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::MoveitConfig;
use crate::error::Result;

/// Pause between interstitial interactions, matching the page's settle time.
const SETTLE: Duration = Duration::from_secs(1);

/// Browser session against the MOVEit web application.
pub struct MoveitBrowser {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl MoveitBrowser {
    /// Start a WebDriver session against `webdriver_url` (e.g. a local
    /// chromedriver on `http://localhost:9515`).
    pub async fn connect(webdriver_url: &str, config: &MoveitConfig) -> Result<Self> {
        let mut caps = serde_json::map::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "prefs": {
                    "safebrowsing.enabled": true,
                    "profile.default_content_settings.popups": 0
                }
            }),
        );
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;
        debug!(webdriver_url, "webdriver session established");
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Open the site and click through the certificate interstitial that
    /// self-signed DMZ hosts trigger.
    pub async fn open_site(&self) -> Result<()> {
        self.client.goto(&self.base_url).await?;
        sleep(SETTLE).await;
        self.click("details-button").await?;
        sleep(SETTLE).await;
        self.click("proceed-link").await?;
        sleep(SETTLE).await;
        Ok(())
    }

    /// Submit the login form with the configured credentials.
    pub async fn login(&self) -> Result<()> {
        self.fill("form_username", &self.username).await?;
        self.fill("form_password", &self.password).await?;
        self.click("submit_button").await?;
        info!("login form submitted");
        Ok(())
    }

    /// Navigate straight to the download URL for a file id. The browser
    /// handles the transfer; the original filename is kept.
    pub async fn download_file(&self, file_id: u64) -> Result<()> {
        let url = download_url(&self.base_url, file_id);
        info!(file_id, "starting browser download");
        self.client.goto(&url).await?;
        Ok(())
    }

    /// End the WebDriver session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }

    async fn click(&self, element_id: &str) -> Result<()> {
        let element = self.client.find(Locator::Id(element_id)).await?;
        element.click().await?;
        Ok(())
    }

    async fn fill(&self, element_id: &str, text: &str) -> Result<()> {
        let element = self.client.find(Locator::Id(element_id)).await?;
        element.send_keys(text).await?;
        Ok(())
    }
}

/// Download URL template used by the MOVEit web application.
fn download_url(base_url: &str, file_id: u64) -> String {
    format!(
        "{base_url}/MOVEitDownload/arg01={file_id}!arg02=31!arg03=[OriginalFilename]!arg04=0!arg05=0/"
    )
}
