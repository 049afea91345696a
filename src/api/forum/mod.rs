use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, USER_AGENT};
use url::Url;

use crate::utils::errors::PartyPlannerError;

pub const FORUM_URL_PROD: &str = "https://mariopartylegacy.com/forum/";
pub const FILENAME_NOT_FOUND: &str = "Filename not found";

const CLIENT_USER_AGENT: &str = concat!("party-planner-api/", env!("CARGO_PKG_VERSION"));
// Most downloaded first, so the listing doubles as a leaderboard.
const LISTING_ORDER: &str = "download_count";

/// HTTP access to the downloads section of the forum.
///
/// Holds no per-request state; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ForumClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ForumClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(FORUM_URL_PROD)
    }

    /// Creates a client rooted at another forum URL (a local fake forum in tests).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|_| anyhow!(PartyPlannerError::InvalidUrl(base_url.to_string())))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| anyhow!(PartyPlannerError::InvalidUrl(path.to_string())))
    }

    /// GETs a page and returns its body, failing on any non-success status.
    pub async fn get_page(&self, url: Url) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!(PartyPlannerError::UpstreamStatus {
                url: url.to_string(),
                status: response.status(),
            }));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read page body from {}", url))
    }

    pub async fn history_page(&self, project_id: u32) -> Result<String> {
        let url = self.url(&format!("downloads/{}/history", project_id))?;
        self.get_page(url).await
    }

    pub async fn project_page(&self, project_id: u32) -> Result<String> {
        let url = self.url(&format!("downloads/{}/", project_id))?;
        self.get_page(url).await
    }

    pub async fn search_page(&self, term: &str) -> Result<String> {
        let mut url = self.url("search/search")?;
        url.query_pairs_mut()
            .append_pair("keywords", term)
            .append_pair("t", "resource");
        self.get_page(url).await
    }

    /// One page of the downloads listing, numbered from 1.
    pub async fn listing_page(&self, page: usize) -> Result<String> {
        let mut url = self.url("downloads/")?;
        url.query_pairs_mut()
            .append_pair("order", LISTING_ORDER)
            .append_pair("page", &page.to_string());
        self.get_page(url).await
    }

    /// Asks the forum what a download link would be saved as.
    ///
    /// Never fails: a missing header or any request error gives
    /// [`FILENAME_NOT_FOUND`].
    pub async fn file_name(&self, link: &str) -> String {
        match self.client.head(link).send().await {
            Ok(response) => response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok())
                .map(filename_from_disposition)
                .unwrap_or_else(|| FILENAME_NOT_FOUND.to_string()),
            Err(err) => {
                warn!("HEAD {} failed: {}", link, err);
                FILENAME_NOT_FOUND.to_string()
            }
        }
    }

    /// Plain GET of an arbitrary URL, status left for the caller to inspect.
    pub async fn fetch_raw(&self, url: &str) -> Result<reqwest::Response> {
        let url = Url::parse(url).map_err(|_| anyhow!(PartyPlannerError::InvalidUrl(url.to_string())))?;
        debug!("GET {} (pass-through)", url);

        self.client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))
    }
}

/// `attachment; filename="board.zip"` -> `board.zip`
pub fn filename_from_disposition(value: &str) -> String {
    value
        .rsplit("filename=")
        .next()
        .unwrap_or(value)
        .trim()
        .trim_matches('"')
        .to_string()
}
