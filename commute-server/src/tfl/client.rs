//! TfL Unified API HTTP client.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::domain::{LineStatus, LiveArrival};
use crate::external::{FetchError, FetchKind};

use super::convert::{convert_arrival, convert_line_status};
use super::types::{ArrivalPrediction, LineStatusItem};

/// Default base URL for the TfL Unified API.
pub const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// TfL rejects some requests without a browser-like user agent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TflConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl TflConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::from_reqwest(FetchKind::LiveArrivals, e))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Predicted arrivals at a stop point, in upstream order.
    pub async fn arrivals(&self, stop_id: &str) -> Result<Vec<LiveArrival>, FetchError> {
        let url = arrivals_url(&self.base_url, stop_id)?;
        let predictions: Vec<ArrivalPrediction> =
            self.get_json(FetchKind::LiveArrivals, url.as_str()).await?;

        Ok(predictions.iter().map(convert_arrival).collect())
    }

    /// Current status of every tube line.
    pub async fn line_status(&self) -> Result<Vec<LineStatus>, FetchError> {
        let url = format!("{}/Line/Mode/tube/Status", self.base_url);
        let lines: Vec<LineStatusItem> = self.get_json(FetchKind::LineStatus, &url).await?;

        Ok(lines.iter().map(convert_line_status).collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        kind: FetchKind,
        url: &str,
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(kind, e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::status(kind, status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(kind, e))?;

        serde_json::from_str(&body).map_err(|e| FetchError::malformed(kind, &e, &body))
    }
}

/// `{base}/StopPoint/{stop_id}/Arrivals`, with `stop_id` percent-encoded
/// as a single path segment.
fn arrivals_url(base_url: &str, stop_id: &str) -> Result<Url, FetchError> {
    let kind = FetchKind::LiveArrivals;
    let invalid_base = |message: String| FetchError::Transport { kind, message };

    let mut url = Url::parse(base_url)
        .map_err(|e| invalid_base(format!("invalid base URL {base_url:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| invalid_base(format!("base URL {base_url:?} cannot have a path")))?
        .pop_if_empty()
        .extend(["StopPoint", stop_id, "Arrivals"]);

    Ok(url)
}
