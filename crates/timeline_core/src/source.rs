//! The fetch collaborator: where raw timeline payloads come from.

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Year, protocol::TimelineResponse};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::FetchError};

#[async_trait]
pub trait TimelineSource: Send + Sync {
    async fn fetch_timeline(&self) -> Result<TimelineResponse, FetchError>;
}

/// Source used when no API base is configured; every fetch fails the same way.
pub struct UnconfiguredSource;

#[async_trait]
impl TimelineSource for UnconfiguredSource {
    async fn fetch_timeline(&self) -> Result<TimelineResponse, FetchError> {
        Err(FetchError::Unconfigured)
    }
}

pub struct HttpTimelineSource {
    http: Client,
    base_url: Url,
}

impl HttpTimelineSource {
    pub fn new(settings: &ClientSettings) -> Result<Self, FetchError> {
        let base_url = settings.api_base()?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(FetchError::from)?;
        Ok(Self { http, base_url })
    }

    fn timeline_url(&self) -> String {
        format!("{}/timeline", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Server-side filtered variant of [`TimelineSource::fetch_timeline`].
    pub async fn fetch_timeline_for_year(&self, year: Year) -> Result<TimelineResponse, FetchError> {
        self.get(Some(year)).await
    }

    async fn get(&self, year: Option<Year>) -> Result<TimelineResponse, FetchError> {
        let url = self.timeline_url();
        debug!(%url, ?year, "fetching timeline");

        let mut request = self.http.get(&url);
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }
        let res = request.send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        let response: TimelineResponse = serde_json::from_slice(&body)?;
        debug!(items = response.items.len(), "timeline payload received");
        Ok(response)
    }
}

#[async_trait]
impl TimelineSource for HttpTimelineSource {
    async fn fetch_timeline(&self) -> Result<TimelineResponse, FetchError> {
        self.get(None).await
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
