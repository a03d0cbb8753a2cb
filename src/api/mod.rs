use std::time::Duration;

use log::debug;
use reqwest::header;
use thiserror::Error;

use crate::model::{PaintInput, RawPaint};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

/// Thin client for the remote paint resource.
///
/// Callers await each call before issuing the next, so at most one request is
/// in flight at a time. There is no retry and no cancellation path: a call
/// settles as `Ok` or as one terminal `ApiError`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&endpoint).is_err() {
            return Err(ApiError::InvalidEndpoint { url: endpoint });
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ApiError::ClientBuild { source: e })?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport { source: e })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        Ok(resp)
    }

    /// GET the whole collection as raw, untrusted records.
    pub async fn fetch_all(&self) -> Result<Vec<RawPaint>, ApiError> {
        debug!("GET {}", self.endpoint);
        let resp = self.execute(self.http.get(&self.endpoint)).await?;
        resp.json::<Vec<RawPaint>>()
            .await
            .map_err(|e| ApiError::Decode { source: e })
    }

    /// POST a new record; the remote assigns the id and echoes the record.
    pub async fn create(&self, input: &PaintInput) -> Result<RawPaint, ApiError> {
        debug!("POST {}", self.endpoint);
        let resp = self
            .execute(self.http.post(&self.endpoint).json(input))
            .await?;
        resp.json::<RawPaint>()
            .await
            .map_err(|e| ApiError::Decode { source: e })
    }

    /// PUT a full replacement of the four mutable fields, keyed by id.
    pub async fn update(&self, id: u64, input: &PaintInput) -> Result<RawPaint, ApiError> {
        let url = self.item_url(id);
        debug!("PUT {url}");
        let resp = self.execute(self.http.put(&url).json(input)).await?;
        resp.json::<RawPaint>()
            .await
            .map_err(|e| ApiError::Decode { source: e })
    }

    /// DELETE by id. Success carries no payload; `Ok(())` is the marker.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        self.execute(self.http.delete(&url)).await?;
        Ok(())
    }
}
