use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;
use trimmer_logging::{trimmer_debug, trimmer_info};
use url::Url;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Transport defaults: no timeouts, no size cap, ten redirects.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: Option<u64>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            redirect_limit: 10,
            max_bytes: None,
            user_agent: concat!("page_trimmer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a single GET and buffers the whole body.
    ///
    /// Resolves to `FailureKind::Cancelled` as soon as `cancel` fires, whether
    /// that happens before the request is sent or while the body is streaming.
    async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self { client, settings })
    }

    /// Uses a caller-built client. Only `max_bytes` is taken from `settings`;
    /// timeouts, redirects and the user agent belong to the client.
    pub fn with_client(client: reqwest::Client, settings: FetchSettings) -> Self {
        Self { client, settings }
    }

    async fn download(&self, url: Url) -> Result<FetchOutput, FetchError> {
        let original_url = url.to_string();
        trimmer_debug!("GET {}", original_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let (Some(max_bytes), Some(content_len)) =
            (self.settings.max_bytes, response.content_length())
        {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if let Some(max_bytes) = self.settings.max_bytes {
                if next_len > max_bytes {
                    return Err(too_large(max_bytes, next_len));
                }
            }
            bytes.extend_from_slice(&chunk);
        }

        trimmer_info!(
            "fetched {} bytes from {} (status {})",
            bytes.len(),
            final_url,
            status.as_u16()
        );

        let metadata = FetchMetadata {
            original_url,
            final_url,
            status: status.as_u16(),
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchOutput, FetchError> {
        let parsed = parse_target_url(url)?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                Err(FetchError::new(FailureKind::Cancelled, "fetch cancelled"))
            }
            result = self.download(parsed) => result,
        }
    }
}

/// Accepts only non-empty, absolute `http`/`https` URLs.
pub fn parse_target_url(url: &str) -> Result<Url, FetchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(FetchError::new(FailureKind::InvalidUrl, "url is empty"));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{trimmed}: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme `{other}`"),
        )),
    }
}

fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit));
    if let Some(timeout) = settings.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
