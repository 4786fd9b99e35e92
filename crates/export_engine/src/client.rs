use export_core::{FilterParams, PreviewRow};
use export_logging::{export_debug, export_warn};
use serde::Deserialize;
use url::Url;

use crate::{Endpoint, FailureKind, FetchError};

pub const DEFAULT_SERVICE_URL: &str = "https://cf-scraper-v3fp.onrender.com";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            user_agent: concat!("cf_export/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// The two read-only endpoints of the problem-export service.
#[async_trait::async_trait]
pub trait ExportService: Send + Sync {
    async fn fetch_preview(&self, params: &FilterParams) -> Result<Vec<PreviewRow>, FetchError>;

    async fn fetch_export(&self, params: &FilterParams) -> Result<Vec<u8>, FetchError>;
}

/// `{base}/{endpoint}?division=..&index=..&days=..`, form-encoded.
pub fn build_endpoint_url(
    base_url: &str,
    endpoint: Endpoint,
    params: &FilterParams,
) -> Result<Url, FetchError> {
    let mut base = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("{base_url} cannot be used as a base url"),
        ));
    }
    // Keep any path prefix of the base when joining.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut url = base
        .join(endpoint.path())
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut()
        .clear()
        .extend_pairs(params.query_pairs().iter());
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct PreviewBody {
    #[serde(default)]
    data: Option<Vec<PreviewRow>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestExportService {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestExportService {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn get(
        &self,
        endpoint: Endpoint,
        params: &FilterParams,
    ) -> Result<reqwest::Response, FetchError> {
        let url = build_endpoint_url(&self.settings.base_url, endpoint, params)?;
        export_debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ExportService for ReqwestExportService {
    async fn fetch_preview(&self, params: &FilterParams) -> Result<Vec<PreviewRow>, FetchError> {
        let response = self.get(Endpoint::Preview, params).await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        // The service reports its own failures in the body, sometimes with a
        // non-2xx status, so the body is inspected before the status.
        let parsed: Result<PreviewBody, _> = serde_json::from_slice(&body);
        match parsed {
            Ok(PreviewBody {
                error: Some(message),
                ..
            }) if !message.is_empty() => {
                export_warn!("Preview service reported: {}", message);
                Err(FetchError::new(
                    FailureKind::ServiceReported(message.clone()),
                    message,
                ))
            }
            _ if !status.is_success() => Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )),
            Ok(body) => Ok(body.data.unwrap_or_default()),
            Err(err) => Err(FetchError::new(FailureKind::MalformedBody, err.to_string())),
        }
    }

    async fn fetch_export(&self, params: &FilterParams) -> Result<Vec<u8>, FetchError> {
        let response = self.get(Endpoint::Download, params).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
