use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::database::models::PoolSummary;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success status, with the server's error body when it could be read
    #[error("Request failed with status code {status}")]
    Api {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// The `message` field of the server's error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Pool detail as received by the client. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDetailResponse {
    pub location: Option<String>,
    #[serde(rename = "last24hRevenueBTC")]
    pub last24h_revenue_btc: Option<f64>,
    pub uptime_percent: Option<f64>,
    pub fee_percent: Option<f64>,
}

/// The two directory queries the table view depends on
#[async_trait]
pub trait PoolDirectory: Send + Sync {
    async fn list_summaries(&self) -> Result<Vec<PoolSummary>, ClientError>;

    async fn get_detail(&self, id: &str) -> Result<PoolDetailResponse, ClientError>;
}

/// HTTP client for the mining pool API
#[derive(Debug, Clone)]
pub struct MiningPoolsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl MiningPoolsApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn pools_url(&self) -> Result<Url, ClientError> {
        Ok(self.base_url.join("mining-pools")?)
    }

    fn pool_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.pools_url()?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            error: body.error,
            message: body.message,
        })
    }
}

#[async_trait]
impl PoolDirectory for MiningPoolsApi {
    async fn list_summaries(&self) -> Result<Vec<PoolSummary>, ClientError> {
        let url = self.pools_url()?;
        self.get_json(url).await
    }

    async fn get_detail(&self, id: &str) -> Result<PoolDetailResponse, ClientError> {
        let url = self.pool_url(id)?;
        self.get_json(url).await
    }
}
