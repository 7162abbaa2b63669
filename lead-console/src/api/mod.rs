//! HTTP client for the lead backend.
//!
//! One trait per resource; [`LeadApi`] bundles them so controllers can take a
//! single `Arc<dyn LeadApi>`. [`ApiClient`] is the reqwest implementation:
//! no retries, no caching, no auth.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub mod analytics;
pub mod campaigns;
pub mod contacts;
pub mod discovery;
pub mod email;
pub mod error;

pub use analytics::AnalyticsApi;
pub use campaigns::CampaignsApi;
pub use contacts::ContactsApi;
pub use discovery::DiscoveryApi;
pub use email::EmailApi;
pub use error::{ApiError, ApiResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// Everything the console needs from the backend.
pub trait LeadApi: ContactsApi + CampaignsApi + DiscoveryApi + EmailApi + AnalyticsApi {}

impl<T> LeadApi for T where T: ContactsApi + CampaignsApi + DiscoveryApi + EmailApi + AnalyticsApi {}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scheme and host without the `/api` suffix, where `/health` lives.
    pub fn origin(&self) -> &str {
        self.base_url
            .strip_suffix("/api")
            .unwrap_or(self.base_url.as_str())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.request(Method::GET, path).send().await?;
        decode(resp).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self.request(Method::GET, path).query(query).send().await?;
        decode(resp).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let resp = self.request(Method::GET, path).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        decode(resp).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.request(Method::POST, path).send().await?;
        decode(resp).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.request(Method::PUT, path).json(body).send().await?;
        decode(resp).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.request(Method::DELETE, path).send().await?;
        decode(resp).await
    }

    /// Fetches a URL outside the `/api` prefix.
    pub(crate) async fn get_absolute<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        decode(resp).await
    }
}

/// Applies the backend's envelope rules: non-2xx is a status error, and a
/// body with `"success": false` is a rejection carrying its `error` string.
async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&text),
        });
    }

    let value: Value = serde_json::from_str(&text)?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Request failed")
            .to_string();
        return Err(ApiError::Rejected(message));
    }

    Ok(serde_json::from_value(value)?)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<shared_types::ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| body.trim().to_string())
}
