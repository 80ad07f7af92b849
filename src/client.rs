//! Cloud Foundry API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource-level operations live on [`ResourceClient`](crate::ResourceClient).

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{ApiError, CfError, Result};
use crate::filter::ListFilter;
use crate::pagination::{ListPage, PageCursor, MAX_PER_PAGE};

const USER_AGENT: &str = concat!("cfapi/", env!("CARGO_PKG_VERSION"));

/// Page size used by `list_all` unless configured otherwise.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Low-level Cloud Foundry V3 API client.
///
/// Handles authentication and HTTP requests. Paths are relative to the API
/// root, e.g. `v3/apps`.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use cfapi::CfClient;
///
/// # fn example() -> cfapi::Result<()> {
/// // Create from environment variables
/// let client = CfClient::from_env()?;
///
/// // Or configure manually
/// let client = CfClient::new("access-token", "https://api.example.org")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CfClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    per_page: u32,
}

impl std::fmt::Debug for CfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfClient")
            .field("base_url", &self.base_url.as_str())
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl CfClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CF_API_URL` for the API root and `CF_ACCESS_TOKEN` for
    /// authentication. The token may carry the `bearer ` prefix printed by
    /// `cf oauth-token`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CF_API_URL").map_err(|_| {
            CfError::ConfigMissing("CF_API_URL environment variable not set".to_string())
        })?;
        let token = env::var("CF_ACCESS_TOKEN").map_err(|_| {
            CfError::ConfigMissing("CF_ACCESS_TOKEN environment variable not set".to_string())
        })?;

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and API root.
    ///
    /// # Arguments
    ///
    /// * `token` - OAuth access token, with or without a `bearer ` prefix
    /// * `base_url` - API root (e.g., `https://api.example.org`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| CfError::http("", e))?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: strip_bearer(token).to_string(),
            per_page: DEFAULT_PER_PAGE,
        })
    }

    /// Set the page size used when fetching every page of a list.
    ///
    /// Clamped to `1..=5000`.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Page size used when fetching every page of a list.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(path, self.http.get(url)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(path, self.http.get(url).query(query)).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(path, self.http.post(url).json(body)).await
    }

    /// Make a PATCH request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(path, self.http.patch(url).json(body)).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(path, self.http.delete(url)).await
    }

    /// Authenticate, send, and map non-2xx statuses to errors.
    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CfError::http(path, e))?;

        Self::check_response(response).await
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        decode_json(path, response).await
    }

    /// Fetch a single page of a list endpoint.
    #[tracing::instrument(skip(self, filter))]
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: &ListFilter,
        cursor: PageCursor,
    ) -> Result<ListPage<T>> {
        let query = filter.query_pairs(&cursor);
        let response = self.get_with_query(path, &query).await?;
        decode_json(path, response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(CfError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_body(status.as_u16(), body);
        tracing::debug!(status = status.as_u16(), message = %error.message(), "API error");
        Err(error.into())
    }
}

/// Read a response body and decode it as JSON, keeping the body on failure.
pub(crate) async fn decode_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let body = response.bytes().await.map_err(|e| CfError::http(path, e))?;
    serde_json::from_slice(&body).map_err(|e| CfError::decode(path, &body, e))
}

fn strip_bearer(token: &str) -> &str {
    let token = token.trim();
    match token.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => token[7..].trim_start(),
        _ => token,
    }
}
