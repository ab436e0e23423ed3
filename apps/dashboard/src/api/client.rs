use crate::api::{ApiError, ApiRequest, Method, Transport};
use crate::domain::{LocationSubmission, Severity};
use crate::notifications::ToastQueue;
use crate::storage::TokenStore;
use serde_json::Value;
use std::sync::Arc;

/// Toast shown for every failed request, whatever the cause.
pub const API_FAILURE_MESSAGE: &str = "API request failed";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub const fn post(body: Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
        }
    }
}

/// Token-aware gateway for all outbound HTTP calls.
///
/// The session token is captured once at construction and never re-read.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    transport: Arc<dyn Transport>,
    toasts: ToastQueue,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        transport: Arc<dyn Transport>,
        toasts: ToastQueue,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.filter(|token| !token.is_empty()),
            transport,
            toasts,
        }
    }

    /// Reads the token from `store` exactly once. A storage failure is logged and the
    /// client starts without credentials.
    pub async fn from_store(
        base_url: impl Into<String>,
        store: &dyn TokenStore,
        transport: Arc<dyn Transport>,
        toasts: ToastQueue,
    ) -> Self {
        let token = match store.load_token().await {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(%error, "could not read session token; continuing unauthenticated");
                None
            }
        };
        Self::new(base_url, token, transport, toasts)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Issues a request against the base URL and returns the parsed JSON body.
    ///
    /// Every failure is logged, surfaces one error toast, and is returned to the caller.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        match self.send(endpoint, options).await {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::error!(endpoint, %error, "API request failed");
                self.toasts.push(API_FAILURE_MESSAGE, Severity::Error);
                Err(error)
            }
        }
    }

    pub async fn get_climate_data(&self, lat: f64, lng: f64) -> Result<Value, ApiError> {
        self.request(&format!("/climate/data?lat={lat}&lng={lng}"), RequestOptions::get())
            .await
    }

    pub async fn start_analysis(&self, location: &LocationSubmission) -> Result<Value, ApiError> {
        let body = serde_json::to_value(location)?;
        self.request("/analyze", RequestOptions::post(body)).await
    }

    /// The id is sent as a single percent-encoded path segment.
    pub async fn get_recommendations(&self, analysis_id: &str) -> Result<Value, ApiError> {
        self.request(
            &format!("/recommendations/{}", urlencoding::encode(analysis_id)),
            RequestOptions::get(),
        )
        .await
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let body = options
            .body
            .map(|body| serde_json::to_string(&body))
            .transpose()?;

        let request = ApiRequest {
            method: options.method,
            url: format!("{}{endpoint}", self.base_url),
            headers: self.headers(),
            body,
        };

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}
