use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{ApiError, Envelope};
use shared_utils::storage::TokenStore;

/// Shared HTTP client for the REST backend. Every resource client is a
/// thin wrapper over this: it attaches the JSON content type and the
/// bearer credential (read from the persisted token store on each
/// request, never refreshed proactively), performs the call, and
/// normalizes the `{ success, data, message }` envelope into either
/// the payload or an `ApiError` carrying the server's message.
///
/// No retry, no backoff, no timeout: a transport failure surfaces
/// immediately as a rejected operation.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, tokens: TokenStore) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            tokens,
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    error!("Stored auth token is not a valid header value, sending unauthenticated");
                }
            }
        }

        headers
    }

    /// Perform a request whose envelope carries a `data` payload.
    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request_with_query(method, path, &[], body).await
    }

    /// Same as [`request`], with query parameters. Callers append only
    /// the parameters that are actually set.
    pub async fn request_with_query<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let envelope = self.send::<T>(method, path, query, body).await?;

        if !envelope.success {
            return Err(ApiError::Application(envelope.message.unwrap_or_default()));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Decode("successful response carried no data".to_string()))
    }

    /// Perform a request where only the envelope's success flag
    /// matters (mark-all-read, logout, deletes).
    pub async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<(), ApiError> {
        let envelope = self.send::<Value>(method, path, &[], body).await?;

        if !envelope.success {
            return Err(ApiError::Application(envelope.message.unwrap_or_default()));
        }

        Ok(())
    }

    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            // Non-2xx bodies still usually carry the envelope; surface
            // the server's message when they do.
            let message = serde_json::from_str::<Envelope<Value>>(&body_text)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_default();
            error!("API error ({}): {}", status, message);

            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<Envelope<T>>(&body_text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
