//! HTTP client with auth, status checking and read retries

use super::urls::Endpoint;
use crate::config::DriveConfig;
use crate::error::{DriveError, DriveResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// First retry waits 1s, then doubles
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    retry_count: u32,
}

impl ApiClient {
    pub fn new(config: &DriveConfig) -> DriveResult<Self> {
        config.validate()?;
        let http = Client::builder().build()?;

        Ok(ApiClient {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            retry_count: config.retry_count,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request builder for an endpoint with auth applied
    pub(crate) fn request(&self, endpoint: &Endpoint) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint.path);
        let request = self.http.request(endpoint.method.clone(), url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch(&self, request: RequestBuilder) -> DriveResult<Response> {
        let response = request.send().await?;
        check_status(response).await
    }

    /// Mutation without body. Never retried.
    pub(crate) async fn execute(&self, endpoint: &Endpoint) -> DriveResult<Response> {
        log::debug!("{} {}", endpoint.method, endpoint.path);
        self.dispatch(self.request(endpoint)).await
    }

    /// Mutation with a JSON body. Never retried.
    pub(crate) async fn execute_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> DriveResult<Response> {
        log::debug!("{} {}", endpoint.method, endpoint.path);
        self.dispatch(self.request(endpoint).json(body)).await
    }

    /// Read query decoded from JSON, retried on transport errors and 5xx
    pub(crate) async fn query_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> DriveResult<T> {
        self.with_retry(endpoint, || async move {
            let response = self.dispatch(self.request(endpoint)).await?;
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| {
                DriveError::Decode(format!("{} {}: {}", endpoint.method, endpoint.path, e))
            })
        })
        .await
    }

    /// Read query whose body is a bare key, retried like `query_json`
    pub(crate) async fn query_key(&self, endpoint: &Endpoint) -> DriveResult<String> {
        self.with_retry(endpoint, || async move {
            let response = self.dispatch(self.request(endpoint)).await?;
            parse_key(&response.text().await?)
        })
        .await
    }

    /// Read query with no interesting body (existence checks)
    pub(crate) async fn query_ok(&self, endpoint: &Endpoint) -> DriveResult<()> {
        self.with_retry(endpoint, || async move {
            self.dispatch(self.request(endpoint)).await.map(|_| ())
        })
        .await
    }

    async fn with_retry<T, F, Fut>(&self, endpoint: &Endpoint, mut attempt_fn: F) -> DriveResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DriveResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retry_count => {
                    let delay = retry_delay(attempt);
                    log::warn!(
                        "{} {} failed (attempt {}/{}): {}; retrying in {:?}",
                        endpoint.method,
                        endpoint.path,
                        attempt + 1,
                        self.retry_count + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn retry_delay(attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    RETRY_BASE_DELAY.saturating_mul(factor).min(RETRY_MAX_DELAY)
}

/// Turn a non-2xx response into `DriveError::Status`, keeping the body text for diagnostics
pub(crate) async fn check_status(response: Response) -> DriveResult<Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(DriveError::Status { status, body });
    }
    Ok(response)
}

/// Keys come back either as plain text or as a JSON string
pub(crate) fn parse_key(text: &str) -> DriveResult<String> {
    let trimmed = text.trim();
    let key = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed)
            .map_err(|e| DriveError::Decode(format!("malformed key {}: {}", trimmed, e)))?
    } else {
        trimmed.to_string()
    };

    if key.is_empty() {
        return Err(DriveError::Decode("empty key in response".to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_accepts_plain_and_json_strings() {
        assert_eq!(parse_key("abc123\n").unwrap(), "abc123");
        assert_eq!(parse_key("\"abc123\"").unwrap(), "abc123");
        assert!(parse_key("  ").is_err());
        assert!(parse_key("\"unterminated").is_err());
    }

    #[test]
    fn retry_delay_doubles_up_to_cap() {
        assert_eq!(retry_delay(0), Duration::from_secs(1));
        assert_eq!(retry_delay(1), Duration::from_secs(2));
        assert_eq!(retry_delay(3), Duration::from_secs(8));
        assert_eq!(retry_delay(10), RETRY_MAX_DELAY);
        assert_eq!(retry_delay(40), RETRY_MAX_DELAY);
    }

    #[test]
    fn request_carries_bearer_token() {
        let mut config = DriveConfig::new("http://localhost:9000");
        config.token = Some("secret".to_string());
        let api = ApiClient::new(&config).unwrap();

        let request = api
            .request(&crate::api::urls::user::check_user())
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:9000/user");
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer secret"
        );
    }
}
