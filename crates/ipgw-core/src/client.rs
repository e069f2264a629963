//! HTTP client for the gateway session-control endpoint
//!
//! Each call sends exactly one form-encoded POST and decodes the JSON object
//! the gateway answers with. There are no retries and no timeout; a request
//! blocks until the gateway answers or the OS gives up on the connection.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};

use ipgw_protocol::{Credentials, Operation, Reply, RequestBody, DEFAULT_APP_ID, DEFAULT_ENDPOINT};

use crate::error::GatewayError;

/// Where and as whom the client talks to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Session-control endpoint URL
    pub endpoint: String,
    /// Client identifier, sent as `app` and `User-Agent`
    pub app_id: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Use a different endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Client for the gateway session-control API
pub struct GatewayClient {
    config: GatewayConfig,
    url: Url,
    http_client: Client,
}

impl GatewayClient {
    /// Create a client for the default gateway endpoint
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let url = Url::parse(&config.endpoint)
            .map_err(|e| GatewayError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        let headers = default_headers(&url, &config)?;

        let http_client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(GatewayError::Request)?;

        Ok(Self {
            config,
            url,
            http_client,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run one gateway operation
    ///
    /// `ip` is only used by [`Operation::DisconnectIp`], which fails before
    /// sending anything if it is missing.
    pub async fn execute(
        &self,
        operation: Operation,
        credentials: &Credentials,
        ip: Option<&str>,
    ) -> Result<Reply, GatewayError> {
        let body = RequestBody::build(operation, credentials, ip, &self.config.app_id)?;

        tracing::debug!(
            cmd = %operation,
            endpoint = %self.url,
            fields = body.len(),
            "Sending gateway request"
        );

        let response = self
            .http_client
            .post(self.url.clone())
            .form(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Gateway responded");

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: response.url().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let reply = Reply::from_slice(&bytes)?;

        tracing::info!(cmd = %operation, fields = reply.len(), "Gateway request complete");
        Ok(reply)
    }

    /// Run one gateway operation, folding any failure into an error reply
    ///
    /// The result is `{"error": <message>}` when the request fails, which
    /// keeps output uniform for callers that only display replies.
    pub async fn execute_or_error(
        &self,
        operation: Operation,
        credentials: &Credentials,
        ip: Option<&str>,
    ) -> Reply {
        match self.execute(operation, credentials, ip).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    cmd = %operation,
                    status = ?e.status(),
                    "Gateway request failed: {}",
                    e
                );
                Reply::error(e.to_string())
            }
        }
    }
}

/// Fixed header set sent with every request
fn default_headers(url: &Url, config: &GatewayConfig) -> Result<HeaderMap, GatewayError> {
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => {
            return Err(GatewayError::InvalidEndpoint(format!(
                "{}: missing host",
                config.endpoint
            )))
        }
    };

    let value = |s: &str| {
        HeaderValue::from_str(s)
            .map_err(|_| GatewayError::InvalidEndpoint(format!("Invalid header value: {}", s)))
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::HOST, value(&host)?);
    headers.insert(header::USER_AGENT, value(&config.app_id)?);
    headers.insert("endpoint", value(&format!("POST {}", config.endpoint))?);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.endpoint, "https://its.pku.edu.cn/cas/ITSClient");
        assert_eq!(config.app_id, DEFAULT_APP_ID);
    }

    #[test]
    fn test_default_headers() {
        let config = GatewayConfig::default();
        let url = Url::parse(&config.endpoint).unwrap();
        let headers = default_headers(&url, &config).unwrap();

        assert_eq!(headers[header::HOST], "its.pku.edu.cn");
        assert_eq!(headers[header::USER_AGENT], DEFAULT_APP_ID);
        assert_eq!(
            headers["endpoint"],
            "POST https://its.pku.edu.cn/cas/ITSClient"
        );
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(headers[header::ACCEPT], "*/*");
    }

    #[test]
    fn test_host_header_keeps_port() {
        let config = GatewayConfig::default().with_endpoint("http://127.0.0.1:8080/cas/ITSClient");
        let url = Url::parse(&config.endpoint).unwrap();
        let headers = default_headers(&url, &config).unwrap();
        assert_eq!(headers[header::HOST], "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = GatewayConfig::default().with_endpoint("not a url");
        let result = GatewayClient::with_config(config);
        assert!(matches!(result, Err(GatewayError::InvalidEndpoint(_))));
    }
}
