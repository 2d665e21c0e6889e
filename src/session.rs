// src/session.rs
use crate::error::Result;
use crate::types::{Config, SslToolError};
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;

/// HTTP session used for source queries.
#[derive(Clone)]
pub struct Session {
    pub client: Client,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let client_builder = Client::builder()
            .timeout(config.source_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10));

        let client = with_proxy(client_builder, config.proxy.as_ref())
            .build()
            .map_err(|e| SslToolError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Session { client })
    }

    /// GET `url` and decode a JSON body. Any failure is reported as the named
    /// source being unavailable.
    pub async fn get_json<T>(&self, url: &str, source_name: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let unavailable = |message: String| SslToolError::SourceUnavailable {
            source_name: source_name.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP error: {}", response.status())));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| unavailable(format!("Failed to parse JSON: {}", e)))
    }
}

/// Route through `proxy` when given, otherwise ignore any proxy set in the
/// environment.
pub fn with_proxy(builder: ClientBuilder, proxy: Option<&Proxy>) -> ClientBuilder {
    match proxy {
        Some(proxy) => builder.proxy(proxy.clone()),
        None => builder.no_proxy(),
    }
}
