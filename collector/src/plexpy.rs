//! # PlexPy API access
//!
//! Builds the `api/v2` query URL and fetches raw JSON payloads for the three
//! commands the collectors consume.
//!
//! The API signals a broken deployment (wrong key, wrong host, PlexPy down) by
//! answering with an empty or falsy body; that is surfaced as
//! [`CollectError::UpstreamUnavailable`] and never retried.

use crate::CollectError;
use plexpy_influx_config::PlexPyConfig;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::{
    future::Future,
    pin::Pin,
};
use strum::{
    Display,
    IntoStaticStr,
};

/// The API commands queried every polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    GetActivity,
    GetUsers,
    GetLibraries,
}

/// `{protocol}://{host}:{port}{/baseurl}/api/v2?apikey={apikey}`
///
/// Nothing is validated here.
pub fn base_url(protocol: &str, host: &str, port: &str, apikey: &str, baseurl: &str) -> String {
    let prefix = if baseurl.is_empty() {
        String::new()
    } else {
        format!("/{baseurl}")
    };
    format!("{protocol}://{host}:{port}{prefix}/api/v2?apikey={apikey}")
}

pub fn command_url(base_url: &str, command: Command) -> String {
    format!("{base_url}&cmd={command}")
}

/// Python-style truthiness of a decoded body.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Where collectors get their raw payloads from.
pub trait Source: Send + Sync {
    fn fetch(&self, command: Command) -> Pin<Box<dyn Future<Output = Result<Value, CollectError>> + Send + '_>>;
}

#[derive(Debug, Clone)]
pub struct PlexPyClient {
    http_client: HttpClient,
    base_url: String,
}

impl PlexPyClient {
    /// The client skips certificate verification: PlexPy is commonly served
    /// with a self-signed certificate.
    pub fn new(config: &PlexPyConfig) -> Result<Self, CollectError> {
        let http_client = HttpClient::builder()
            .danger_accept_invalid_certs(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url(
                &config.protocol,
                &config.host,
                &config.port,
                &config.apikey,
                &config.baseurl,
            ),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_command(&self, command: Command) -> Result<Value, CollectError> {
        // The URL carries the API key, keep it out of the logs.
        debug!(%command, "querying PlexPy");

        let body = self
            .http_client
            .get(command_url(&self.base_url, command))
            .send()
            .await?
            .text()
            .await?;

        if body.trim().is_empty() {
            return Err(CollectError::UpstreamUnavailable { command });
        }

        let payload: Value = serde_json::from_str(&body)?;
        if is_falsy(&payload) {
            return Err(CollectError::UpstreamUnavailable { command });
        }

        Ok(payload)
    }
}

impl Source for PlexPyClient {
    fn fetch(&self, command: Command) -> Pin<Box<dyn Future<Output = Result<Value, CollectError>> + Send + '_>> {
        Box::pin(self.fetch_command(command))
    }
}
