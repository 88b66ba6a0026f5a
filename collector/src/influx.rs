//! # InfluxDB sink
//!
//! Talks to the InfluxDB 1.x HTTP API: `/query` for the idempotent
//! `CREATE DATABASE` issued at start-up and `/write` for line-protocol points.

use crate::{
    metrics::MetricPoint,
    CollectError,
};
use plexpy_influx_config::InfluxConfig;
use reqwest::Client as HttpClient;
use std::{
    future::Future,
    pin::Pin,
};
use url::Url;

/// Where finished points go.
pub trait MetricSink: Send + Sync {
    fn write_points<'a>(
        &'a self,
        points: &'a [MetricPoint],
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectError>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct InfluxClient {
    http_client: HttpClient,
    endpoint: Url,
    user: String,
    password: String,
    database: String,
}

impl InfluxClient {
    pub fn new(config: &InfluxConfig) -> Result<Self, CollectError> {
        let endpoint = Url::parse(&format!("http://{}:{}/", config.host, config.port))?;

        let http_client = HttpClient::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            endpoint,
            user: config.user.clone(),
            password: config.password.clone(),
            database: config.database.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Creates the target database. InfluxDB treats this as a no-op when the
    /// database already exists.
    pub async fn create_database(&self) -> Result<(), CollectError> {
        let query = format!("CREATE DATABASE \"{}\"", self.database.replace('"', "\\\""));
        info!(database = %self.database, "ensuring InfluxDB database exists");

        let response = self
            .http_client
            .post(self.endpoint.join("query")?)
            .query(&[
                ("q", query.as_str()),
                ("u", self.user.as_str()),
                ("p", self.password.as_str()),
            ])
            .send()
            .await?;

        check_status(response).await
    }

    pub async fn write(&self, points: &[MetricPoint]) -> Result<(), CollectError> {
        if points.is_empty() {
            return Ok(());
        }

        let body = points
            .iter()
            .map(MetricPoint::to_line_protocol)
            .collect::<Vec<_>>()
            .join("\n");

        let response = self
            .http_client
            .post(self.endpoint.join("write")?)
            .query(&[
                ("db", self.database.as_str()),
                ("precision", "s"),
                ("u", self.user.as_str()),
                ("p", self.password.as_str()),
            ])
            .body(body)
            .send()
            .await?;

        check_status(response).await
    }
}

impl MetricSink for InfluxClient {
    fn write_points<'a>(
        &'a self,
        points: &'a [MetricPoint],
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectError>> + Send + 'a>> {
        Box::pin(self.write(points))
    }
}

async fn check_status(response: reqwest::Response) -> Result<(), CollectError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(CollectError::Sink {
        status: status.as_u16(),
        body,
    })
}
