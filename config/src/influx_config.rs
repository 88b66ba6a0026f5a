use crate::require_non_empty;
use color_eyre::Result;
use eyre::bail;
use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;

/// InfluxDB 1.x connection settings, the `[InfluxDB]` section.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InfluxConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: String,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout: u64,
}

impl InfluxConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_non_empty("influxdb.host", &self.host)?;
        require_non_empty("influxdb.port", &self.port)?;
        require_non_empty("influxdb.user", &self.user)?;
        require_non_empty("influxdb.password", &self.password)?;
        require_non_empty("influxdb.database", &self.database)?;
        if self.timeout == 0 {
            bail!("influxdb.timeout must be a positive number of seconds");
        }
        Ok(())
    }
}
