use crate::require_non_empty;
use color_eyre::Result;
use eyre::bail;
use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;

/// Connection settings for the PlexPy (Tautulli) API, the `[PlexPy]` section.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlexPyConfig {
    /// `http` or `https`.
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub host: String,
    /// Kept verbatim; a malformed port surfaces as a connection failure.
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub apikey: String,
    /// Optional path prefix when PlexPy is served below a sub-path. Empty means none.
    #[serde(default)]
    pub baseurl: String,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout: u64,
}

impl PlexPyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_non_empty("plexpy.protocol", &self.protocol)?;
        if !matches!(self.protocol.as_str(), "http" | "https") {
            bail!("plexpy.protocol must be http or https, got {:?}", self.protocol);
        }
        require_non_empty("plexpy.host", &self.host)?;
        require_non_empty("plexpy.port", &self.port)?;
        require_non_empty("plexpy.apikey", &self.apikey)?;
        if self.timeout == 0 {
            bail!("plexpy.timeout must be a positive number of seconds");
        }
        Ok(())
    }
}
