#[macro_use]
extern crate tracing;

mod args;
mod influx_config;
mod plexpy_config;
mod sources;

pub use args::Args;
pub use influx_config::InfluxConfig;
pub use plexpy_config::PlexPyConfig;
use color_eyre::Result;
use eyre::{
    bail,
    Context as _,
};
use serde::{
    Deserialize,
    Serialize,
};
use sources::LowercaseKeys;
use std::{
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

/// Name of the configuration file looked up when no path is given.
pub const CONFIG_FILE_NAME: &str = "plexpyInflux.conf";

const ENV_PREFIX: &str = "PLEXPY_INFLUX";

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub script: ScriptConfig,
    pub plexpy: PlexPyConfig,
    pub influxdb: InfluxConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Seconds between two polling cycles.
    pub interval: u64,
}

impl ScriptConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Layers the built-in defaults, the configuration file, `PLEXPY_INFLUX__*`
    /// environment variables and the command-line overrides, in that order.
    pub fn new(args: &Args) -> Result<Self> {
        Self::load(args, None)
    }

    /// Like [`Config::new`], reading `PLEXPY_INFLUX__*` variables from `env`
    /// instead of the process environment when given.
    pub fn load(args: &Args, env: Option<config::Map<String, String>>) -> Result<Self> {
        let (path, required) = Self::config_file(args);
        debug!(path = %path.display(), required, "loading configuration");

        let builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(LowercaseKeys::new(
                config::File::from(path.as_path())
                    .format(file_format(&path))
                    .required(required),
            ))
            .add_source(LowercaseKeys::new(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .source(env),
            ))
            .add_source(args.clone());

        let cfg: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .wrap_err_with(|| format!("Failed to load configuration from {:?}", path))?;

        Ok(cfg)
    }

    /// An explicit `--config` path, or a file in the working directory, must
    /// exist. The per-user configuration directory is only a fallback.
    fn config_file(args: &Args) -> (PathBuf, bool) {
        if let Some(path) = &args.config {
            return (path.clone(), true);
        }
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return (local, true);
        }
        (get_config_dir().join(CONFIG_FILE_NAME), false)
    }

    pub fn validate(&self) -> Result<()> {
        if self.script.interval == 0 {
            bail!("script.interval must be a positive number of seconds");
        }
        self.plexpy.validate()?;
        self.influxdb.validate()?;
        Ok(())
    }
}

fn file_format(path: &Path) -> config::FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => config::FileFormat::Yaml,
        _ => config::FileFormat::Ini,
    }
}

pub(crate) fn require_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{key} must be set and non-empty");
    }
    Ok(())
}
