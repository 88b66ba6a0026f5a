use clap::Parser;
use std::{
    collections::HashMap,
    path::PathBuf,
};

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file. INI by default, YAML for `.yaml`/`.yml`.
    #[arg(short, long, env = "PLEXPY_INFLUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seconds between polling cycles, overrides `[Script] interval`.
    #[arg(long)]
    pub interval: Option<u64>,

    /// Run a single polling cycle and exit.
    #[arg(long, action)]
    pub once: bool,

    /// Enable debug logging.
    #[arg(short, long, action)]
    pub verbose: bool,
}

impl config::Source for Args {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        if let Some(interval) = self.interval {
            cache.insert(
                "script".to_string(),
                config::ValueKind::Table(HashMap::from_iter([("interval".to_string(), interval.into())])).into(),
            );
        }
        Ok(cache)
    }
}
