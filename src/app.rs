use color_eyre::Result;
use plexpy_influx_collector::{
    CollectError,
    InfluxClient,
    PlexPyClient,
    PollingCycle,
    Runner,
    Shutdown,
};
use plexpy_influx_config::{
    Args,
    Config,
};
use std::sync::Arc;

/// How the polling loop ended.
#[derive(Debug)]
enum Outcome {
    Stopped(Result<Shutdown, CollectError>),
    Interrupted,
}

pub struct App {
    config: Config,
    once: bool,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::new(&args)?;
        config.validate()?;
        Ok(Self { config, once: args.once })
    }

    /// Connects both ends and polls until PlexPy becomes unavailable, a job
    /// fails, or the process is interrupted.
    #[instrument(level = "debug", skip(self), fields(once = self.once))]
    pub async fn run(self) -> Result<()> {
        info!("plexpy-influx started");

        let source = PlexPyClient::new(&self.config.plexpy)?;
        let sink = InfluxClient::new(&self.config.influxdb)?;
        sink.create_database().await?;

        let cycle = PollingCycle::new(Arc::new(source), Arc::new(sink), self.config.plexpy.host.clone());
        let runner = Runner::new(cycle, self.config.script.interval());

        let outcome = if self.once {
            Outcome::Stopped(runner.run_once().await)
        } else {
            tokio::select! {
                shutdown = runner.run() => Outcome::Stopped(shutdown),
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    Outcome::Interrupted
                }
            }
        };

        conclude(outcome)
    }
}

/// An unavailable PlexPy and an interrupt end the process successfully; any
/// other job error is returned. The upstream failure has already been logged.
fn conclude(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Stopped(Ok(Shutdown::UpstreamUnavailable)) => debug!("stopping: PlexPy is unavailable"),
        Outcome::Stopped(Ok(Shutdown::Completed)) => info!("polling cycle completed"),
        Outcome::Stopped(Err(err)) => return Err(err.into()),
        Outcome::Interrupted => info!("interrupted, shutting down"),
    }
    Ok(())
}
