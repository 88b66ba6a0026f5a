//! # PlexPy to InfluxDB collector
//!
//! Polls a PlexPy (Tautulli) server and republishes its readings as InfluxDB
//! points.
//!
//! ## Architecture
//!
//! - **`plexpy`**: query URL construction and the HTTP client fetching raw payloads
//! - **`metrics`**: payload shapes, the derived snapshots and [`MetricPoint`]
//! - **`collectors`**: one collector per command plus the [`PollingCycle`]
//!   that runs them as independent tasks
//! - **`influx`**: the InfluxDB 1.x sink
//! - **`runner`**: the scheduling loop and its shutdown outcome
//!
//! ## Data flow
//!
//! ```text
//! Runner --tick--> PollingCycle --> { Source::fetch -> Collector::transform -> MetricSink::write_points } x 3
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
mod error;
pub mod influx;
pub mod metrics;
pub mod plexpy;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use collectors::*;
pub use error::CollectError;
pub use influx::{
    InfluxClient,
    MetricSink,
};
pub use metrics::{
    FieldMap,
    MetricPoint,
};
pub use plexpy::{
    Command,
    PlexPyClient,
    Source,
};
pub use runner::{
    Runner,
    Shutdown,
};
