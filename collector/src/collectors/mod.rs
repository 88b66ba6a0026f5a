//! # Collectors Module
//!
//! One collector per PlexPy command, each turning a payload into the fields of
//! one InfluxDB point:
//!
//! - **`ActivityCollector`**: `get_activity`, direct play vs. transcode counts
//! - **`UserCollector`**: `get_users`, total and home users
//! - **`LibraryCollector`**: `get_libraries`, item count per library
//!
//! **`PollingCycle`** runs all of them as independent tasks for one tick.

pub mod activity_collector;
pub mod collector;
pub mod library_collector;
pub mod polling_cycle;
pub mod user_collector;

pub use activity_collector::ActivityCollector;
pub use collector::Collector;
pub use library_collector::LibraryCollector;
pub use polling_cycle::{
    run_job,
    JobResult,
    PollingCycle,
};
pub use user_collector::UserCollector;
