use crate::{
    collectors::{
        ActivityCollector,
        Collector,
        LibraryCollector,
        UserCollector,
    },
    influx::MetricSink,
    metrics::MetricPoint,
    plexpy::Source,
    CollectError,
};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of one fetch, transform and write job.
pub type JobResult = Result<MetricPoint, CollectError>;

/// One tick worth of work: every collector runs as its own task against the
/// shared source and sink.
#[derive(Clone)]
pub struct PollingCycle {
    source: Arc<dyn Source>,
    sink: Arc<dyn MetricSink>,
    collectors: Vec<Arc<dyn Collector>>,
    host: String,
}

impl PollingCycle {
    /// A cycle with the activity, user and library collectors. `host` becomes
    /// the `host` tag of every point.
    pub fn new(source: Arc<dyn Source>, sink: Arc<dyn MetricSink>, host: impl Into<String>) -> Self {
        Self {
            source,
            sink,
            collectors: vec![
                Arc::new(ActivityCollector),
                Arc::new(UserCollector),
                Arc::new(LibraryCollector),
            ],
            host: host.into(),
        }
    }

    pub fn collectors(&self) -> impl Iterator<Item = &dyn Collector> {
        self.collectors.iter().map(|collector| collector.as_ref())
    }

    /// Starts one independent job per collector on `jobs`. The jobs share no
    /// state and are not awaited here.
    pub fn spawn(&self, jobs: &mut JoinSet<JobResult>) {
        for collector in &self.collectors {
            let collector = Arc::clone(collector);
            let source = Arc::clone(&self.source);
            let sink = Arc::clone(&self.sink);
            let host = self.host.clone();
            jobs.spawn(async move { run_job(collector.as_ref(), source.as_ref(), sink.as_ref(), host).await });
        }
    }
}

/// Fetch, transform and write for a single collector. The point is stamped
/// once the payload has been transformed.
pub async fn run_job(collector: &dyn Collector, source: &dyn Source, sink: &dyn MetricSink, host: String) -> JobResult {
    let payload = source.fetch(collector.command()).await?;
    let fields = collector.transform(payload)?;
    let point = MetricPoint::now(collector.measurement(), host, fields);
    sink.write_points(std::slice::from_ref(&point)).await?;
    debug!(
        collector = collector.name(),
        measurement = %point.measurement,
        time = %point.timestamp(),
        fields = point.fields.len(),
        "point written"
    );
    Ok(point)
}
