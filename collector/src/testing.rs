use crate::{
    influx::MetricSink,
    metrics::MetricPoint,
    plexpy::{
        Command,
        Source,
    },
    CollectError,
};
use serde_json::{
    json,
    Value,
};
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::Mutex,
};

pub(crate) fn sample_payload(command: Command) -> Value {
    match command {
        Command::GetActivity => json!({
            "response": {
                "result": "success",
                "data": {
                    "stream_count": "2",
                    "sessions": [
                        { "video_decision": "direct play", "state": "playing" },
                        { "video_decision": "transcode", "state": "paused" }
                    ]
                }
            }
        }),
        Command::GetUsers => json!({
            "response": {
                "result": "success",
                "data": [
                    { "is_home_user": "1" },
                    { "is_home_user": "0" },
                    { "is_home_user": "1" }
                ]
            }
        }),
        Command::GetLibraries => json!({
            "response": {
                "result": "success",
                "data": [
                    { "section_name": "Movies", "count": "10" },
                    { "section_name": "TV Shows", "count": 5 }
                ]
            }
        }),
    }
}

/// Replays canned payloads. A command's queue is consumed one payload per
/// fetch and its last payload repeats forever.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    payloads: Mutex<HashMap<Command, Vec<Value>>>,
    calls: Mutex<HashMap<Command, usize>>,
}

impl FakeSource {
    pub(crate) fn healthy() -> Self {
        let source = Self::default();
        for command in [Command::GetActivity, Command::GetUsers, Command::GetLibraries] {
            source.push(command, sample_payload(command));
        }
        source
    }

    /// Replaces every queued payload of `command`.
    pub(crate) fn with(self, command: Command, payload: Value) -> Self {
        self.payloads.lock().unwrap().insert(command, vec![payload]);
        self
    }

    pub(crate) fn push(&self, command: Command, payload: Value) {
        self.payloads.lock().unwrap().entry(command).or_default().push(payload);
    }

    pub(crate) fn calls(&self, command: Command) -> usize {
        self.calls.lock().unwrap().get(&command).copied().unwrap_or_default()
    }

    fn next_payload(&self, command: Command) -> Value {
        *self.calls.lock().unwrap().entry(command).or_default() += 1;
        let mut payloads = self.payloads.lock().unwrap();
        let queue = payloads.entry(command).or_default();
        match queue.len() {
            0 => Value::Null,
            1 => queue[0].clone(),
            _ => queue.remove(0),
        }
    }
}

impl Source for FakeSource {
    fn fetch(&self, command: Command) -> Pin<Box<dyn Future<Output = Result<Value, CollectError>> + Send + '_>> {
        let payload = self.next_payload(command);
        Box::pin(async move {
            if crate::plexpy::is_falsy(&payload) {
                return Err(CollectError::UpstreamUnavailable { command });
            }
            Ok(payload)
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    points: Mutex<Vec<MetricPoint>>,
}

impl RecordingSink {
    pub(crate) fn points(&self) -> Vec<MetricPoint> {
        self.points.lock().unwrap().clone()
    }
}

impl MetricSink for RecordingSink {
    fn write_points<'a>(
        &'a self,
        points: &'a [MetricPoint],
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectError>> + Send + 'a>> {
        self.points.lock().unwrap().extend_from_slice(points);
        Box::pin(async { Ok(()) })
    }
}
