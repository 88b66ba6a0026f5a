use crate::{
    metrics::FieldMap,
    plexpy::Command,
    CollectError,
};
use serde_json::Value;

/// Turns the payload of one PlexPy command into the fields of one point.
pub trait Collector: Send + Sync {
    /// The API command whose payload this collector consumes
    fn command(&self) -> Command;

    /// Reshape a raw `{"response": {"data": ...}}` payload into point fields
    fn transform(&self, payload: Value) -> Result<FieldMap, CollectError>;

    /// The measurement the fields are written to
    fn measurement(&self) -> &'static str {
        self.command().into()
    }

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
