use crate::{
    collectors::Collector,
    metrics::*,
    plexpy::Command,
    CollectError,
};
use serde_json::Value;

/// Item count per library from `get_libraries`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryCollector;

impl Collector for LibraryCollector {
    fn command(&self) -> Command {
        Command::GetLibraries
    }

    fn transform(&self, payload: Value) -> Result<FieldMap, CollectError> {
        let libraries = serde_json::from_value::<Envelope<Vec<Library>>>(payload)?.into_data();
        Ok(LibrarySnapshot::from_libraries(&libraries).fields())
    }

    fn name(&self) -> &'static str {
        "LibraryCollector"
    }
}
