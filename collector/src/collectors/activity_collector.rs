use crate::{
    collectors::Collector,
    metrics::*,
    plexpy::Command,
    CollectError,
};
use serde_json::Value;

/// Direct play vs. transcode stream counts from `get_activity`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActivityCollector;

impl Collector for ActivityCollector {
    fn command(&self) -> Command {
        Command::GetActivity
    }

    fn transform(&self, payload: Value) -> Result<FieldMap, CollectError> {
        let data = serde_json::from_value::<Envelope<ActivityData>>(payload)?.into_data();
        let snapshot = ActivitySnapshot::from_data(&data);
        trace!(?snapshot, "activity snapshot");
        Ok(snapshot.fields())
    }

    fn name(&self) -> &'static str {
        "ActivityCollector"
    }
}
