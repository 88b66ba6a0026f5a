use config::{
    Map,
    Source,
    Value,
    ValueKind,
};

/// Lower-cases every key of the wrapped source, so `[PlexPy]` / `INTERVAL`
/// from the classic INI file line up with `plexpy` / `interval`.
#[derive(Debug)]
pub(crate) struct LowercaseKeys(Box<dyn Source + Send + Sync>);

impl LowercaseKeys {
    pub(crate) fn new(source: impl Source + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}

impl Clone for LowercaseKeys {
    fn clone(&self) -> Self {
        Self(self.0.clone_into_box())
    }
}

impl Source for LowercaseKeys {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
        Ok(lowercase_table(self.0.collect()?))
    }
}

fn lowercase_table(table: Map<String, Value>) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), lowercase_value(value)))
        .collect()
}

fn lowercase_value(value: Value) -> Value {
    match value.kind {
        ValueKind::Table(table) => Value::new(None, ValueKind::Table(lowercase_table(table))),
        ValueKind::Array(items) => Value::new(None, ValueKind::Array(items.into_iter().map(lowercase_value).collect())),
        kind => Value::new(None, kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_nested_keys() {
        let source = config::File::from_str("[PlexPy]\nHost = plex\n", config::FileFormat::Ini);

        let collected = LowercaseKeys::new(source).collect().unwrap();

        let plexpy = collected.get("plexpy").cloned().unwrap().into_table().unwrap();
        assert_eq!(plexpy.get("host").cloned().unwrap().into_string().unwrap(), "plex");
    }
}
