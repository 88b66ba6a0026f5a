pub mod activity_data;
pub mod library_data;
pub mod user_data;

pub use activity_data::*;
pub use library_data::*;
pub use user_data::*;

use chrono::{
    DateTime,
    SubsecRound as _,
    Utc,
};
use serde::{
    de,
    Deserialize,
    Deserializer,
};
use std::collections::BTreeMap;

/// Integer fields of one point, keyed by field name.
pub type FieldMap = BTreeMap<String, i64>;

/// The `{"response": {"data": ...}}` wrapper around every PlexPy payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: ResponseBody<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.response.data
    }
}

/// One point written to InfluxDB. Built once per snapshot and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub measurement: String,
    /// Second precision.
    pub time: DateTime<Utc>,
    pub tags: BTreeMap<String, String>,
    pub fields: FieldMap,
}

impl MetricPoint {
    pub fn new(measurement: impl Into<String>, host: impl Into<String>, fields: FieldMap, time: DateTime<Utc>) -> Self {
        Self {
            measurement: measurement.into(),
            time: time.trunc_subsecs(0),
            tags: BTreeMap::from([("host".to_string(), host.into())]),
            fields,
        }
    }

    pub fn now(measurement: impl Into<String>, host: impl Into<String>, fields: FieldMap) -> Self {
        Self::new(measurement, host, fields, Utc::now())
    }

    /// ISO-8601, e.g. `2024-03-01T12:00:00Z`.
    pub fn timestamp(&self) -> String {
        self.time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// InfluxDB line protocol with an epoch-seconds timestamp, to be written
    /// with `precision=s`.
    pub fn to_line_protocol(&self) -> String {
        let mut line = escape(&self.measurement, &[',', ' ']);
        for (key, value) in &self.tags {
            line.push(',');
            line.push_str(&escape(key, &[',', '=', ' ']));
            line.push('=');
            line.push_str(&escape(value, &[',', '=', ' ']));
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}={}i", escape(key, &[',', '=', ' ']), value))
            .collect();
        line.push(' ');
        line.push_str(&fields.join(","));
        line.push(' ');
        line.push_str(&self.time.timestamp().to_string());
        line
    }
}

fn escape(raw: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\\' || special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// PlexPy reports counts either as JSON numbers or as numeric strings.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Float(f64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => Ok(value),
        IntOrString::Float(value) => Ok(value.trunc() as i64),
        IntOrString::Str(value) => value
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {value:?}"))),
    }
}

/// Strings that may arrive as `null` or as bare numbers; `null` becomes empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(value) => Ok(value),
        serde_json::Value::Number(value) => Ok(value.to_string()),
        serde_json::Value::Bool(value) => Ok(value.to_string()),
        other => Err(de::Error::custom(format!("expected a string, got {other}"))),
    }
}
