use super::{
    lenient_int,
    lenient_string,
    FieldMap,
};
use serde::Deserialize;

const COUNT_SUFFIX: &str = "_count";

/// One entry of `get_libraries`' `response.data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Library {
    #[serde(deserialize_with = "lenient_string")]
    pub section_name: String,
    #[serde(deserialize_with = "lenient_int")]
    pub count: i64,
}

/// Lower-cases, drops everything but ASCII letters, digits and whitespace,
/// trims, and joins the remaining words with `_`.
///
/// Underscores count as word separators, so an already normalized name maps
/// to itself.
pub fn normalize_library_name(section_name: &str) -> String {
    let cleaned: String = section_name
        .chars()
        .map(|c| if c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Field name for a library's item count, e.g. `"TV Shows"` -> `tv_shows_count`.
pub fn library_field_key(section_name: &str) -> String {
    format!("{}{COUNT_SUFFIX}", normalize_library_name(section_name))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySnapshot {
    /// Item count per derived field key. On a key collision the library
    /// listed last wins.
    pub counts: FieldMap,
    /// Number of libraries reported, collisions included.
    pub library_count: i64,
}

impl LibrarySnapshot {
    pub fn from_libraries(libraries: &[Library]) -> Self {
        let mut counts = FieldMap::new();
        for library in libraries {
            let key = library_field_key(&library.section_name);
            if let Some(previous) = counts.insert(key, library.count) {
                debug!(
                    section_name = %library.section_name,
                    previous,
                    "library key collision, keeping the later count"
                );
            }
        }

        Self {
            counts,
            library_count: libraries.len() as i64,
        }
    }

    pub fn fields(&self) -> FieldMap {
        let mut fields = self.counts.clone();
        fields.insert("library_count".to_string(), self.library_count);
        fields
    }
}
