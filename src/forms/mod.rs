use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod categories;
pub mod preview;
pub mod video_refs;

/// HTML selects submit the "none" choice as an empty string; map it to `None`
/// instead of failing integer deserialization.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
