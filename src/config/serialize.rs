use super::{ConfigError, MenuItem};

/// Produce a declarative document that re-parses to an equivalent tree.
/// Internal ids are never emitted and absent optionals are omitted, so the
/// output stays minimal and diffable.
pub fn serialize_items(items: &[MenuItem]) -> Result<String, ConfigError> {
    serde_yaml::to_string(items).map_err(ConfigError::Encode)
}
