//! Persisted feature options and host configuration loading.
//!
//! Each feature owns one section of options named after it (snake case). The
//! orchestrator keeps the `enabled` key of every section; everything else belongs
//! to the feature's [`save_options`](crate::Feature::save_options) and
//! [`load_options`](crate::Feature::load_options).

mod error;
mod file;
mod memory;

pub use self::error::{ConfigError, ConfigErrorExt};
pub use self::file::FileConfigStore;
pub use self::memory::MemoryConfigStore;

use crate::registry::FeatureEntry;
use ::config::{Config, Environment, File};
use modkit_domain::constants::ENABLED_KEY;
use modkit_domain::side::Side;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use toml::Value;
use tracing::info;

/// Key/value options of one feature.
pub type OptionTable = toml::Table;

/// Source and sink of feature options for a mod.
pub trait ConfigStore: Send + Sync {
    /// Applies stored enablement and options to freshly constructed features.
    ///
    /// # Errors
    /// Fails when the backing store cannot be read or holds malformed values.
    fn populate_from_disk(&self, side: Side, features: &mut [FeatureEntry]) -> Result<(), ConfigError>;

    /// Persists the current enablement and options of `features`.
    ///
    /// # Errors
    /// Fails when the options cannot be encoded or written.
    fn write_to_disk(&self, side: Side, features: &[FeatureEntry]) -> Result<(), ConfigError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn populate_from_disk(&self, side: Side, features: &mut [FeatureEntry]) -> Result<(), ConfigError> {
        (**self).populate_from_disk(side, features)
    }

    fn write_to_disk(&self, side: Side, features: &[FeatureEntry]) -> Result<(), ConfigError> {
        (**self).write_to_disk(side, features)
    }
}

/// Encodes an options struct into a table, for [`crate::Feature::save_options`].
///
/// # Errors
/// Returns [`ConfigError::Serialize`] if the value cannot be represented in TOML, or
/// [`ConfigError::Internal`] if it does not encode to a table.
pub fn encode_options<T: Serialize>(options: &T) -> Result<OptionTable, ConfigError> {
    match Value::try_from(options)? {
        Value::Table(table) => Ok(table),
        other => Err(ConfigError::Internal {
            message: format!("options must encode to a table, got {}", other.type_str()).into(),
            context: None,
        }),
    }
}

/// Decodes a table into an options struct, for [`crate::Feature::load_options`].
///
/// Use `#[serde(default)]` on the struct so missing keys keep their defaults. Values are
/// coerced to the field types, so environment overrides (always strings) fit numeric and
/// boolean options while string options keep their exact text.
///
/// # Errors
/// Returns [`ConfigError::Source`] when the values do not fit `T`.
pub fn decode_options<T: DeserializeOwned>(options: OptionTable) -> Result<T, ConfigError> {
    Config::try_from(&options)
        .and_then(|config| config.try_deserialize())
        .context("Failed to decode options")
}

/// Section name of a feature: its name in snake case (`ContainerTooltips` → `container_tooltips`).
#[must_use]
pub fn section_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                key.push('_');
            }
            key.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            key.push(c);
        } else if !key.ends_with('_') && !key.is_empty() {
            key.push('_');
        }
        previous = Some(c);
    }

    key
}

/// Applies one stored section to a feature. Absent `enabled` falls back to the default.
pub(crate) fn apply_section(
    entry: &mut FeatureEntry,
    section: Option<OptionTable>,
) -> Result<(), ConfigError> {
    let mut section = section.unwrap_or_default();

    let enabled = match section.remove(ENABLED_KEY) {
        Some(Value::Boolean(enabled)) => enabled,
        Some(Value::String(raw)) => parse_bool(entry.name(), &raw)?,
        Some(other) => {
            return Err(ConfigError::Internal {
                message: format!("'{ENABLED_KEY}' must be a boolean, got {}", other.type_str())
                    .into(),
                context: Some(format!("section {}", section_key(entry.name())).into()),
            });
        },
        None => entry.meta().enabled_by_default,
    };

    entry.set_enabled(enabled);
    entry.feature_mut().load_options(section)
}

/// Builds the stored section of a feature: `enabled` (when it can be disabled) plus its options.
pub(crate) fn collect_section(entry: &FeatureEntry) -> Result<OptionTable, ConfigError> {
    let mut section = OptionTable::new();
    if entry.can_be_disabled() {
        section.insert(ENABLED_KEY.to_owned(), Value::Boolean(entry.enabled()));
    }
    for (key, value) in entry.feature().save_options()? {
        if key != ENABLED_KEY {
            section.insert(key, value);
        }
    }
    Ok(section)
}

/// Splits a stored document into feature sections and applies them in order.
pub(crate) fn apply_document(
    mut document: OptionTable,
    features: &mut [FeatureEntry],
) -> Result<(), ConfigError> {
    for entry in features {
        let key = section_key(entry.name());
        let section = match document.remove(&key) {
            Some(Value::Table(table)) => Some(table),
            Some(other) => {
                return Err(ConfigError::Internal {
                    message: format!("section '{key}' must be a table, got {}", other.type_str())
                        .into(),
                    context: None,
                });
            },
            None => None,
        };
        apply_section(entry, section)?;
    }
    Ok(())
}

/// Builds the stored document of `features`, one section per feature.
pub(crate) fn collect_document(features: &[FeatureEntry]) -> Result<OptionTable, ConfigError> {
    let mut document = OptionTable::new();
    for entry in features {
        document.insert(section_key(entry.name()), Value::Table(collect_section(entry)?));
    }
    Ok(document)
}

fn parse_bool(feature: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Internal {
            message: format!("'{raw}' is not a valid value for '{ENABLED_KEY}'").into(),
            context: Some(format!("section {}", section_key(feature)).into()),
        }),
    }
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// 1. **Base File**: settings from `path` (any format the `config` crate recognizes by extension).
/// 2. **Environment Overrides**: variables prefixed with `<prefix>__`. Nested structures are
///    accessed using double underscores (e.g., `MODKIT__LOG__LEVEL` maps to `log.level`).
///
/// # Errors
/// Returns [`ConfigError::Source`] if the file cannot be read or the merged values do not
/// match the structure of `T`.
///
/// # Example
/// ```rust
/// use modkit_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct HostSettings {
///     name: String,
/// }
///
/// let cfg: HostSettings = load_config("config/missing.toml", "MODKIT").unwrap_or_default();
/// ```
pub fn load_config<T>(path: impl AsRef<Path>, prefix: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    info!("Loading config from {}", path.display());

    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(Environment::with_prefix(prefix).separator("__"))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Options {
        radius: u32,
        label: String,
    }

    #[test]
    fn test_section_key() {
        assert_eq!(section_key("ContainerTooltips"), "container_tooltips");
        assert_eq!(section_key("Diagnostics"), "diagnostics");
        assert_eq!(section_key("Grid3D"), "grid3_d");
        assert_eq!(section_key("already_snake"), "already_snake");
    }

    #[test]
    fn test_decode_fills_missing_keys_with_defaults() {
        let mut table = OptionTable::new();
        table.insert("radius".to_owned(), Value::Integer(4));

        let options: Options = decode_options(table).unwrap();
        assert_eq!(options, Options { radius: 4, label: String::new() });
    }

    #[test]
    fn test_decode_coerces_strings_to_field_types() {
        let mut table = OptionTable::new();
        table.insert("radius".to_owned(), Value::String("12".to_owned()));
        table.insert("label".to_owned(), Value::String("007".to_owned()));

        let options: Options = decode_options(table).unwrap();
        assert_eq!(options, Options { radius: 12, label: "007".to_owned() });

        let mut table = OptionTable::new();
        table.insert("radius".to_owned(), Value::String("many".to_owned()));
        assert!(decode_options::<Options>(table).is_err());
    }

    #[test]
    fn test_encode_rejects_non_tables() {
        assert!(encode_options(&5u32).is_err());
        let table = encode_options(&Options { radius: 2, label: "x".to_owned() }).unwrap();
        assert_eq!(table.get("radius"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("Feature", " TRUE ").unwrap());
        assert!(!parse_bool("Feature", "off").unwrap());
        assert!(parse_bool("Feature", "maybe").is_err());
    }
}
