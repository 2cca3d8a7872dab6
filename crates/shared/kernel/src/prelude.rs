//! Everything a feature crate usually needs.

pub use crate::config::{ConfigError, ConfigStore, OptionTable, decode_options, encode_options};
pub use crate::error::ModError;
pub use crate::feature::{Feature, FeatureDefinition, FeatureError, FeatureErrorExt, FeatureSetup};
pub use crate::identifier::ResourceId;
pub use crate::log::ModLog;
pub use crate::orchestrator::Mod;
pub use crate::registry::FeatureEntry;
pub use modkit_derive::feature_definition;
pub use modkit_domain::feature::FeatureMeta;
pub use modkit_domain::side::{Side, Sides};
