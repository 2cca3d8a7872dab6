//! Feature lifecycle orchestration.
//!
//! A [`Mod`] owns a registry of feature types partitioned by [`Side`]. Running a side
//! instantiates its features in priority order, applies persisted configuration,
//! executes the deferred boot steps of enabled features and finally calls
//! [`Feature::run`] on every enabled feature.
//!
//! ## Example
//!
//! ```rust
//! use modkit_kernel::prelude::*;
//!
//! #[derive(Debug)]
//! struct Greeter;
//!
//! impl FeatureDefinition for Greeter {
//!     const META: FeatureMeta = FeatureMeta::new(Side::Common);
//! }
//!
//! impl Feature for Greeter {
//!     fn construct(_setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
//!         Ok(Self)
//!     }
//! }
//!
//! let mut host = Mod::builder().id("example").build().unwrap();
//! host.add_feature::<Greeter>().unwrap();
//! host.run(Side::Common).unwrap();
//! assert_eq!(host.is_enabled::<Greeter>(), Some(true));
//! ```

pub mod boot;
pub mod config;
pub mod error;
pub mod event;
pub mod feature;
pub mod identifier;
pub mod log;
pub mod orchestrator;
pub mod prelude;
pub mod registry;

pub use crate::error::{ModError, ModErrorExt};
pub use crate::feature::{Feature, FeatureDefinition, FeatureSetup};
pub use crate::orchestrator::{Mod, ModBuilder};
pub use modkit_derive::{feature_definition, modkit_error};
pub use modkit_domain as domain;
pub use modkit_domain::side::{Side, Sides};
