//! The contract every pluggable feature implements.

mod error;

pub use self::error::{FeatureError, FeatureErrorExt};

use crate::boot::BootStep;
use crate::config::{ConfigError, OptionTable};
use crate::identifier::ResourceId;
use crate::log::ModLog;
use crate::orchestrator::Mod;
use crate::registry::Instances;
use modkit_domain::feature::FeatureMeta;
use modkit_domain::side::Side;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// Static metadata of a feature type, usually generated by
/// [`feature_definition`](crate::feature_definition).
pub trait FeatureDefinition {
    const META: FeatureMeta;
}

/// A pluggable unit of behavior owned by a [`Mod`].
///
/// Instances are created once per orchestrator when their side runs and live until the
/// orchestrator is dropped. Only enabled features are booted and run.
pub trait Feature: Any + Send + Sync + fmt::Debug {
    /// Builds the instance. Dependencies constructed earlier on the same side (or on a
    /// side that already ran) are reachable through [`FeatureSetup::feature`].
    ///
    /// # Errors
    /// Any error aborts the whole side.
    fn construct(setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError>
    where
        Self: Sized;

    /// Display name, used in logs and as the configuration section.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }

    /// Entry point invoked once, after configuration and boot, when enabled.
    ///
    /// # Errors
    /// An error stops the remaining features of the side.
    fn run(&self, _host: &Mod) -> Result<(), FeatureError> {
        Ok(())
    }

    /// Options to persist. `enabled` is managed by the orchestrator and must not be included.
    ///
    /// # Errors
    /// Fails when the options cannot be encoded.
    fn save_options(&self) -> Result<OptionTable, ConfigError> {
        Ok(OptionTable::new())
    }

    /// Applies persisted options. Keys missing from `options` keep their defaults.
    ///
    /// # Errors
    /// Fails when the stored values do not fit the feature's options.
    fn load_options(&mut self, _options: OptionTable) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// The orchestrator's view handed to a feature constructor.
pub struct FeatureSetup<'a> {
    log: &'a ModLog,
    instances: &'a Instances,
    meta: FeatureMeta,
    name: &'static str,
    boot_steps: &'a mut Vec<BootStep>,
}

impl<'a> FeatureSetup<'a> {
    pub(crate) const fn new(
        log: &'a ModLog,
        instances: &'a Instances,
        meta: FeatureMeta,
        name: &'static str,
        boot_steps: &'a mut Vec<BootStep>,
    ) -> Self {
        Self { log, instances, meta, name, boot_steps }
    }

    #[must_use]
    pub fn mod_id(&self) -> &str {
        self.log.id()
    }

    #[must_use]
    pub const fn log(&self) -> &ModLog {
        self.log
    }

    #[must_use]
    pub const fn meta(&self) -> FeatureMeta {
        self.meta
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.meta.side
    }

    /// Type name of the feature being constructed.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    /// Builds an identifier in the mod's namespace.
    ///
    /// # Errors
    /// Returns [`FeatureError::Identifier`] when `path` is not a valid identifier path.
    pub fn identifier(&self, path: impl AsRef<str>) -> Result<ResourceId, FeatureError> {
        Ok(ResourceId::new(self.mod_id(), path)?)
    }

    /// Looks up an already constructed feature.
    ///
    /// # Errors
    /// Returns [`FeatureError::MissingDependency`] when `F` has not been constructed.
    /// Features of the same side are constructed in priority order, so a dependency
    /// needs a lower priority than its dependents.
    pub fn feature<F: Feature>(&self) -> Result<&'a F, FeatureError> {
        self.try_feature::<F>().ok_or_else(|| FeatureError::MissingDependency {
            feature: Cow::Borrowed(short_type_name::<F>()),
            context: Some(format!("required by {}", self.name).into()),
        })
    }

    #[must_use]
    pub fn try_feature<F: Feature>(&self) -> Option<&'a F> {
        self.instances.get::<F>()
    }

    /// Defers `step` until the boot phase of this side.
    ///
    /// Steps run in registration order and only if the feature is enabled once
    /// configuration has been applied.
    pub fn add_boot_step<S>(&mut self, step: S)
    where
        S: FnOnce() -> Result<(), FeatureError> + Send + 'static,
    {
        self.boot_steps.push(Box::new(step));
    }
}

impl fmt::Debug for FeatureSetup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSetup")
            .field("mod_id", &self.mod_id())
            .field("feature", &self.name)
            .field("meta", &self.meta)
            .field("boot_steps", &self.boot_steps.len())
            .finish_non_exhaustive()
    }
}

/// Last path segment of a type name without generic arguments,
/// e.g. `ContainerTooltips` for `charmony::client::ContainerTooltips<T>`.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split_once('<').map_or(full, |(base, _)| base);
    base.rsplit("::").next().unwrap_or(base)
}
