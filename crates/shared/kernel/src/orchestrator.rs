//! The per-mod lifecycle orchestrator.

use crate::boot::BootTable;
use crate::config::{ConfigStore, MemoryConfigStore};
use crate::error::{ModError, ModErrorExt};
use crate::feature::{Feature, FeatureDefinition, FeatureError, FeatureSetup, short_type_name};
use crate::identifier::{ResourceId, validate_namespace};
use crate::log::{LOG_TARGET, ModLog};
use crate::registry::{FeatureDescriptor, FeatureEntry, Registry};
use modkit_domain::feature::FeatureMeta;
use modkit_domain::side::{Side, Sides};
use private::Sealed;
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug)]
pub struct NoId;
#[derive(Debug)]
pub struct WithId(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoId {}
impl Sealed for WithId {}

/// Builder for [`Mod`]. The id is required before [`ModBuilder::build`] is available.
pub struct ModBuilder<I: Sealed = NoId> {
    id: I,
    name: Option<String>,
    config: Option<Box<dyn ConfigStore>>,
}

impl ModBuilder<NoId> {
    /// Sets the mod id, which is also the namespace of its identifiers.
    pub fn id(self, id: impl Into<String>) -> ModBuilder<WithId> {
        ModBuilder { id: WithId(id.into()), name: self.name, config: self.config }
    }
}

impl<I: Sealed> ModBuilder<I> {
    /// Sets the human-readable name used in logs. Defaults to the id.
    #[must_use = "The builder must be configured before it can be used to build the mod."]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets where feature options are loaded from and saved to.
    /// Defaults to a [`MemoryConfigStore`].
    #[must_use = "The builder must be configured before it can be used to build the mod."]
    pub fn config(mut self, store: impl ConfigStore + 'static) -> Self {
        self.config = Some(Box::new(store));
        self
    }
}

impl ModBuilder<WithId> {
    /// Validates the id and creates the orchestrator.
    ///
    /// # Errors
    /// Returns [`ModError::InvalidId`] if the id is empty or contains characters
    /// outside `[a-z0-9_.-]`.
    pub fn build(self) -> Result<Mod, ModError> {
        let id = self.id.0;
        validate_namespace(&id).map_err(|err| ModError::InvalidId {
            message: err.to_string().into(),
            context: None,
        })?;

        let name = self.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| id.clone());
        let log = ModLog::new(id.as_str(), name.as_str());

        Ok(Mod {
            log,
            config: self.config.unwrap_or_else(|| Box::new(MemoryConfigStore::new())),
            registry: Registry::default(),
            boot: BootTable::default(),
            completed: Sides::empty(),
        })
    }
}

impl<I: Sealed + fmt::Debug> fmt::Debug for ModBuilder<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModBuilder")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("custom_config", &self.config.is_some())
            .finish()
    }
}

/// Owns the features of one mod and drives them through their lifecycle.
///
/// Register every feature type with [`Mod::add_feature`], then call [`Mod::run`] once
/// per side. Each side is independent: running `Client` never touches `Server` features.
pub struct Mod {
    log: ModLog,
    config: Box<dyn ConfigStore>,
    registry: Registry,
    boot: BootTable,
    completed: Sides,
}

impl Mod {
    #[must_use = "The builder must be configured before it can be used to build the mod."]
    pub fn builder() -> ModBuilder {
        ModBuilder { id: NoId, name: None, config: None }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.log.id()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.log.name()
    }

    #[must_use]
    pub const fn log(&self) -> &ModLog {
        &self.log
    }

    /// Builds an identifier in this mod's namespace.
    ///
    /// # Errors
    /// Returns [`ModError::Identifier`] when `path` is not a valid identifier path.
    pub fn identifier(&self, path: impl AsRef<str>) -> Result<ResourceId, ModError> {
        Ok(ResourceId::new(self.id(), path)?)
    }

    /// Registers a feature type using its declared metadata and [`Feature::construct`].
    ///
    /// # Errors
    /// See [`Mod::add_feature_with`].
    pub fn add_feature<F>(&mut self) -> Result<(), ModError>
    where
        F: Feature + FeatureDefinition,
    {
        self.add_feature_with::<F, _>(F::META, F::construct)
    }

    /// Registers a feature type with explicit metadata and constructor.
    ///
    /// # Errors
    /// Returns [`ModError::DuplicateFeature`] if the type is already registered, or
    /// [`ModError::SideAlreadyRun`] if its side has already been run.
    pub fn add_feature_with<F, C>(&mut self, meta: FeatureMeta, constructor: C) -> Result<(), ModError>
    where
        F: Feature,
        C: Fn(&mut FeatureSetup<'_>) -> Result<F, FeatureError> + Send + Sync + 'static,
    {
        let name = short_type_name::<F>();

        if self.has_run(meta.side) {
            return Err(ModError::SideAlreadyRun {
                side: meta.side,
                context: Some(format!("cannot register {name}").into()),
            });
        }

        if let Err(err) = self.registry.add(FeatureDescriptor::new::<F, C>(meta, constructor)) {
            self.log.warn(format_args!("Feature {name} is already registered, ignoring"));
            return Err(err);
        }

        tracing::debug!(
            target: LOG_TARGET,
            mod_id = %self.id(),
            side = %meta.side,
            feature = name,
            priority = meta.priority,
            "Feature registered"
        );
        Ok(())
    }

    /// Schedules `step` for the boot phase of `F`, which must be registered and whose
    /// side must not have run yet.
    ///
    /// # Errors
    /// Returns [`ModError::FeatureNotFound`] for unregistered types and
    /// [`ModError::SideAlreadyRun`] when the boot phase is already over.
    pub fn add_boot_step<F, S>(&mut self, step: S) -> Result<(), ModError>
    where
        F: Feature,
        S: FnOnce() -> Result<(), FeatureError> + Send + 'static,
    {
        let key = TypeId::of::<F>();
        let Some(descriptor) = self.registry.descriptor(key) else {
            return Err(not_found::<F>());
        };

        let side = descriptor.meta().side;
        if self.has_run(side) {
            return Err(ModError::SideAlreadyRun {
                side,
                context: Some(format!("cannot add a boot step to {}", descriptor.name()).into()),
            });
        }

        self.boot.add(key, Box::new(step));
        Ok(())
    }

    /// Number of boot steps of `F` still waiting for its side to boot.
    #[must_use]
    pub fn pending_boot_steps<F: Feature>(&self) -> usize {
        self.boot.pending(TypeId::of::<F>())
    }

    #[must_use]
    pub fn has_run(&self, side: Side) -> bool {
        self.completed.contains(Sides::from(side))
    }

    /// Sets up, configures, boots and runs every feature of `side`.
    ///
    /// A side runs at most once. Construction, configuration, boot and run failures are
    /// fatal for the side: the remaining features are left untouched and the error is
    /// returned.
    ///
    /// # Errors
    /// [`ModError::SideAlreadyRun`], [`ModError::Construction`], [`ModError::Config`],
    /// [`ModError::Boot`] or [`ModError::Run`].
    pub fn run(&mut self, side: Side) -> Result<(), ModError> {
        if self.has_run(side) {
            return Err(ModError::SideAlreadyRun { side, context: None });
        }
        self.completed |= Sides::from(side);

        let count = self.registry.descriptor_count(side);
        if count == 0 {
            self.log.info(format_args!(
                "No {side} features to set up for {}, skipping",
                self.name()
            ));
            return Ok(());
        }

        self.log.info(format_args!("Setting up {count} {side} feature(s) for {}", self.name()));
        self.registry.instantiate(side, &self.log, &mut self.boot)?;

        self.log.info(format_args!("Configuring {} {side}", self.name()));
        let entries = self.registry.features_mut(side);
        self.config
            .populate_from_disk(side, entries)
            .context(format!("Loading {side} options"))?;
        self.config.write_to_disk(side, entries).context(format!("Saving {side} options"))?;

        self.log.info(format_args!("Booting up {} {side}", self.name()));
        let booted = self.boot.run(side, self.registry.features(side), &self.log)?;
        self.log.debug(format_args!("Executed {booted} {side} boot step(s)"));

        self.log.info(format_args!("Running {side} features for {}", self.name()));
        for entry in self.registry.features(side) {
            if entry.enabled() {
                self.log.info(format_args!("✔ Running feature {}", entry.name()));
                entry.feature().run(self).map_err(|source| ModError::Run {
                    feature: entry.label(),
                    side,
                    source,
                    context: None,
                })?;
            } else {
                self.log.info(format_args!("✖ Not running feature {}", entry.name()));
            }
        }

        Ok(())
    }

    /// Runs each side of `sides` in `Common`, `Client`, `Server` order, stopping at the
    /// first failure.
    ///
    /// # Errors
    /// The first error returned by [`Mod::run`].
    pub fn run_sides(&mut self, sides: Sides) -> Result<(), ModError> {
        for side in sides.sides() {
            self.run(side)?;
        }
        Ok(())
    }

    /// The instance of `F`.
    ///
    /// # Errors
    /// Returns [`ModError::FeatureNotFound`] if `F` has not been instantiated.
    pub fn feature<F: Feature>(&self) -> Result<&F, ModError> {
        self.try_feature::<F>().ok_or_else(not_found::<F>)
    }

    #[must_use]
    pub fn try_feature<F: Feature>(&self) -> Option<&F> {
        self.registry.instances().get::<F>()
    }

    /// Instances of `side` in construction order.
    #[must_use]
    pub fn features(&self, side: Side) -> &[FeatureEntry] {
        self.registry.features(side)
    }

    /// Every side with instances, in side order.
    pub fn features_by_side(&self) -> impl Iterator<Item = (Side, &[FeatureEntry])> {
        self.registry.features_by_side()
    }

    /// Enablement of `F`, or `None` before it has been instantiated.
    #[must_use]
    pub fn is_enabled<F: Feature>(&self) -> Option<bool> {
        self.registry.instances().entry(TypeId::of::<F>()).map(FeatureEntry::enabled)
    }
}

impl fmt::Debug for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mod")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("completed", &self.completed)
            .field("registry", &self.registry)
            .field("boot", &self.boot)
            .finish_non_exhaustive()
    }
}

fn not_found<F: Feature>() -> ModError {
    ModError::FeatureNotFound { feature: Cow::Borrowed(short_type_name::<F>()), context: None }
}
