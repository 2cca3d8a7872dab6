//! Feature descriptors and the live instances they produce.

use crate::boot::BootTable;
use crate::error::ModError;
use crate::feature::{Feature, FeatureError, FeatureSetup, short_type_name};
use crate::log::ModLog;
use fxhash::FxHashMap;
use modkit_domain::feature::FeatureMeta;
use modkit_domain::side::Side;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

type Constructor =
    Box<dyn Fn(&mut FeatureSetup<'_>) -> Result<Box<dyn Feature>, FeatureError> + Send + Sync>;

/// A registered feature type that has not been instantiated yet.
pub(crate) struct FeatureDescriptor {
    key: TypeId,
    name: &'static str,
    meta: FeatureMeta,
    constructor: Constructor,
}

impl FeatureDescriptor {
    pub(crate) fn new<F, C>(meta: FeatureMeta, constructor: C) -> Self
    where
        F: Feature,
        C: Fn(&mut FeatureSetup<'_>) -> Result<F, FeatureError> + Send + Sync + 'static,
    {
        Self {
            key: TypeId::of::<F>(),
            name: short_type_name::<F>(),
            meta,
            constructor: Box::new(move |setup| {
                constructor(setup).map(|feature| Box::new(feature) as Box<dyn Feature>)
            }),
        }
    }

    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn meta(&self) -> &FeatureMeta {
        &self.meta
    }
}

impl fmt::Debug for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureDescriptor")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// A live feature instance together with its metadata and enablement.
#[derive(Debug)]
pub struct FeatureEntry {
    key: TypeId,
    name: Cow<'static, str>,
    meta: FeatureMeta,
    enabled: bool,
    feature: Box<dyn Feature>,
}

impl FeatureEntry {
    fn new(key: TypeId, meta: FeatureMeta, feature: Box<dyn Feature>) -> Self {
        Self { key, name: feature.name(), meta, enabled: meta.initial_enabled(), feature }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn meta(&self) -> &FeatureMeta {
        &self.meta
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.meta.side
    }

    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.meta.priority
    }

    #[must_use]
    pub const fn can_be_disabled(&self) -> bool {
        self.meta.can_be_disabled
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Changes enablement. Features that cannot be disabled stay enabled.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled || !self.meta.can_be_disabled;
    }

    #[must_use]
    pub fn feature(&self) -> &dyn Feature {
        &*self.feature
    }

    pub fn feature_mut(&mut self) -> &mut dyn Feature {
        &mut *self.feature
    }

    #[must_use]
    pub fn is<F: Feature>(&self) -> bool {
        self.key == TypeId::of::<F>()
    }

    #[must_use]
    pub fn downcast_ref<F: Feature>(&self) -> Option<&F> {
        let any: &dyn Any = &*self.feature;
        any.downcast_ref::<F>()
    }

    pub fn downcast_mut<F: Feature>(&mut self) -> Option<&mut F> {
        let any: &mut dyn Any = &mut *self.feature;
        any.downcast_mut::<F>()
    }

    pub(crate) const fn key(&self) -> TypeId {
        self.key
    }

    pub(crate) fn label(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}

/// Constructed instances, per side in construction order, plus the type index.
#[derive(Debug, Default)]
pub(crate) struct Instances {
    by_side: BTreeMap<Side, Vec<FeatureEntry>>,
    index: FxHashMap<TypeId, (Side, usize)>,
}

impl Instances {
    fn insert(&mut self, entry: FeatureEntry) {
        let side = entry.side();
        let list = self.by_side.entry(side).or_default();
        self.index.insert(entry.key, (side, list.len()));
        list.push(entry);
    }

    pub(crate) fn entry(&self, key: TypeId) -> Option<&FeatureEntry> {
        let (side, position) = self.index.get(&key)?;
        self.by_side.get(side)?.get(*position)
    }

    pub(crate) fn get<F: Feature>(&self) -> Option<&F> {
        self.entry(TypeId::of::<F>())?.downcast_ref::<F>()
    }

    pub(crate) fn side(&self, side: Side) -> &[FeatureEntry] {
        self.by_side.get(&side).map(Vec::as_slice).unwrap_or_default()
    }

    fn side_mut(&mut self, side: Side) -> &mut [FeatureEntry] {
        self.by_side.get_mut(&side).map(Vec::as_mut_slice).unwrap_or_default()
    }
}

/// Every feature type known to one orchestrator.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    descriptors: Vec<FeatureDescriptor>,
    instances: Instances,
}

impl Registry {
    /// Records a descriptor. A type can be registered once.
    pub(crate) fn add(&mut self, descriptor: FeatureDescriptor) -> Result<(), ModError> {
        if self.descriptor(descriptor.key).is_some() {
            return Err(ModError::DuplicateFeature {
                feature: Cow::Borrowed(descriptor.name),
                context: None,
            });
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub(crate) fn descriptor(&self, key: TypeId) -> Option<&FeatureDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    pub(crate) fn descriptor_count(&self, side: Side) -> usize {
        self.descriptors.iter().filter(|d| d.meta.side == side).count()
    }

    /// Constructs every descriptor of `side` in priority order.
    ///
    /// Boot steps registered by a constructor are moved into `boot` once that constructor
    /// succeeds. The first failing constructor aborts the side; instances built before it
    /// stay registered.
    pub(crate) fn instantiate(
        &mut self,
        side: Side,
        log: &ModLog,
        boot: &mut BootTable,
    ) -> Result<usize, ModError> {
        let order = priority_order(self.descriptors.iter().map(|d| &d.meta), side);

        for &position in &order {
            let descriptor = &self.descriptors[position];
            let mut steps = Vec::new();

            let built = {
                let mut setup = FeatureSetup::new(
                    log,
                    &self.instances,
                    descriptor.meta,
                    descriptor.name,
                    &mut steps,
                );
                (descriptor.constructor)(&mut setup)
            };
            let feature = built.map_err(|source| ModError::Construction {
                feature: Cow::Borrowed(descriptor.name),
                side,
                source,
                context: None,
            })?;

            log.debug(format_args!(
                "Constructed {side} feature {} (priority {}, {} boot step(s))",
                descriptor.name,
                descriptor.meta.priority,
                steps.len()
            ));
            boot.extend(descriptor.key, steps);
            self.instances.insert(FeatureEntry::new(descriptor.key, descriptor.meta, feature));
        }

        Ok(order.len())
    }

    pub(crate) const fn instances(&self) -> &Instances {
        &self.instances
    }

    pub(crate) fn features(&self, side: Side) -> &[FeatureEntry] {
        self.instances.side(side)
    }

    pub(crate) fn features_mut(&mut self, side: Side) -> &mut [FeatureEntry] {
        self.instances.side_mut(side)
    }

    pub(crate) fn features_by_side(&self) -> impl Iterator<Item = (Side, &[FeatureEntry])> {
        self.instances
            .by_side
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(side, entries)| (*side, entries.as_slice()))
    }
}

/// Positions of the descriptors of `side`, stably sorted by ascending priority.
pub(crate) fn priority_order<'a>(
    metas: impl IntoIterator<Item = &'a FeatureMeta>,
    side: Side,
) -> Vec<usize> {
    let mut order: Vec<(usize, i32)> = metas
        .into_iter()
        .enumerate()
        .filter(|(_, meta)| meta.side == side)
        .map(|(position, meta)| (position, meta.priority))
        .collect();
    order.sort_by_key(|&(_, priority)| priority);
    order.into_iter().map(|(position, _)| position).collect()
}
