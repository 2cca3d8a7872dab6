//! Deferred boot actions, keyed by the feature type that registered them.

use crate::error::ModError;
use crate::feature::FeatureError;
use crate::log::ModLog;
use crate::registry::FeatureEntry;
use fxhash::FxHashMap;
use modkit_domain::side::Side;
use std::any::TypeId;
use std::fmt;

/// A one-shot action executed during the boot phase of its feature's side.
pub type BootStep = Box<dyn FnOnce() -> Result<(), FeatureError> + Send + 'static>;

#[derive(Default)]
pub(crate) struct BootTable {
    steps: FxHashMap<TypeId, Vec<BootStep>>,
}

impl BootTable {
    pub(crate) fn add(&mut self, key: TypeId, step: BootStep) {
        self.steps.entry(key).or_default().push(step);
    }

    pub(crate) fn extend(&mut self, key: TypeId, steps: Vec<BootStep>) {
        if !steps.is_empty() {
            self.steps.entry(key).or_default().extend(steps);
        }
    }

    pub(crate) fn pending(&self, key: TypeId) -> usize {
        self.steps.get(&key).map_or(0, Vec::len)
    }

    /// Executes the steps of `features` in construction order.
    ///
    /// Every step is consumed: those of disabled features are dropped without running.
    /// Returns the number of executed steps.
    pub(crate) fn run(
        &mut self,
        side: Side,
        features: &[FeatureEntry],
        log: &ModLog,
    ) -> Result<usize, ModError> {
        let mut executed = 0;

        for entry in features {
            let Some(steps) = self.steps.remove(&entry.key()) else { continue };

            if !entry.enabled() {
                log.debug(format_args!(
                    "Skipping {} boot step(s) of disabled feature {}",
                    steps.len(),
                    entry.name()
                ));
                continue;
            }

            for step in steps {
                step().map_err(|source| ModError::Boot {
                    feature: entry.label(),
                    side,
                    source,
                    context: None,
                })?;
                executed += 1;
            }
        }

        Ok(executed)
    }
}

impl fmt::Debug for BootTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootTable")
            .field("pending", &self.steps.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
