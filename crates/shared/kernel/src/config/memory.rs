use super::{ConfigError, ConfigStore, OptionTable, apply_document, collect_document};
use crate::registry::FeatureEntry;
use fxhash::FxHashMap;
use modkit_domain::side::Side;
use parking_lot::Mutex;

/// Keeps option documents in memory, one per side. Nothing touches the disk.
///
/// This is the default store of a [`crate::Mod`]. Seed it with [`MemoryConfigStore::set`]
/// to simulate previously saved options.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    documents: Mutex<FxHashMap<Side, OptionTable>>,
}

impl MemoryConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored document of `side`.
    pub fn set(&self, side: Side, document: OptionTable) {
        self.documents.lock().insert(side, document);
    }

    /// Snapshot of the stored document of `side`.
    #[must_use]
    pub fn get(&self, side: Side) -> Option<OptionTable> {
        self.documents.lock().get(&side).cloned()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn populate_from_disk(&self, side: Side, features: &mut [FeatureEntry]) -> Result<(), ConfigError> {
        let document = self.get(side).unwrap_or_default();
        apply_document(document, features)
    }

    fn write_to_disk(&self, side: Side, features: &[FeatureEntry]) -> Result<(), ConfigError> {
        let document = collect_document(features)?;
        self.set(side, document);
        Ok(())
    }
}
