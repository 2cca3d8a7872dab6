use std::fmt::Display;
use std::sync::Arc;

/// Tracing target of every event emitted through [`ModLog`].
pub const LOG_TARGET: &str = "modkit";

/// Logging handle bound to one mod.
///
/// Cloning is cheap; features keep a clone to print banners and diagnostics tagged
/// with the owning mod's id.
#[derive(Debug, Clone)]
pub struct ModLog {
    id: Arc<str>,
    name: Arc<str>,
}

impl ModLog {
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self { id: id.into(), name: name.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, message: impl Display) {
        tracing::debug!(target: LOG_TARGET, mod_id = %self.id, "{message}");
    }

    pub fn info(&self, message: impl Display) {
        tracing::info!(target: LOG_TARGET, mod_id = %self.id, "{message}");
    }

    pub fn warn(&self, message: impl Display) {
        tracing::warn!(target: LOG_TARGET, mod_id = %self.id, "{message}");
    }

    pub fn error(&self, message: impl Display) {
        tracing::error!(target: LOG_TARGET, mod_id = %self.id, "{message}");
    }
}
