use crate::constants::{DEFAULT_MOD_ID, DEFAULT_OPTIONS_DIR};
use crate::side::Sides;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Settings of the process hosting a mod.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfigInner {
    /// Id of the hosted mod, also its identifier namespace and options file prefix.
    pub id: String,
    /// Display name; the id is used when absent.
    pub name: Option<String>,
    /// Sides this process runs.
    pub sides: Sides,
    pub options: OptionsConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct HostConfig {
    #[serde(flatten, default)]
    inner: Arc<HostConfigInner>,
}

impl Deref for HostConfig {
    type Target = HostConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for HostConfig {
    fn deref_mut(&mut self) -> &mut HostConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where and how feature options are persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub dir: PathBuf,
    /// Prefix for environment overrides of feature options, e.g. `CHARMONY`
    /// enables `CHARMONY__DIAGNOSTICS__DEBUG_MODE=true`.
    pub env_prefix: Option<String>,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub console: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for HostConfigInner {
    fn default() -> Self {
        Self {
            id: DEFAULT_MOD_ID.to_owned(),
            name: None,
            sides: Sides::default(),
            options: OptionsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(DEFAULT_OPTIONS_DIR), env_prefix: None }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, dir: None, json: false }
    }
}
