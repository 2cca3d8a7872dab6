/// Priority assigned to features that do not declare one.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Option key holding a feature's enablement in persisted configuration.
pub const ENABLED_KEY: &str = "enabled";

/// Directory holding per-mod option files when nothing else is configured.
pub const DEFAULT_OPTIONS_DIR: &str = "config";

/// Extension of persisted option files.
pub const OPTIONS_EXTENSION: &str = "toml";

/// Environment prefix for host-level settings (e.g. `MODKIT__LOG__LEVEL`).
pub const HOST_ENV_PREFIX: &str = "MODKIT";

/// Mod id used by hosts that do not configure one.
pub const DEFAULT_MOD_ID: &str = "modkit";
