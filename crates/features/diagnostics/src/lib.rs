//! # Diagnostics
//!
//! A Common feature present in every mod. It cannot be disabled and exposes two switches
//! that other features read through [`Mod::feature`]:
//!
//! * `debug_mode`: more logging output and test-only code paths.
//! * `mixins_disable_mode`: features must skip their host patches, so mod conflicts can
//!   be narrowed down. A warning banner is logged while it is on.
//!
//! ```toml
//! [diagnostics]
//! debug_mode = false
//! mixins_disable_mode = false
//! ```

use modkit_kernel::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted switches of [`Diagnostics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsOptions {
    pub debug_mode: bool,
    pub mixins_disable_mode: bool,
}

#[feature_definition(
    side = Common,
    priority = -100,
    can_be_disabled = false,
    description = "Diagnostic tools: debug mode and mixin disable mode."
)]
#[derive(Debug)]
pub struct Diagnostics {
    options: DiagnosticsOptions,
    log: ModLog,
}

impl Diagnostics {
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.options.debug_mode
    }

    #[must_use]
    pub const fn mixins_disabled(&self) -> bool {
        self.options.mixins_disable_mode
    }

    #[must_use]
    pub const fn options(&self) -> DiagnosticsOptions {
        self.options
    }

    /// Logs `message` only while debug mode is on. Other features reach this through
    /// `host.try_feature::<Diagnostics>()`.
    pub fn debug(&self, message: impl std::fmt::Display) {
        if self.options.debug_mode {
            self.log.info(format_args!("[debug] {message}"));
        }
    }
}

impl Feature for Diagnostics {
    fn construct(setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
        Ok(Self { options: DiagnosticsOptions::default(), log: setup.log().clone() })
    }

    fn run(&self, host: &Mod) -> Result<(), FeatureError> {
        if self.options.debug_mode {
            host.log().info(format_args!("Debug mode is enabled for {}", host.name()));
            self.debug(format_args!("{:?}", self.options));
        }
        if self.options.mixins_disable_mode {
            host.log().warn(banner(host.name()));
        }
        Ok(())
    }

    fn save_options(&self) -> Result<OptionTable, ConfigError> {
        encode_options(&self.options)
    }

    fn load_options(&mut self, options: OptionTable) -> Result<(), ConfigError> {
        self.options = decode_options(options)?;
        Ok(())
    }
}

fn banner(name: &str) -> String {
    let title = format!("{} IS RUNNING IN MIXIN DISABLE MODE", name.to_uppercase());
    let rule = "-".repeat(title.len().max(60) + 8);
    format!(
        "\n\n{rule}\n    {title}\n{rule}\n\n\
         No {name} features will work as expected! This mode is used to find\n\
         out whether {name} conflicts with another mod.\n\n\
         Remove mods from the pack one at a time, toggling mixin disable mode\n\
         on and off, until the conflict disappears.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_the_mod() {
        let text = banner("Charmony");
        assert!(text.contains("CHARMONY IS RUNNING IN MIXIN DISABLE MODE"));
        assert!(text.contains("No Charmony features will work as expected"));
    }

    #[test]
    fn test_metadata() {
        let meta = Diagnostics::META;
        assert_eq!(meta.side, Side::Common);
        assert!(!meta.can_be_disabled);
        assert!(meta.priority < 0);
    }
}
