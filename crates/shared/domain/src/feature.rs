use crate::constants::DEFAULT_PRIORITY;
use crate::side::Side;

/// Static metadata declared by a feature type.
///
/// This is everything the orchestrator knows about a feature before an instance exists.
/// Lower `priority` values are instantiated, booted and run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureMeta {
    pub side: Side,
    pub priority: i32,
    pub can_be_disabled: bool,
    pub enabled_by_default: bool,
    pub description: &'static str,
}

impl FeatureMeta {
    #[must_use]
    pub const fn new(side: Side) -> Self {
        Self {
            side,
            priority: DEFAULT_PRIORITY,
            can_be_disabled: true,
            enabled_by_default: true,
            description: "",
        }
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn with_can_be_disabled(mut self, can_be_disabled: bool) -> Self {
        self.can_be_disabled = can_be_disabled;
        self
    }

    #[must_use]
    pub const fn with_enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }

    #[must_use]
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Enablement before any configuration is applied.
    ///
    /// A feature that cannot be disabled always starts (and stays) enabled.
    #[must_use]
    pub const fn initial_enabled(&self) -> bool {
        !self.can_be_disabled || self.enabled_by_default
    }
}
