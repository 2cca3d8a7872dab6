use crate::config::ConfigError;
use crate::feature::FeatureError;
use crate::identifier::IdentifierError;
use modkit_domain::side::Side;
use std::borrow::Cow;

/// Failures surfaced by the orchestrator.
///
/// `Construction`, `Boot` and `Run` are fatal for the side being run: the side stops at
/// the failing feature and the error is handed back to the caller of [`crate::Mod::run`].
#[modkit_derive::modkit_error]
pub enum ModError {
    #[error("Invalid mod id{}: {message}", format_context(.context))]
    InvalidId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Feature {feature} is already registered{}", format_context(.context))]
    DuplicateFeature { feature: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Failed to construct {side} feature {feature}{}: {source}", format_context(.context))]
    Construction {
        feature: Cow<'static, str>,
        side: Side,
        source: FeatureError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Boot step of {side} feature {feature} failed{}: {source}", format_context(.context))]
    Boot {
        feature: Cow<'static, str>,
        side: Side,
        source: FeatureError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Running {side} feature {feature} failed{}: {source}", format_context(.context))]
    Run {
        feature: Cow<'static, str>,
        side: Side,
        source: FeatureError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Feature {feature} is not registered{}", format_context(.context))]
    FeatureNotFound { feature: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("The {side} side has already been run{}", format_context(.context))]
    SideAlreadyRun { side: Side, context: Option<Cow<'static, str>> },

    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Identifier error{}: {source}", format_context(.context))]
    Identifier { source: IdentifierError, context: Option<Cow<'static, str>> },
}

impl ModError {
    /// Name of the feature the error is about, when there is one.
    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::DuplicateFeature { feature, .. }
            | Self::Construction { feature, .. }
            | Self::Boot { feature, .. }
            | Self::Run { feature, .. }
            | Self::FeatureNotFound { feature, .. } => Some(feature),
            _ => None,
        }
    }
}
