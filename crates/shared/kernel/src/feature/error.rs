use crate::config::ConfigError;
use crate::identifier::IdentifierError;
use std::borrow::Cow;

/// Failures raised by feature code: constructors, boot steps and `run`.
#[modkit_derive::modkit_error]
pub enum FeatureError {
    #[error("Feature configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Feature identifier error{}: {source}", format_context(.context))]
    Identifier { source: IdentifierError, context: Option<Cow<'static, str>> },

    /// A feature looked up another feature that has not been constructed (yet).
    #[error("Missing dependency {feature}{}", format_context(.context))]
    MissingDependency { feature: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Feature error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
