use std::borrow::Cow;

/// Failures while reading, merging or persisting configuration.
#[modkit_derive::modkit_error]
pub enum ConfigError {
    #[error("Config source error{}: {source}", format_context(.context))]
    Source { source: ::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Config IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Config serialization error{}: {source}", format_context(.context))]
    Serialize { source: toml::ser::Error, context: Option<Cow<'static, str>> },

    #[error("Config error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
