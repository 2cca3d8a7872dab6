use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[modkit_derive::modkit_error]
pub enum IdentifierError {
    #[error("Invalid identifier{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A namespaced resource identifier, rendered as `namespace:path`.
///
/// The namespace is usually the mod id. Namespaces accept `[a-z0-9_.-]`, paths
/// additionally accept `/`. Neither part may be empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    /// Validates both parts and builds the identifier.
    ///
    /// # Errors
    /// Returns [`IdentifierError::Invalid`] when either part is empty or contains
    /// characters outside the allowed set.
    pub fn new(namespace: impl AsRef<str>, path: impl AsRef<str>) -> Result<Self, IdentifierError> {
        let namespace = namespace.as_ref();
        let path = path.as_ref();
        validate_namespace(namespace)?;
        validate("path", path, is_path_char)?;
        Ok(Self { namespace: namespace.to_owned(), path: path.to_owned() })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((namespace, path)) = s.split_once(':') else {
            return Err(IdentifierError::Invalid {
                message: format!("'{s}' is not of the form namespace:path").into(),
                context: None,
            });
        };
        Self::new(namespace, path)
    }
}

/// Checks a namespace such as a mod id.
///
/// # Errors
/// Returns [`IdentifierError::Invalid`] for empty input or characters outside `[a-z0-9_.-]`.
pub fn validate_namespace(namespace: &str) -> Result<(), IdentifierError> {
    validate("namespace", namespace, is_namespace_char)
}

fn validate(part: &'static str, value: &str, allowed: fn(char) -> bool) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Invalid {
            message: format!("{part} cannot be empty").into(),
            context: None,
        });
    }
    if let Some(c) = value.chars().find(|c| !allowed(*c)) {
        return Err(IdentifierError::Invalid {
            message: format!("character '{c}' is not allowed in {part} '{value}'").into(),
            context: None,
        });
    }
    Ok(())
}

const fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

const fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}
