#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates.
//! Two attribute macros live here: one turns an enum into a context-aware error type,
//! the other attaches static lifecycle metadata to a feature struct.
//!
//! ## Usage
//! Library crates depend on this crate directly:
//! ```toml
//! [dependencies]
//! modkit-derive = { path = "../infra/derive" }
//! ```
//!
//! The examples below are `ignore`d because they need the kernel crate in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Conversions**: Implements `From<Source>` for variants whose only fields are
///   `source` and `context`, so `?` works on upstream errors. Variants that carry
///   extra fields (a feature name, a side) are built explicitly at the call site.
/// * **Message Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use modkit_derive::modkit_error;
/// use std::borrow::Cow;
///
/// #[modkit_error]
/// pub enum StoreError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading option file")
/// }
/// ```
#[proc_macro_attribute]
pub fn modkit_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Attribute macro declaring the static metadata of a feature type.
///
/// Implements `modkit_kernel::feature::FeatureDefinition` for the annotated struct.
/// The orchestrator reads this metadata when the type is registered, long before
/// an instance exists.
///
/// # Arguments
///
/// * `side = Common | Client | Server` (required)
/// * `priority = <i32>` (default `0`, lower runs first)
/// * `can_be_disabled = <bool>` (default `true`)
/// * `enabled_by_default = <bool>` (default `true`)
/// * `description = "..."` (default empty)
///
/// # Example
/// ```rust,ignore
/// #[modkit_derive::feature_definition(side = Client, priority = 10)]
/// #[derive(Debug)]
/// pub struct ItemTooltips {
///     log: ModLog,
/// }
/// ```
#[proc_macro_attribute]
pub fn feature_definition(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut parsed = macros::feature::FeatureArgs::default();
    let parser = syn::meta::parser(|meta| parsed.parse(&meta));
    parse_macro_input!(args with parser);

    let input = parse_macro_input!(item as ItemStruct);
    macros::feature::expand_feature(parsed, input).into()
}
