//! Raw request options.
//!
//! [`DtoOptions`] is the declarative surface of a synthesis request. It
//! parses from two places with the same field names: `#[dto(...)]` attribute
//! arguments (via [`darling::FromMeta`]) and free-standing `[[generate]]`
//! tables in `dtogen.toml` (via [`serde::Deserialize`]). Everything except
//! `source` is optional; defaulting happens later, in
//! [`Config::resolve`](crate::config::Config::resolve).

use darling::FromMeta;
use serde::Deserialize;

/// Raw `#[dto(...)]` request options, prior to resolution.
///
/// | option                   | default | meaning                                        |
/// |--------------------------|---------|------------------------------------------------|
/// | `source`                 | —       | qualified path of the source type (required)   |
/// | `module`                 | unset   | module path for the generated type             |
/// | `name`                   | unset   | generated type name                            |
/// | `include_non_primitives` | `false` | keep composite-typed properties                |
/// | `exclude`                | empty   | property names dropped outright (repeatable)   |
/// | `make_optional`          | `false` | wrap every kept field in `Option`              |
/// | `required`               | empty   | names exempt from `make_optional` (repeatable) |
/// | `copy_attrs`             | `true`  | re-emit property attributes on derived fields  |
#[derive(Debug, Clone, PartialEq, Eq, FromMeta, Deserialize)]
pub struct DtoOptions {
    /// Qualified path of the source type, as it should appear in generated
    /// conversion bodies (e.g. `crate::shop::Order`).
    pub source: String,

    /// Module path override for the generated type.
    #[darling(default)]
    #[serde(default)]
    pub module: Option<String>,

    /// Name override for the generated type.
    #[darling(default)]
    #[serde(default)]
    pub name: Option<String>,

    /// Keep properties whose types are composite rather than leaf scalars.
    #[darling(default)]
    #[serde(default)]
    pub include_non_primitives: bool,

    /// Property names excluded from the derived type and both conversions.
    #[darling(default, multiple)]
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Wrap every kept field in `Option`, unless listed in `required`.
    #[darling(default)]
    #[serde(default)]
    pub make_optional: bool,

    /// Names exempt from `make_optional`. Inert when that flag is off.
    #[darling(default, multiple)]
    #[serde(default)]
    pub required: Vec<String>,

    /// Re-emit property attributes on the derived fields. Defaults to true.
    #[darling(default)]
    #[serde(default)]
    pub copy_attrs: Option<bool>,
}

impl DtoOptions {
    /// Options naming only a source type, everything else defaulted.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            module: None,
            name: None,
            include_non_primitives: false,
            exclude: Vec::new(),
            make_optional: false,
            required: Vec::new(),
            copy_attrs: None,
        }
    }

    /// Effective value of `copy_attrs`.
    pub fn copy_annotations(&self) -> bool {
        self.copy_attrs.unwrap_or(true)
    }

    /// Parse options out of a `#[dto(...)]` attribute.
    ///
    /// Requires the list form; a bare `#[dto]` is a marker, not a request,
    /// and is rejected here so callers can tell the two apart.
    pub fn from_attribute(attr: &syn::Attribute) -> darling::Result<Self> {
        match &attr.meta {
            syn::Meta::List(list) => {
                let nested = darling::ast::NestedMeta::parse_meta_list(list.tokens.clone())
                    .map_err(darling::Error::from)?;
                Self::from_list(&nested)
            }
            other => Err(darling::Error::custom(
                "expected an argument list: #[dto(source = \"...\", ...)]",
            )
            .with_span(other)),
        }
    }
}
