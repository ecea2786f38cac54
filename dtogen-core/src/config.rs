//! Resolved synthesis configuration.
//!
//! [`Config::resolve`] turns raw [`DtoOptions`] into the settled values the
//! rest of the pipeline works with: final target name and module, the target
//! kind, and set-backed exclusion and required lists.

use std::collections::BTreeSet;

use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::options::DtoOptions;

/// Settled configuration for one synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Module path for the generated type, if any.
    pub target_module: Option<String>,
    /// Name of the generated type.
    pub target_name: String,
    /// Kind of the generated type.
    pub target_kind: TypeKind,
    /// Keep composite-typed properties.
    pub include_non_primitives: bool,
    /// Property names dropped outright.
    pub excluded: BTreeSet<String>,
    /// Wrap kept fields in `Option` unless listed in `required`.
    pub make_optional: bool,
    /// Names exempt from `make_optional`.
    pub required: BTreeSet<String>,
    /// Re-emit property attributes on derived fields.
    pub copy_annotations: bool,
}

impl Config {
    /// Resolve raw options against the source type and, when the request is
    /// attached to an existing type, that invoking type.
    ///
    /// The invoking type wins name and module, then the explicit options. A
    /// request with neither gets the fallback name `<SourceName>Dto`, where a
    /// trait source first sheds its leading `I` (so `IOrder` yields
    /// `OrderDto` but a struct named `IOrder` yields `IOrderDto`), and no
    /// module at all. The target kind mirrors the invoking type and defaults
    /// to a struct otherwise.
    pub fn resolve(
        options: &DtoOptions,
        source: &TypeDescriptor,
        invoking: Option<&TypeDescriptor>,
    ) -> Self {
        let target_module = invoking
            .and_then(|ctx| ctx.module.clone())
            .or_else(|| options.module.clone());

        let target_name = invoking
            .map(|ctx| ctx.name.clone())
            .or_else(|| options.name.clone())
            .unwrap_or_else(|| format!("{}Dto", source.base_name()));

        let target_kind = invoking.map(|ctx| ctx.kind).unwrap_or(TypeKind::Struct);

        Self {
            target_module,
            target_name,
            target_kind,
            include_non_primitives: options.include_non_primitives,
            excluded: options.exclude.iter().cloned().collect(),
            make_optional: options.make_optional,
            required: options.required.iter().cloned().collect(),
            copy_annotations: options.copy_annotations(),
        }
    }
}
