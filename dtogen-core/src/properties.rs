//! Property filtering and field rendering.
//!
//! This is the heart of synthesis: [`filter_properties`] walks the source
//! type's properties in declaration order, decides which survive, computes
//! each survivor's optionality and visibility, and renders it as a field
//! fragment ready to drop into the generated struct body.

use crate::abort::AbortFlag;
use crate::config::Config;
use crate::descriptor::{PropertyDescriptor, TypeDescriptor};

/// A property that passed filtering, with its computed optionality.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludedProperty {
    pub property: PropertyDescriptor,
    /// Whether the derived field wraps the declared type in `Option`.
    pub optional: bool,
}

/// Outcome of filtering one source type's properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredProperties {
    /// Rendered field fragments, indented for a struct body, in source order.
    pub rendered: Vec<String>,
    /// The surviving properties, parallel to `rendered`.
    pub included: Vec<IncludedProperty>,
}

/// Filter the source's properties against the resolved configuration.
///
/// A property is dropped when it is a synthetic marker field, when its name
/// is excluded, or when it is composite-typed and `include_non_primitives`
/// is off. Survivors render optional when `make_optional` applies to them or
/// when a copied `#[dto(nullable)]` annotation forces it; a declared type
/// that is already `Option` is never wrapped again.
///
/// Returns `None` if cancellation was requested mid-walk; the partial result
/// is discarded.
pub fn filter_properties(
    source: &TypeDescriptor,
    config: &Config,
    abort: &AbortFlag,
) -> Option<FilteredProperties> {
    let mut filtered = FilteredProperties::default();

    for property in &source.properties {
        if abort.is_set() {
            return None;
        }
        if property.is_synthetic_marker() {
            continue;
        }
        if config.excluded.contains(&property.name) {
            continue;
        }
        if !property.is_primitive && !config.include_non_primitives {
            continue;
        }

        // The nullable marker is a signal, not metadata to keep: while
        // copying, it forces optionality and is dropped from the output.
        // With copying off it is never even inspected.
        let mut forced_optional = false;
        let mut lines = Vec::new();
        if config.copy_annotations {
            for annotation in &property.annotations {
                if annotation.is_nullable_marker() {
                    forced_optional = true;
                    continue;
                }
                lines.push(format!("    {}", annotation.render()));
            }
        }

        let optional = !property.nullable
            && (forced_optional
                || (config.make_optional && !config.required.contains(&property.name)));

        let field_type = if optional {
            format!("Option<{}>", property.declared_type)
        } else {
            property.declared_type.clone()
        };

        let vis = property.rendered_vis().as_str();
        if vis.is_empty() {
            lines.push(format!("    {}: {},", property.name, field_type));
        } else {
            lines.push(format!("    {} {}: {},", vis, property.name, field_type));
        }

        filtered.rendered.push(lines.join("\n"));
        filtered.included.push(IncludedProperty {
            property: property.clone(),
            optional,
        });
    }

    Some(filtered)
}
