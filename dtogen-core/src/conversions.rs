//! Conversion function synthesis.
//!
//! Two independent emissions per request, both driven by the included
//! property list in source order: an inherent `to_<source>` method on the
//! derived type, and a `<Target>Extensions` trait giving the source type a
//! `to_<target>` method. Either can delegate its final value through an
//! override hook declared on the invoking type.

use convert_case::{Case, Casing};

use crate::config::Config;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::properties::IncludedProperty;

/// Hook consulted by the derived→source conversion.
pub const TO_SOURCE_HOOK: &str = "custom_to_original";
/// Hook consulted by the source→derived conversion.
pub const FROM_SOURCE_HOOK: &str = "custom_from_original";

fn declares_hook(invoking: Option<&TypeDescriptor>, hook: &str) -> bool {
    invoking.is_some_and(|ctx| ctx.declares_method(hook))
}

/// Render the derived→source method, indented for an `impl` block.
///
/// Only emitted for constructible sources (a trait cannot be built from a
/// struct literal) and only when `make_optional` is off, since optional
/// values cannot be back-mapped onto non-optional source fields. The literal
/// closes with `..Default::default()` to cover excluded fields; whether the
/// source actually implements `Default` is not checked here and surfaces
/// when the host compiles the output.
pub fn render_to_source_method(
    source: &TypeDescriptor,
    config: &Config,
    included: &[IncludedProperty],
    invoking: Option<&TypeDescriptor>,
) -> Option<String> {
    if !source.kind.is_constructible() || config.make_optional {
        return None;
    }

    let method = format!("to_{}", source.name.to_case(Case::Snake));
    let mut lines = Vec::new();
    lines.push(format!(
        "    pub fn {}(&self) -> {} {{",
        method, source.qualified_path
    ));
    lines.push(format!("        let value = {} {{", source.qualified_path));
    for entry in included {
        lines.push(format!(
            "            {name}: self.{name}.clone(),",
            name = entry.property.name
        ));
    }
    lines.push("            ..Default::default()".to_string());
    lines.push("        };".to_string());
    if declares_hook(invoking, TO_SOURCE_HOOK) {
        lines.push(format!("        self.{}(value)", TO_SOURCE_HOOK));
    } else {
        lines.push("        value".to_string());
    }
    lines.push("    }".to_string());

    Some(lines.join("\n"))
}

/// Render the source→derived conversion as a standalone extension trait plus
/// its impl for the source type. Always emitted.
///
/// Struct sources are read field-by-field (`self.name.clone()`); trait
/// sources through their getters (`self.name()`), with a blanket impl over
/// every implementor. Values headed for an optional-rendered field are
/// wrapped in `Some(...)`.
pub fn render_from_source_extension(
    source: &TypeDescriptor,
    config: &Config,
    included: &[IncludedProperty],
    invoking: Option<&TypeDescriptor>,
) -> String {
    let target = &config.target_name;
    let trait_name = format!("{}Extensions", target);
    let method = format!("to_{}", target.to_case(Case::Snake));

    let mut lines = Vec::new();
    lines.push(format!("pub trait {} {{", trait_name));
    lines.push(format!("    fn {}(&self) -> {};", method, target));
    lines.push("}".to_string());
    lines.push(String::new());

    if source.kind == TypeKind::Trait {
        lines.push(format!(
            "impl<T: {}> {} for T {{",
            source.qualified_path, trait_name
        ));
    } else {
        lines.push(format!(
            "impl {} for {} {{",
            trait_name, source.qualified_path
        ));
    }
    lines.push(format!("    fn {}(&self) -> {} {{", method, target));

    if included.is_empty() {
        lines.push(format!("        let value = {} {{}};", target));
    } else {
        lines.push(format!("        let value = {} {{", target));
        for entry in included {
            let access = if source.kind == TypeKind::Trait {
                format!("self.{}()", entry.property.name)
            } else {
                format!("self.{}.clone()", entry.property.name)
            };
            let expr = if entry.optional {
                format!("Some({})", access)
            } else {
                access
            };
            lines.push(format!("            {}: {},", entry.property.name, expr));
        }
        lines.push("        };".to_string());
    }

    if declares_hook(invoking, FROM_SOURCE_HOOK) {
        lines.push(format!(
            "        {}::{}(value, self)",
            target, FROM_SOURCE_HOOK
        ));
    } else {
        lines.push("        value".to_string());
    }
    lines.push("    }".to_string());
    lines.push("}".to_string());

    lines.join("\n")
}
