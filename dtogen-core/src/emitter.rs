//! Final assembly of generated source text.
//!
//! A [`GeneratedType`] collects everything the earlier stages produced for
//! one request and [`GeneratedType::render`] concatenates it in a fixed
//! order: header comment, module wrappers, derive line, the type body,
//! the inherent-method block, then any additional fragments. Assembly is
//! pure string work over immutable fragments, so identical inputs always
//! yield byte-identical text.

use convert_case::{Case, Casing};

use crate::descriptor::TypeKind;

/// Comment placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Generated by dtogen. Do not edit manually.";

/// Everything synthesized for one request, prior to rendering.
///
/// Built once, immutable, consumed exactly once by [`GeneratedType::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    pub target_name: String,
    pub target_kind: TypeKind,
    /// Module path to wrap the output in, e.g. `views::orders`.
    pub target_module: Option<String>,
    /// Field fragments in source property order, indented for the type body.
    pub rendered_properties: Vec<String>,
    /// Method fragments, indented for the inherent `impl` block.
    pub rendered_methods: Vec<String>,
    /// Standalone fragments appended after the type, such as the
    /// extension-trait text.
    pub additional_fragments: Vec<String>,
}

impl GeneratedType {
    /// Render the complete source text.
    pub fn render(&self) -> String {
        let mut body: Vec<String> = Vec::new();

        if self.target_kind != TypeKind::Trait {
            body.push("#[derive(Debug, Clone, PartialEq)]".to_string());
        }
        let keyword = self.target_kind.declaration_keyword();
        if self.rendered_properties.is_empty() {
            body.push(format!("pub {} {} {{}}", keyword, self.target_name));
        } else {
            body.push(format!("pub {} {} {{", keyword, self.target_name));
            body.extend(self.rendered_properties.iter().cloned());
            body.push("}".to_string());
        }

        if !self.rendered_methods.is_empty() {
            body.push(String::new());
            body.push(format!("impl {} {{", self.target_name));
            body.extend(self.rendered_methods.iter().cloned());
            body.push("}".to_string());
        }

        for fragment in &self.additional_fragments {
            body.push(String::new());
            body.push(fragment.clone());
        }

        let mut text = body.join("\n");
        if let Some(module) = &self.target_module {
            for segment in module.rsplit("::") {
                text = wrap_module(segment, &text);
            }
        }

        format!("{}\n\n{}\n", GENERATED_HEADER, text)
    }

    /// Render and wrap into the named output unit.
    pub fn into_unit(self) -> SourceUnit {
        let content = self.render();
        SourceUnit {
            name: self.target_name,
            content,
        }
    }
}

/// One named output, keyed by the generated type's name.
///
/// Two requests resolving to the same name both produce a unit; collision
/// handling belongs to the write sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub name: String,
    pub content: String,
}

impl SourceUnit {
    /// Deterministic file name for the write sink.
    pub fn file_name(&self) -> String {
        format!("{}.generated.rs", self.name.to_case(Case::Snake))
    }
}

fn wrap_module(name: &str, body: &str) -> String {
    let mut lines = vec![format!("pub mod {} {{", name)];
    for line in body.lines() {
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("    {}", line));
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}
