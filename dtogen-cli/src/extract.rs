//! Descriptor extraction: the host metadata facility.
//!
//! Extraction runs in passes over the scanned files: parse and flatten
//! module trees, index every declared type (structs, enums, traits, unions)
//! as a [`TypeDescriptor`] together with the method names of its inherent
//! impls, then collect synthesis requests from `#[dto(source = ...)]`
//! items against the full index. Files that fail to parse are reported and
//! skipped; the remaining files still contribute, and malformed or
//! unresolvable requests become warnings rather than failures.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use quote::ToTokens;
use syn::punctuated::Punctuated;

use dtogen_core::{
    Annotation, DtoOptions, PropertyDescriptor, SynthesisRequest, TypeDescriptor, TypeKind,
    Visibility,
};

use crate::error::ExtractError;
use crate::scanner::SourceFile;

/// Everything extracted from one scan.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Every declared type, by name.
    pub index: TypeIndex,
    /// Requests collected from `#[dto(source = ...)]` items.
    pub requests: Vec<SynthesisRequest>,
    /// Requests skipped with a warning: malformed options, unknown sources,
    /// unsupported carriers.
    pub skipped: Vec<ExtractError>,
    /// Files that failed to parse.
    pub errors: Vec<ExtractError>,
}

/// Index of declared types, looked up by bare name.
#[derive(Debug, Default)]
pub struct TypeIndex {
    entries: BTreeMap<String, TypeDescriptor>,
}

impl TypeIndex {
    /// Descriptor for a declared type name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.entries.get(name)
    }

    /// Resolve a request's source reference.
    ///
    /// The extractor does no name resolution; the reference text is matched
    /// against declared type names by its last path segment, and carried
    /// verbatim into the descriptor's qualified path so generated bodies use
    /// it as written.
    pub fn resolve(&self, source: &str) -> Option<TypeDescriptor> {
        let name = source.rsplit("::").next().unwrap_or(source).trim();
        self.entries.get(name).map(|descriptor| {
            let mut descriptor = descriptor.clone();
            descriptor.qualified_path = source.to_string();
            descriptor
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, descriptor: TypeDescriptor) {
        self.entries.insert(descriptor.name.clone(), descriptor);
    }
}

/// One declared item with the module path it was found under.
struct DeclaredItem {
    file: PathBuf,
    module: Option<String>,
    item: syn::Item,
}

/// The extractor itself. Stateless; one instance serves any number of scans.
#[derive(Debug, Default)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract descriptors and requests from the scanned files.
    pub fn extract(&self, files: &[SourceFile]) -> Extraction {
        let mut extraction = Extraction::default();

        // Pass 1: parse and flatten module trees.
        let mut declared = Vec::new();
        for file in files {
            match syn::parse_file(&file.content) {
                Ok(parsed) => {
                    flatten_items(&file.path, None, parsed.items, &mut declared);
                }
                Err(err) => {
                    extraction
                        .errors
                        .push(ExtractError::syntax(file.path.clone(), err.to_string()));
                }
            }
        }

        // Pass 2: classification inputs, then descriptors.
        let fieldless_enums = fieldless_enum_names(&declared);
        let inherent_methods = inherent_method_names(&declared);
        for entry in &declared {
            if let Some(descriptor) =
                self.describe(entry, &fieldless_enums, &inherent_methods)
            {
                extraction.index.insert(descriptor);
            }
        }

        // Pass 3: requests.
        for entry in &declared {
            self.collect_request(entry, &mut extraction);
        }

        extraction
    }

    /// Build a descriptor for one declared item.
    fn describe(
        &self,
        entry: &DeclaredItem,
        fieldless_enums: &HashSet<String>,
        inherent_methods: &HashMap<String, Vec<String>>,
    ) -> Option<TypeDescriptor> {
        let (kind, name) = match &entry.item {
            syn::Item::Struct(item) => {
                let kind = match item.fields {
                    syn::Fields::Unnamed(_) => TypeKind::TupleStruct,
                    _ => TypeKind::Struct,
                };
                (kind, item.ident.to_string())
            }
            syn::Item::Enum(item) => (TypeKind::Enum, item.ident.to_string()),
            syn::Item::Union(item) => (TypeKind::Union, item.ident.to_string()),
            syn::Item::Trait(item) => (TypeKind::Trait, item.ident.to_string()),
            _ => return None,
        };

        let mut descriptor = TypeDescriptor::new(kind, name.clone());
        if let Some(module) = &entry.module {
            descriptor = descriptor
                .with_module(module.clone())
                .with_qualified_path(format!("{}::{}", module, name));
        }

        match &entry.item {
            syn::Item::Struct(item) => {
                if let syn::Fields::Named(fields) = &item.fields {
                    for field in &fields.named {
                        if let Some(property) = property_from_field(field, fieldless_enums) {
                            descriptor = descriptor.with_property(property);
                        }
                    }
                }
            }
            syn::Item::Trait(item) => {
                let (properties, methods) = trait_surface(item, fieldless_enums);
                for property in properties {
                    descriptor = descriptor.with_property(property);
                }
                for method in methods {
                    descriptor = descriptor.with_method(method);
                }
            }
            _ => {}
        }

        if let Some(methods) = inherent_methods.get(&name) {
            for method in methods {
                descriptor = descriptor.with_method(method.clone());
            }
        }

        Some(descriptor)
    }

    /// Collect a synthesis request from an item's `#[dto(...)]` attribute.
    fn collect_request(&self, entry: &DeclaredItem, extraction: &mut Extraction) {
        let (attrs, name, is_struct) = match &entry.item {
            syn::Item::Struct(item) => (&item.attrs, item.ident.to_string(), true),
            syn::Item::Enum(item) => (&item.attrs, item.ident.to_string(), false),
            syn::Item::Trait(item) => (&item.attrs, item.ident.to_string(), false),
            syn::Item::Union(item) => (&item.attrs, item.ident.to_string(), false),
            _ => return,
        };

        for attr in attrs {
            if !attr.path().is_ident("dto") {
                continue;
            }
            // A bare `#[dto]` is a marker carrier, not a request.
            if matches!(attr.meta, syn::Meta::Path(_)) {
                continue;
            }

            if !is_struct {
                extraction.skipped.push(ExtractError::invalid_options(
                    entry.file.clone(),
                    &name,
                    "requests must be attached to a struct",
                ));
                continue;
            }

            let options = match DtoOptions::from_attribute(attr) {
                Ok(options) => options,
                Err(err) => {
                    extraction.skipped.push(ExtractError::invalid_options(
                        entry.file.clone(),
                        &name,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            let Some(source) = extraction.index.resolve(&options.source) else {
                extraction
                    .skipped
                    .push(ExtractError::unknown_source(&name, &options.source));
                continue;
            };

            // The annotated item itself is indexed, methods included.
            let invoking = extraction
                .index
                .get(&name)
                .cloned()
                .unwrap_or_else(|| TypeDescriptor::new(TypeKind::Struct, &name));

            extraction
                .requests
                .push(SynthesisRequest::new(source, options).with_invoking(invoking));
        }
    }
}

/// Flatten items out of nested inline modules, tracking the module path.
fn flatten_items(
    file: &std::path::Path,
    module: Option<String>,
    items: Vec<syn::Item>,
    out: &mut Vec<DeclaredItem>,
) {
    for item in items {
        if let syn::Item::Mod(item_mod) = item {
            if let Some((_, nested)) = item_mod.content {
                let name = item_mod.ident.to_string();
                let nested_module = match &module {
                    Some(parent) => Some(format!("{}::{}", parent, name)),
                    None => Some(name),
                };
                flatten_items(file, nested_module, nested, out);
            }
            continue;
        }
        out.push(DeclaredItem {
            file: file.to_path_buf(),
            module: module.clone(),
            item,
        });
    }
}

/// Enums with only unit variants count as primitive leaf types.
fn fieldless_enum_names(declared: &[DeclaredItem]) -> HashSet<String> {
    declared
        .iter()
        .filter_map(|entry| match &entry.item {
            syn::Item::Enum(item)
                if item
                    .variants
                    .iter()
                    .all(|v| matches!(v.fields, syn::Fields::Unit)) =>
            {
                Some(item.ident.to_string())
            }
            _ => None,
        })
        .collect()
}

/// Method names per type name, from inherent impl blocks.
fn inherent_method_names(declared: &[DeclaredItem]) -> HashMap<String, Vec<String>> {
    let mut methods: HashMap<String, Vec<String>> = HashMap::new();
    for entry in declared {
        let syn::Item::Impl(item) = &entry.item else {
            continue;
        };
        if item.trait_.is_some() {
            continue;
        }
        let syn::Type::Path(self_ty) = item.self_ty.as_ref() else {
            continue;
        };
        let Some(name) = self_ty.path.segments.last().map(|s| s.ident.to_string()) else {
            continue;
        };
        let entry_methods = methods.entry(name).or_default();
        for impl_item in &item.items {
            if let syn::ImplItem::Fn(method) = impl_item {
                entry_methods.push(method.sig.ident.to_string());
            }
        }
    }
    methods
}

/// Build a property descriptor from a named struct field.
fn property_from_field(
    field: &syn::Field,
    fieldless_enums: &HashSet<String>,
) -> Option<PropertyDescriptor> {
    let name = field.ident.as_ref()?.to_string();
    let vis = visibility_of(&field.vis);
    let annotations = field
        .attrs
        .iter()
        .filter(|attr| !attr.path().is_ident("doc"))
        .map(annotation_from_attr)
        .collect();

    Some(PropertyDescriptor {
        name,
        declared_type: render_type(&field.ty),
        vis,
        getter_vis: Some(vis),
        setter_vis: Some(vis),
        is_primitive: is_primitive_type(&field.ty, fieldless_enums),
        nullable: option_inner(&field.ty).is_some(),
        annotations,
    })
}

/// Getter/setter pairs of a trait, as properties, plus all method names.
///
/// A getter is `fn name(&self) -> T` with no further arguments; a matching
/// `fn set_name(&mut self, T)` marks the property writable at the source.
fn trait_surface(
    item: &syn::ItemTrait,
    fieldless_enums: &HashSet<String>,
) -> (Vec<PropertyDescriptor>, Vec<String>) {
    let mut methods = Vec::new();
    let mut setters = HashSet::new();
    for trait_item in &item.items {
        if let syn::TraitItem::Fn(method) = trait_item {
            let name = method.sig.ident.to_string();
            if name.starts_with("set_") {
                setters.insert(name.clone());
            }
            methods.push(name);
        }
    }

    let mut properties = Vec::new();
    for trait_item in &item.items {
        let syn::TraitItem::Fn(method) = trait_item else {
            continue;
        };
        let name = method.sig.ident.to_string();
        if name.starts_with("set_") {
            continue;
        }
        if method.sig.inputs.len() != 1
            || !matches!(method.sig.inputs.first(), Some(syn::FnArg::Receiver(_)))
        {
            continue;
        }
        let syn::ReturnType::Type(_, return_type) = &method.sig.output else {
            continue;
        };

        let setter_vis = if setters.contains(&format!("set_{}", name)) {
            Some(Visibility::Public)
        } else {
            None
        };
        properties.push(PropertyDescriptor {
            name,
            declared_type: render_type(return_type),
            vis: Visibility::Public,
            getter_vis: Some(Visibility::Public),
            setter_vis,
            is_primitive: is_primitive_type(return_type, fieldless_enums),
            nullable: option_inner(return_type).is_some(),
            annotations: Vec::new(),
        });
    }

    (properties, methods)
}

/// Normalize a field attribute for re-emission.
fn annotation_from_attr(attr: &syn::Attribute) -> Annotation {
    let path = render_path(attr.path());
    match &attr.meta {
        syn::Meta::Path(_) => Annotation::new(path),
        syn::Meta::NameValue(nv) => Annotation::new(path).with_value(tokens_text(&nv.value)),
        syn::Meta::List(list) => {
            let mut annotation = Annotation::new(path);
            let nested =
                list.parse_args_with(Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated);
            match nested {
                Ok(metas) => {
                    for meta in metas {
                        annotation = match meta {
                            syn::Meta::Path(p) => annotation.with_arg(render_path(&p)),
                            syn::Meta::NameValue(nv) => annotation
                                .with_named_arg(render_path(&nv.path), tokens_text(&nv.value)),
                            syn::Meta::List(inner) => annotation.with_arg(format!(
                                "{}({})",
                                render_path(&inner.path),
                                inner.tokens
                            )),
                        };
                    }
                }
                // Not meta-shaped (e.g. custom token soup): carry verbatim.
                Err(_) => annotation = annotation.with_arg(list.tokens.to_string()),
            }
            annotation
        }
    }
}

/// Render a type the way it was declared, without token-stream spacing.
fn render_type(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) => render_path(&type_path.path),
        syn::Type::Reference(reference) => {
            let mut out = String::from("&");
            if let Some(lifetime) = &reference.lifetime {
                out.push_str(&format!("'{} ", lifetime.ident));
            }
            if reference.mutability.is_some() {
                out.push_str("mut ");
            }
            out.push_str(&render_type(&reference.elem));
            out
        }
        syn::Type::Tuple(tuple) => {
            let elems: Vec<String> = tuple.elems.iter().map(render_type).collect();
            if elems.len() == 1 {
                format!("({},)", elems[0])
            } else {
                format!("({})", elems.join(", "))
            }
        }
        syn::Type::Array(array) => {
            format!("[{}; {}]", render_type(&array.elem), tokens_text(&array.len))
        }
        syn::Type::Slice(slice) => format!("[{}]", render_type(&slice.elem)),
        syn::Type::Paren(paren) => render_type(&paren.elem),
        other => tokens_text(other),
    }
}

fn render_path(path: &syn::Path) -> String {
    let mut out = String::new();
    if path.leading_colon.is_some() {
        out.push_str("::");
    }
    let segments: Vec<String> = path.segments.iter().map(render_segment).collect();
    out.push_str(&segments.join("::"));
    out
}

fn render_segment(segment: &syn::PathSegment) -> String {
    match &segment.arguments {
        syn::PathArguments::None => segment.ident.to_string(),
        syn::PathArguments::AngleBracketed(args) => {
            let inner: Vec<String> = args
                .args
                .iter()
                .map(|arg| match arg {
                    syn::GenericArgument::Type(ty) => render_type(ty),
                    syn::GenericArgument::Lifetime(lt) => format!("'{}", lt.ident),
                    other => tokens_text(other),
                })
                .collect();
            format!("{}<{}>", segment.ident, inner.join(", "))
        }
        syn::PathArguments::Parenthesized(_) => tokens_text(segment),
    }
}

fn tokens_text<T: ToTokens>(tokens: &T) -> String {
    tokens.to_token_stream().to_string()
}

/// The inner type of `Option<...>`, if the declared type is one.
fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(syn::GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

/// Built-in scalars, strings, and fieldless enums are leaf ("primitive")
/// types; `Option<T>` classifies as its inner type.
fn is_primitive_type(ty: &syn::Type, fieldless_enums: &HashSet<String>) -> bool {
    if let Some(inner) = option_inner(ty) {
        return is_primitive_type(inner, fieldless_enums);
    }
    match ty {
        syn::Type::Reference(reference) => is_primitive_type(&reference.elem, fieldless_enums),
        syn::Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return false;
            };
            if !segment.arguments.is_none() {
                return false;
            }
            let ident = segment.ident.to_string();
            is_builtin_scalar(&ident) || fieldless_enums.contains(&ident)
        }
        _ => false,
    }
}

fn is_builtin_scalar(name: &str) -> bool {
    matches!(
        name,
        "String"
            | "str"
            | "bool"
            | "char"
            | "i8"
            | "i16"
            | "i32"
            | "i64"
            | "i128"
            | "isize"
            | "u8"
            | "u16"
            | "u32"
            | "u64"
            | "u128"
            | "usize"
            | "f32"
            | "f64"
    )
}

fn visibility_of(vis: &syn::Visibility) -> Visibility {
    match vis {
        syn::Visibility::Public(_) => Visibility::Public,
        syn::Visibility::Restricted(restricted) => {
            if restricted.path.is_ident("crate") {
                Visibility::Crate
            } else if restricted.path.is_ident("super") {
                Visibility::Super
            } else if restricted.path.is_ident("self") {
                Visibility::Private
            } else {
                Visibility::Crate
            }
        }
        syn::Visibility::Inherited => Visibility::Private,
    }
}
