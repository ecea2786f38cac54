//! Normalized descriptions of source types.
//!
//! A [`TypeDescriptor`] is the synthesizer's read-only view of one declared
//! type: its kind, where it lives, its properties in declaration order, and
//! the names of its declared methods (used only to detect override hooks).
//! Descriptors are constructed fresh per synthesis request by the host and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

/// The kind of a declared source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A struct with named fields (unit structs count too).
    Struct,
    /// A tuple struct. Properties are unnamed, so synthesis skips these.
    TupleStruct,
    /// An enum. Not a property bag; synthesis skips these.
    Enum,
    /// A union. Synthesis skips these.
    Union,
    /// A trait whose getter-style methods act as properties.
    Trait,
}

impl TypeKind {
    /// Whether a transfer type can be derived from this kind at all.
    pub fn supports_synthesis(&self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Trait)
    }

    /// Whether generated code can construct an instance of this kind.
    ///
    /// Traits are not constructible, which is why the derived-to-source
    /// conversion is never emitted for trait sources.
    pub fn is_constructible(&self) -> bool {
        matches!(self, TypeKind::Struct)
    }

    /// Keyword used when declaring a type of this kind.
    pub fn declaration_keyword(&self) -> &'static str {
        match self {
            TypeKind::Trait => "trait",
            _ => "struct",
        }
    }
}

/// Visibility of a property or one of its accessors.
///
/// Variants are ordered from narrowest to widest so that
/// [`Visibility::narrower`] can use plain `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Super,
    Crate,
    Public,
}

impl Visibility {
    /// Rendered visibility prefix, without a trailing space.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "",
            Visibility::Super => "pub(super)",
            Visibility::Crate => "pub(crate)",
            Visibility::Public => "pub",
        }
    }

    /// The narrower of two visibilities.
    pub fn narrower(self, other: Visibility) -> Visibility {
        self.min(other)
    }
}

/// One argument of an [`Annotation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationArg {
    /// A bare value, e.g. `default` in `#[serde(default)]`.
    Positional(String),
    /// A `name = value` pair, e.g. `rename = "id"` in `#[serde(rename = "id")]`.
    Named { name: String, value: String },
}

impl AnnotationArg {
    fn render(&self) -> String {
        match self {
            AnnotationArg::Positional(value) => value.clone(),
            AnnotationArg::Named { name, value } => format!("{} = {}", name, value),
        }
    }
}

/// An attribute attached to a source property, normalized for re-emission.
///
/// Three shapes are representable, mirroring the attribute forms found in
/// source code: a bare path (`#[deprecated]`), a call form
/// (`#[serde(rename = "id", default)]`), and a top-level name/value form
/// (`#[must_use = "reason"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Attribute path, e.g. `serde` or `deprecated`.
    pub path: String,
    /// Call-form arguments, in written order.
    #[serde(default)]
    pub args: Vec<AnnotationArg>,
    /// Top-level `= value` form, mutually exclusive with `args` in practice.
    #[serde(default)]
    pub value: Option<String>,
}

impl Annotation {
    /// A bare-path annotation.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            value: None,
        }
    }

    /// Append a positional argument.
    pub fn with_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(AnnotationArg::Positional(value.into()));
        self
    }

    /// Append a `name = value` argument.
    pub fn with_named_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(AnnotationArg::Named {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Use the top-level `= value` form.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The well-known nullable marker, `#[dto(nullable)]`.
    ///
    /// When copied, it is consumed as a signal that forces the rendered
    /// field optional; it is never re-emitted.
    pub fn nullable_marker() -> Self {
        Annotation::new("dto").with_arg("nullable")
    }

    /// Whether this annotation is the nullable marker.
    pub fn is_nullable_marker(&self) -> bool {
        self.path == "dto"
            && self.value.is_none()
            && self.args.len() == 1
            && self.args[0] == AnnotationArg::Positional("nullable".to_string())
    }

    /// Re-render the annotation as attribute source text.
    pub fn render(&self) -> String {
        if let Some(value) = &self.value {
            return format!("#[{} = {}]", self.path, value);
        }
        if self.args.is_empty() {
            return format!("#[{}]", self.path);
        }
        let args: Vec<String> = self.args.iter().map(AnnotationArg::render).collect();
        format!("#[{}({})]", self.path, args.join(", "))
    }
}

/// Normalized metadata for one property of a source type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name (a field or getter name).
    pub name: String,
    /// Rendered type text, carried verbatim from the declaration.
    pub declared_type: String,
    /// The property's own visibility.
    pub vis: Visibility,
    /// Getter visibility; `None` means no getter is declared.
    #[serde(default)]
    pub getter_vis: Option<Visibility>,
    /// Setter visibility; `None` means the property is read-only at the source.
    #[serde(default)]
    pub setter_vis: Option<Visibility>,
    /// Built-in scalars, strings, and fieldless-enum leaf types.
    pub is_primitive: bool,
    /// Whether the declared type is already `Option<...>`.
    #[serde(default)]
    pub nullable: bool,
    /// Attached annotations, in written order.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl PropertyDescriptor {
    /// A public, primitive, read-write property.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            vis: Visibility::Public,
            getter_vis: Some(Visibility::Public),
            setter_vis: Some(Visibility::Public),
            is_primitive: true,
            nullable: false,
            annotations: Vec::new(),
        }
    }

    /// Set the property visibility, along with both accessors.
    pub fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self.getter_vis = Some(vis);
        self.setter_vis = Some(vis);
        self
    }

    /// Override the getter visibility alone.
    pub fn with_getter_vis(mut self, vis: Visibility) -> Self {
        self.getter_vis = Some(vis);
        self
    }

    /// Override the setter visibility alone.
    pub fn with_setter_vis(mut self, vis: Visibility) -> Self {
        self.setter_vis = Some(vis);
        self
    }

    /// Mark the property as having no setter at the source.
    pub fn without_setter(mut self) -> Self {
        self.setter_vis = None;
        self
    }

    /// Mark the property as composite (not a leaf scalar).
    pub fn non_primitive(mut self) -> Self {
        self.is_primitive = false;
        self
    }

    /// Mark the declared type as already optional.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Visibility to render on the derived field.
    ///
    /// Rust fields carry a single visibility, so when an accessor is
    /// declared narrower than the property itself, the narrowest declared
    /// visibility wins. A missing accessor imposes no constraint; in
    /// particular a property with no setter still renders as a plain
    /// writable field, keeping the derived type constructible.
    pub fn rendered_vis(&self) -> Visibility {
        let mut vis = self.vis;
        if let Some(getter) = self.getter_vis {
            vis = vis.narrower(getter);
        }
        if let Some(setter) = self.setter_vis {
            vis = vis.narrower(setter);
        }
        vis
    }

    /// Synthetic marker fields (`PhantomData`) are never user data and are
    /// skipped before any filtering policy applies.
    pub fn is_synthetic_marker(&self) -> bool {
        let base = self.declared_type.split('<').next().unwrap_or("");
        base.rsplit("::").next().map(str::trim) == Some("PhantomData")
    }
}

/// Read-only view of a source type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub name: String,
    /// Module path the type is declared in, e.g. `views::orders`.
    #[serde(default)]
    pub module: Option<String>,
    /// Resolvable reference text used in generated conversion bodies.
    pub qualified_path: String,
    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    /// Declared method names, used only for override-hook detection.
    #[serde(default)]
    pub methods: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            qualified_path: name.clone(),
            name,
            module: None,
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_qualified_path(mut self, path: impl Into<String>) -> Self {
        self.qualified_path = path.into();
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(name.into());
        self
    }

    /// Capability check: does this type declare a method with the given name?
    pub fn declares_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }

    /// Name used to build the default derived-type name.
    ///
    /// Traits drop a single leading `I` (`IOrder` becomes `Order`); all
    /// other kinds use the name as written.
    pub fn base_name(&self) -> &str {
        match self.kind {
            TypeKind::Trait => self.name.strip_prefix('I').unwrap_or(&self.name),
            _ => &self.name,
        }
    }
}
