//! # dtogen-core
//!
//! Derived transfer-type synthesis for Rust sources. Given a normalized
//! descriptor of an existing type and a set of declarative options, this
//! crate produces the source text of a derived "DTO" type plus bidirectional
//! conversion code between the two.
//!
//! ## Architecture
//!
//! The pipeline runs one request through four sequential stages:
//!
//! - [`options`] / [`config`] - raw request options and their resolution
//!   into a fully-defaulted [`Config`]
//! - [`properties`] - per-property filtering, optionality, visibility, and
//!   field rendering
//! - [`conversions`] - the `to_<source>` method and the
//!   `<Target>Extensions` trait, with override-hook delegation
//! - [`emitter`] - final assembly into one [`SourceUnit`] per request
//!
//! Requests are independent and share no state; a batch may be synthesized
//! in parallel without coordination. The only cancellation concept is the
//! advisory [`AbortFlag`], polled between requests and between properties.
//!
//! ## Example
//!
//! ```
//! use dtogen_core::{
//!     DtoOptions, PropertyDescriptor, SynthesisRequest, Synthesizer,
//!     TypeDescriptor, TypeKind,
//! };
//!
//! let source = TypeDescriptor::new(TypeKind::Struct, "Order")
//!     .with_property(PropertyDescriptor::new("id", "i64"));
//! let request = SynthesisRequest::new(source, DtoOptions::new("Order"));
//!
//! let unit = Synthesizer::new().synthesize(&request).unwrap();
//! assert_eq!(unit.name, "OrderDto");
//! assert!(unit.content.contains("pub struct OrderDto {"));
//! ```

pub mod abort;
pub mod config;
pub mod conversions;
pub mod descriptor;
pub mod emitter;
pub mod options;
pub mod properties;

pub use abort::AbortFlag;
pub use config::Config;
pub use descriptor::{
    Annotation, AnnotationArg, PropertyDescriptor, TypeDescriptor, TypeKind, Visibility,
};
pub use emitter::{GeneratedType, SourceUnit, GENERATED_HEADER};
pub use options::DtoOptions;

/// One unit of synthesis work.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// The type a transfer type is derived from.
    pub source: TypeDescriptor,
    /// Raw request options, resolved during synthesis.
    pub options: DtoOptions,
    /// The declared type the request is attached to, when it is not a
    /// free-standing directive. Supplies the target name, module, and kind,
    /// and is probed for override hooks.
    pub invoking: Option<TypeDescriptor>,
}

impl SynthesisRequest {
    /// A free-standing request with no invoking context.
    pub fn new(source: TypeDescriptor, options: DtoOptions) -> Self {
        Self {
            source,
            options,
            invoking: None,
        }
    }

    /// Attach the request to a declared type.
    pub fn with_invoking(mut self, invoking: TypeDescriptor) -> Self {
        self.invoking = Some(invoking);
        self
    }
}

/// The derived-type synthesizer.
///
/// Stateless apart from its abort flag; cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    abort: AbortFlag,
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A synthesizer polling the given flag for cancellation.
    pub fn with_abort(abort: AbortFlag) -> Self {
        Self { abort }
    }

    /// Synthesize one request into its output unit.
    ///
    /// Returns `None` when the source kind is unsupported (the silent-skip
    /// policy: one bad request must not abort a batch) or when cancellation
    /// was requested.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Option<SourceUnit> {
        if self.abort.is_set() || !request.source.kind.supports_synthesis() {
            return None;
        }

        let invoking = request.invoking.as_ref();
        let config = Config::resolve(&request.options, &request.source, invoking);
        let filtered = properties::filter_properties(&request.source, &config, &self.abort)?;

        let mut rendered_methods = Vec::new();
        if let Some(method) = conversions::render_to_source_method(
            &request.source,
            &config,
            &filtered.included,
            invoking,
        ) {
            rendered_methods.push(method);
        }
        let extension = conversions::render_from_source_extension(
            &request.source,
            &config,
            &filtered.included,
            invoking,
        );

        let generated = GeneratedType {
            target_name: config.target_name,
            target_kind: config.target_kind,
            target_module: config.target_module,
            rendered_properties: filtered.rendered,
            rendered_methods,
            additional_fragments: vec![extension],
        };

        Some(generated.into_unit())
    }

    /// Synthesize a batch, dropping skipped requests and stopping early on
    /// cancellation.
    pub fn synthesize_batch(&self, requests: &[SynthesisRequest]) -> Vec<SourceUnit> {
        let mut units = Vec::new();
        for request in requests {
            if self.abort.is_set() {
                break;
            }
            if let Some(unit) = self.synthesize(request) {
                units.push(unit);
            }
        }
        units
    }
}
