//! Synthesis orchestration.
//!
//! Wraps the core [`Synthesizer`]: turns `[[generate]]` directives into
//! free-standing requests, runs the whole batch, and reports which requests
//! were silently skipped so the command layer can warn about them.

use crate::error::ExtractError;
use crate::extract::TypeIndex;
use dtogen_core::{AbortFlag, DtoOptions, SourceUnit, SynthesisRequest, Synthesizer};

/// Output of a generation run.
#[derive(Debug, Default)]
pub struct GeneratedOutput {
    /// Successfully synthesized units, in request order.
    pub units: Vec<SourceUnit>,
    /// Names of sources whose requests were skipped (unsupported kind or
    /// cancellation). The batch keeps going past them.
    pub skipped: Vec<String>,
}

/// Drives the synthesizer over a batch of requests.
#[derive(Debug, Default)]
pub struct DtoGenerator {
    synthesizer: Synthesizer,
}

impl DtoGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator polling the given flag for cancellation.
    pub fn with_abort(abort: AbortFlag) -> Self {
        Self {
            synthesizer: Synthesizer::with_abort(abort),
        }
    }

    /// Synthesize every request, collecting skips instead of failing.
    pub fn generate(&self, requests: &[SynthesisRequest]) -> GeneratedOutput {
        let mut output = GeneratedOutput::default();
        for request in requests {
            match self.synthesizer.synthesize(request) {
                Some(unit) => output.units.push(unit),
                None => output.skipped.push(request.source.name.clone()),
            }
        }
        output
    }

    /// Resolve `[[generate]]` directives against the type index.
    ///
    /// Directives carry no invoking context, so the derived type inherits
    /// nothing and override hooks never apply. Unresolved sources become
    /// warnings, not failures.
    pub fn directive_requests(
        &self,
        index: &TypeIndex,
        directives: &[DtoOptions],
    ) -> (Vec<SynthesisRequest>, Vec<ExtractError>) {
        let mut requests = Vec::new();
        let mut warnings = Vec::new();

        for options in directives {
            match index.resolve(&options.source) {
                Some(source) => requests.push(SynthesisRequest::new(source, options.clone())),
                None => warnings.push(ExtractError::unknown_source(
                    "[[generate]] directive",
                    &options.source,
                )),
            }
        }

        (requests, warnings)
    }
}
