//! Property-based tests for the synthesis pipeline.
//!
//! Properties covered:
//! - the included-name set equals the filter formula
//! - rendered order is the source declaration order, restricted
//! - optionality follows the make-optional / required / nullable rule
//! - the to-source method exists exactly for non-optional struct sources
//! - synthesis is deterministic

use std::collections::BTreeSet;

use proptest::prelude::*;

use dtogen_core::{
    AbortFlag, Config, DtoOptions, PropertyDescriptor, SynthesisRequest, Synthesizer,
    TypeDescriptor, TypeKind,
};

/// A lowercase identifier that never collides with Rust keywords.
fn arb_name() -> impl Strategy<Value = String> {
    "p[a-z][a-z0-9_]{0,6}"
}

/// Unique property names with primitive/nullable flags attached.
fn arb_properties() -> impl Strategy<Value = Vec<(String, bool, bool)>> {
    prop::collection::btree_set(arb_name(), 0..6).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let len = names.len();
        prop::collection::vec((any::<bool>(), any::<bool>()), len)
            .prop_map(move |flags| {
                names
                    .iter()
                    .cloned()
                    .zip(flags)
                    .map(|(name, (primitive, nullable))| (name, primitive, nullable))
                    .collect()
            })
    })
}

fn arb_options() -> impl Strategy<Value = DtoOptions> {
    (
        prop::collection::btree_set(arb_name(), 0..4),
        any::<bool>(),
        any::<bool>(),
        prop::collection::btree_set(arb_name(), 0..4),
    )
        .prop_map(|(exclude, include_non_primitives, make_optional, required)| {
            let mut options = DtoOptions::new("Order");
            options.exclude = exclude.into_iter().collect();
            options.include_non_primitives = include_non_primitives;
            options.make_optional = make_optional;
            options.required = required.into_iter().collect();
            options
        })
}

fn source_from(properties: &[(String, bool, bool)]) -> TypeDescriptor {
    let mut source = TypeDescriptor::new(TypeKind::Struct, "Order");
    for (name, primitive, nullable) in properties {
        let mut property = if *nullable {
            PropertyDescriptor::new(name, "Option<String>").nullable()
        } else {
            PropertyDescriptor::new(name, "String")
        };
        if !primitive {
            property = property.non_primitive();
        }
        source = source.with_property(property);
    }
    source
}

proptest! {
    #[test]
    fn included_names_follow_the_filter_formula(
        properties in arb_properties(),
        options in arb_options(),
    ) {
        let source = source_from(&properties);
        let config = Config::resolve(&options, &source, None);
        let filtered =
            dtogen_core::properties::filter_properties(&source, &config, &AbortFlag::new())
                .unwrap();

        let expected: BTreeSet<&str> = properties
            .iter()
            .filter(|(name, primitive, _)| {
                !options.exclude.contains(name)
                    && (*primitive || options.include_non_primitives)
            })
            .map(|(name, _, _)| name.as_str())
            .collect();
        let actual: BTreeSet<&str> = filtered
            .included
            .iter()
            .map(|entry| entry.property.name.as_str())
            .collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn rendered_order_is_source_order_restricted(
        properties in arb_properties(),
        options in arb_options(),
    ) {
        let source = source_from(&properties);
        let config = Config::resolve(&options, &source, None);
        let filtered =
            dtogen_core::properties::filter_properties(&source, &config, &AbortFlag::new())
                .unwrap();

        let included: Vec<&str> = filtered
            .included
            .iter()
            .map(|entry| entry.property.name.as_str())
            .collect();
        let expected: Vec<&str> = properties
            .iter()
            .map(|(name, _, _)| name.as_str())
            .filter(|name| included.contains(name))
            .collect();

        prop_assert_eq!(included, expected);
        prop_assert_eq!(filtered.rendered.len(), filtered.included.len());
    }

    #[test]
    fn optionality_follows_the_rule(
        properties in arb_properties(),
        options in arb_options(),
    ) {
        let source = source_from(&properties);
        let config = Config::resolve(&options, &source, None);
        let filtered =
            dtogen_core::properties::filter_properties(&source, &config, &AbortFlag::new())
                .unwrap();

        for entry in &filtered.included {
            let nullable = entry.property.nullable;
            let expected = !nullable
                && options.make_optional
                && !options.required.contains(&entry.property.name);
            prop_assert_eq!(entry.optional, expected, "{}", entry.property.name);
        }
    }

    #[test]
    fn to_source_presence_matches_kind_and_flag(
        properties in arb_properties(),
        options in arb_options(),
        as_trait in any::<bool>(),
    ) {
        let mut source = source_from(&properties);
        if as_trait {
            source.kind = TypeKind::Trait;
        }
        let request = SynthesisRequest::new(source, options.clone());

        let unit = Synthesizer::new().synthesize(&request).unwrap();

        let expected = !as_trait && !options.make_optional;
        prop_assert_eq!(unit.content.contains("pub fn to_order(&self)"), expected);
        prop_assert!(unit.content.contains("Extensions"));
    }

    #[test]
    fn synthesis_is_deterministic(
        properties in arb_properties(),
        options in arb_options(),
    ) {
        let request = SynthesisRequest::new(source_from(&properties), options);
        let synthesizer = Synthesizer::new();

        let first = synthesizer.synthesize(&request).unwrap();
        let second = synthesizer.synthesize(&request).unwrap();

        prop_assert_eq!(first, second);
    }
}
