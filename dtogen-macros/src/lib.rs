//! # dtogen-macros
//!
//! The `#[dto(...)]` attribute for declaring derived transfer-type requests.
//!
//! The attribute is deliberately inert at compile time: generation itself is
//! performed by the `dtogen` CLI, which reads source text rather than
//! expanded code. The macro's job is to make annotated sources compile and
//! to fail fast on malformed requests:
//!
//! - With request arguments, it validates the options and rejects carriers
//!   the generator cannot re-declare (anything but a struct).
//! - On any struct it strips `#[dto(...)]` field markers such as
//!   `#[dto(nullable)]`, which have no compile-time meaning of their own.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dtogen_macros::dto;
//!
//! // A request: derive OrderView from crate::shop::Order.
//! #[dto(source = "crate::shop::Order", exclude = "internal")]
//! pub struct OrderView;
//!
//! // A marker carrier: the field attribute is stripped here and consumed
//! // by the CLI.
//! #[dto]
//! pub struct Order {
//!     pub id: i64,
//!     #[dto(nullable)]
//!     pub note: String,
//! }
//! ```
//!
//! ## Recognized request options
//!
//! `source` (required), `module`, `name`, `include_non_primitives`,
//! `exclude` (repeatable), `make_optional`, `required` (repeatable),
//! `copy_attrs`. See `dtogen_core::DtoOptions` for defaults.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::Item;

use darling::ast::NestedMeta;
use darling::FromMeta;
use dtogen_core::DtoOptions;

/// Declare a synthesis request or mark a source type for the generator.
#[proc_macro_attribute]
pub fn dto(args: TokenStream, input: TokenStream) -> TokenStream {
    dto_impl(args.into(), input.into()).into()
}

fn dto_impl(args: TokenStream2, input: TokenStream2) -> TokenStream2 {
    let mut item: Item = match syn::parse2(input.clone()) {
        Ok(item) => item,
        Err(err) => {
            let error = err.into_compile_error();
            return quote! { #error #input };
        }
    };

    let mut errors = TokenStream2::new();
    if !args.is_empty() {
        if let Err(error) = validate_request(args, &item) {
            errors.extend(error);
        }
    }

    strip_field_markers(&mut item);

    quote! { #errors #item }
}

/// Check the carrier kind and parse the request options, keeping darling's
/// span-accurate diagnostics for unknown or malformed options.
fn validate_request(args: TokenStream2, item: &Item) -> Result<(), TokenStream2> {
    if !matches!(item, Item::Struct(_)) {
        let name = item_name(item);
        return Err(syn::Error::new_spanned(
            item,
            format!(
                "#[dto(...)] requests must be attached to a struct; `{}` cannot be re-declared \
                 as a transfer type",
                name
            ),
        )
        .into_compile_error());
    }

    let nested = NestedMeta::parse_meta_list(args)
        .map_err(|err| darling::Error::from(err).write_errors())?;
    DtoOptions::from_list(&nested)
        .map(|_| ())
        .map_err(|err| err.write_errors())
}

/// Drop `#[dto(...)]` field attributes so annotated sources compile; the CLI
/// reads them from source text, not from expanded code.
fn strip_field_markers(item: &mut Item) {
    if let Item::Struct(item_struct) = item {
        for field in item_struct.fields.iter_mut() {
            field.attrs.retain(|attr| !attr.path().is_ident("dto"));
        }
    }
}

fn item_name(item: &Item) -> String {
    match item {
        Item::Enum(item) => item.ident.to_string(),
        Item::Trait(item) => item.ident.to_string(),
        Item::Union(item) => item.ident.to_string(),
        Item::Type(item) => item.ident.to_string(),
        _ => "this item".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(args: TokenStream2, input: TokenStream2) -> String {
        dto_impl(args, input).to_string()
    }

    #[test]
    fn bare_marker_strips_field_attributes() {
        let output = expand(
            TokenStream2::new(),
            quote! {
                pub struct Order {
                    pub id: i64,
                    #[dto(nullable)]
                    pub note: String,
                }
            },
        );

        assert!(!output.contains("dto"));
        assert!(!output.contains("nullable"));
        assert!(output.contains("pub note : String"));
    }

    #[test]
    fn other_field_attributes_survive() {
        let output = expand(
            TokenStream2::new(),
            quote! {
                pub struct Order {
                    #[serde(rename = "id")]
                    #[dto(nullable)]
                    pub id: i64,
                }
            },
        );

        assert!(output.contains("serde"));
        assert!(!output.contains("dto"));
    }

    #[test]
    fn valid_request_re_emits_the_struct() {
        let output = expand(
            quote!(source = "crate::shop::Order", exclude = "internal"),
            quote! {
                pub struct OrderView;
            },
        );

        assert!(output.contains("pub struct OrderView ;"));
        assert!(!output.contains("compile_error"));
    }

    #[test]
    fn unknown_options_produce_a_compile_error() {
        let output = expand(
            quote!(source = "Order", shiny = true),
            quote! { pub struct OrderView; },
        );

        assert!(output.contains("compile_error"));
        // The item still expands so follow-on errors stay readable.
        assert!(output.contains("pub struct OrderView ;"));
    }

    #[test]
    fn missing_source_produces_a_compile_error() {
        let output = expand(
            quote!(name = "OrderView"),
            quote! { pub struct OrderView; },
        );

        assert!(output.contains("compile_error"));
    }

    #[test]
    fn requests_on_enums_are_rejected() {
        let output = expand(
            quote!(source = "Order"),
            quote! { pub enum Status { Active } },
        );

        assert!(output.contains("compile_error"));
        assert!(output.contains("must be attached to a struct"));
    }

    #[test]
    fn requests_on_traits_are_rejected() {
        let output = expand(
            quote!(source = "Order"),
            quote! { pub trait OrderLike {} },
        );

        assert!(output.contains("compile_error"));
    }

    #[test]
    fn bare_marker_on_an_enum_is_inert() {
        let output = expand(
            TokenStream2::new(),
            quote! { pub enum Status { Active } },
        );

        assert!(!output.contains("compile_error"));
        assert!(output.contains("pub enum Status"));
    }
}
