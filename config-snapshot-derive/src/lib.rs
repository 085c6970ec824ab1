//! Derive macro for `config-snapshot`.
//!
//! This crate generates the record adapters behind `#[derive(Snapshot)]`. It:
//! - reads `#[snapshot(...)]` container, variant and field attributes
//! - emits `Describe` plus `Record` or `Sequence` implementations that expose
//!   fields by name and by reference
//!
//! It does **not** decide what is sensitive beyond `#[snapshot(redact)]`.
//! Key classification, masking and traversal live in the main
//! `config-snapshot` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod case;
mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod members;
mod strategy;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_describe_bounds;

/// Derives `config_snapshot::Describe` for structs and enums.
///
/// # Shapes
///
/// | Item | Captured as |
/// |------|-------------|
/// | struct with named fields | record: one entry per field, in declaration order |
/// | struct with a single unnamed field | whatever that field is (transparent) |
/// | tuple struct | sequence of its fields |
/// | unit struct | its name |
/// | unit variant | the variant name, never its discriminant |
/// | newtype variant | whatever its field is (transparent) |
/// | struct variant | record |
/// | tuple variant | sequence |
///
/// # Container Attributes
///
/// - `#[snapshot(rename_all = "...")]` - Renames fields (and, on enums, variants and the
///   fields of struct variants). Accepts `PascalCase`, `camelCase`, `snake_case`,
///   `kebab-case`, `SCREAMING_SNAKE_CASE`, `lowercase` and `UPPERCASE`.
///
/// # Variant Attributes
///
/// - `#[snapshot(rename = "Name")]` - Uses `Name` for the variant.
///
/// # Field Attributes
///
/// - **No annotation**: The field is captured. Its type must implement `Describe`.
/// - `#[snapshot(skip)]`: The field is never read and imposes no bounds.
/// - `#[snapshot(rename = "Name")]`: Uses `Name` as the entry key (named fields only).
/// - `#[snapshot(redact)]`: The value is always masked, whatever its key (named fields only).
///
/// Generic parameters used by captured fields get a `Describe` bound; `PhantomData<T>`
/// does not count. Unions are rejected at compile time.
#[proc_macro_derive(Snapshot, attributes(snapshot))]
pub fn derive_snapshot(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the `config-snapshot` crate root.
///
/// Handles crate renaming (e.g., `snap = { package = "config-snapshot", ... }`).
/// Inside `config-snapshot` itself the crate aliases its own name, so the
/// absolute path also resolves from its unit tests and doctests.
fn crate_root() -> TokenStream {
    match crate_name("config-snapshot") {
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::config_snapshot },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
    }
}

/// Everything a shape derivation contributes to the final impls.
struct DeriveOutput {
    /// Body of `Describe::shape`.
    shape_body: TokenStream,
    /// Extra trait impls (`Record`, `Sequence`) for the type.
    capability_impls: Vec<Capability>,
    /// Generic parameters used by captured fields.
    used_generics: Vec<syn::Ident>,
}

/// A capability trait and the items of its impl block.
struct Capability {
    trait_name: &'static str,
    items: TokenStream,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { rename_all } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let output = match data {
        Data::Struct(data) => derive_struct(&ident, data, &generics, rename_all, &crate_root)?,
        Data::Enum(data) => derive_enum(&ident, data, &generics, rename_all, &crate_root)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Snapshot` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_describe_bounds(generics, &output.used_generics, &crate_root);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let shape_body = &output.shape_body;

    let capability_impls = output.capability_impls.iter().map(|capability| {
        let trait_ident = format_ident!("{}", capability.trait_name);
        let items = &capability.items;
        quote! {
            impl #impl_generics #crate_root::#trait_ident for #ident #ty_generics #where_clause {
                #items
            }
        }
    });

    Ok(quote! {
        impl #impl_generics #crate_root::Describe for #ident #ty_generics #where_clause {
            fn shape(&self) -> #crate_root::Shape<'_> {
                #shape_body
            }
        }

        #(#capability_impls)*
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::expand;

    fn expand_err(tokens: proc_macro2::TokenStream) -> String {
        let input = syn::parse2(tokens).unwrap();
        expand(input).unwrap_err().to_string()
    }

    fn expand_ok(tokens: proc_macro2::TokenStream) -> String {
        let input = syn::parse2(tokens).unwrap();
        expand(input).unwrap().to_string()
    }

    #[test]
    fn unions_are_rejected() {
        let err = expand_err(quote! {
            union Bits { a: u32, b: f32 }
        });
        assert!(err.contains("cannot be derived for unions"));
    }

    #[test]
    fn named_struct_becomes_record() {
        let out = expand_ok(quote! {
            struct Database { host: String, port: u16 }
        });
        assert!(out.contains("Shape :: Record (self)"));
        assert!(out.contains("Record for Database"));
        assert!(out.contains("\"host\""));
    }

    #[test]
    fn newtype_struct_is_transparent() {
        let out = expand_ok(quote! {
            struct Port(u16);
        });
        assert!(out.contains("Describe :: shape (& self . 0)"));
        assert!(!out.contains("Record for"));
    }

    #[test]
    fn generic_fields_get_describe_bounds() {
        let out = expand_ok(quote! {
            struct Wrapper<T, U> { value: T, #[snapshot(skip)] hidden: U }
        });
        assert!(out.contains("T : :: config_snapshot :: Describe"));
        assert!(!out.contains("U : :: config_snapshot :: Describe"));
    }

    #[test]
    fn unknown_field_option_is_rejected() {
        let err = expand_err(quote! {
            struct Settings { #[snapshot(hide)] value: u8 }
        });
        assert!(err.contains("unknown field option"));
    }

    #[test]
    fn rename_on_tuple_field_is_rejected() {
        let err = expand_err(quote! {
            struct Pair(#[snapshot(rename = "A")] u8, u8);
        });
        assert!(err.contains("only supported on named fields"));
    }

    #[test]
    fn duplicate_member_names_are_rejected() {
        let err = expand_err(quote! {
            struct Settings { #[snapshot(rename = "port")] other: u8, port: u8 }
        });
        assert!(err.contains("duplicate member name `port`"));
    }
}
