//! Generic type parameter handling and trait bound management.
//!
//! This module adds bounds only for generics that are used by captured
//! fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are explicitly skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require Describe
//! }
//! ```
//!
//! Without this, `TypedId<Connection>` would require `Connection: Describe`
//! even though the marker holds no data.

use proc_macro2::TokenStream;
use syn::{parse_quote, Ident};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }
            }

            // A bare parameter is a single-segment path naming it.
            if let Some(ident) = path.path.get_ident() {
                for param in generics.type_params() {
                    if *ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Adds `Describe` bounds to generic parameters used in captured fields.
pub(crate) fn add_describe_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    crate_root: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#crate_root::Describe));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn collect(ty: proc_macro2::TokenStream, generics: proc_macro2::TokenStream) -> Vec<String> {
        let ty: syn::Type = syn::parse2(ty).unwrap();
        let generics: syn::Generics = syn::parse2(generics).unwrap();
        let mut result = Vec::new();
        collect_generics_from_type(&ty, &generics, &mut result);
        result.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_parameters_inside_containers() {
        assert_eq!(collect(quote! { Vec<Option<T>> }, quote! { <T, U> }), ["T"]);
        assert_eq!(
            collect(quote! { HashMap<K, V> }, quote! { <K, V> }),
            ["K", "V"]
        );
    }

    #[test]
    fn follows_references_arrays_and_tuples() {
        assert_eq!(collect(quote! { &'a T }, quote! { <'a, T> }), ["T"]);
        assert_eq!(collect(quote! { [T; 4] }, quote! { <T> }), ["T"]);
        assert_eq!(collect(quote! { (T, U) }, quote! { <T, U> }), ["T", "U"]);
    }

    #[test]
    fn phantom_data_is_ignored() {
        assert!(collect(quote! { PhantomData<T> }, quote! { <T> }).is_empty());
        assert!(collect(quote! { ::core::marker::PhantomData<T> }, quote! { <T> }).is_empty());
    }

    #[test]
    fn paths_through_a_parameter_are_not_the_parameter() {
        assert!(collect(quote! { T::Output }, quote! { <T> }).is_empty());
    }

    #[test]
    fn bounds_only_used_parameters() {
        let generics: syn::Generics = syn::parse2(quote! { <T, U> }).unwrap();
        let used = vec![Ident::new("T", proc_macro2::Span::call_site())];
        let bounded = add_describe_bounds(generics, &used, &quote! { ::config_snapshot });
        let (impl_generics, _, _) = bounded.split_for_impl();
        assert_eq!(
            quote! { #impl_generics }.to_string(),
            "< T : :: config_snapshot :: Describe , U >"
        );
    }
}
