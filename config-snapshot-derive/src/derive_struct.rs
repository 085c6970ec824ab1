//! Struct-specific `Describe` derivation.
//!
//! Named structs become records, single-field tuple structs are transparent,
//! other tuple structs become sequences and unit structs render as their name.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{DataStruct, Fields, Result};

use crate::{
    case::RenameRule,
    members::{items_body, member_names, named_members, redacted_check, unnamed_fields},
    Capability, DeriveOutput,
};

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
    rename_all: Option<RenameRule>,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    match data.fields {
        Fields::Named(fields) => derive_named_struct(fields, generics, rename_all, crate_root),
        Fields::Unnamed(fields) => derive_unnamed_struct(fields, generics, crate_root),
        Fields::Unit => {
            let symbol = name.to_string();
            Ok(DeriveOutput {
                shape_body: quote! {
                    #crate_root::Shape::Scalar(#crate_root::Scalar::Symbol(#symbol))
                },
                capability_impls: Vec::new(),
                used_generics: Vec::new(),
            })
        }
    }
}

fn derive_named_struct(
    fields: syn::FieldsNamed,
    generics: &syn::Generics,
    rename_all: Option<RenameRule>,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();
    let members = named_members(fields, rename_all, generics, &mut used_generics)?;

    let names = member_names(&members);
    let arms = members.iter().filter(|member| !member.redact).map(|member| {
        let name = &member.name;
        let ident = &member.ident;
        quote_spanned! { member.span =>
            #name => ::core::result::Result::Ok(#crate_root::Member::Borrowed(&self.#ident))
        }
    });
    let redacted = redacted_check(&members);

    let record = Capability {
        trait_name: "Record",
        items: quote! {
            fn members(&self) -> ::std::vec::Vec<::std::borrow::Cow<'_, str>> {
                ::std::vec![#(#names),*]
            }

            fn member(
                &self,
                name: &str,
            ) -> ::core::result::Result<#crate_root::Member<'_>, #crate_root::AccessError> {
                match name {
                    #(#arms,)*
                    _ => ::core::result::Result::Err(#crate_root::AccessError::no_such_member(name)),
                }
            }

            fn is_redacted(&self, name: &str) -> bool {
                #redacted
            }
        },
    };

    Ok(DeriveOutput {
        shape_body: quote! { #crate_root::Shape::Record(self) },
        capability_impls: vec![record],
        used_generics,
    })
}

fn derive_unnamed_struct(
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();
    let fields = unnamed_fields(fields, generics, &mut used_generics)?;

    if let [field] = fields.as_slice() {
        if field.binding.is_some() {
            let index = &field.index;
            return Ok(DeriveOutput {
                shape_body: quote_spanned! { field.span =>
                    #crate_root::Describe::shape(&self.#index)
                },
                capability_impls: Vec::new(),
                used_generics,
            });
        }
    }

    let items: Vec<TokenStream> = fields
        .iter()
        .filter(|field| field.binding.is_some())
        .map(|field| {
            let index = &field.index;
            quote_spanned! { field.span => &self.#index }
        })
        .collect();
    let body = items_body(&items, crate_root);

    Ok(DeriveOutput {
        shape_body: quote! { #crate_root::Shape::Sequence(self) },
        capability_impls: vec![Capability {
            trait_name: "Sequence",
            items: quote! {
                fn items(&self) -> #crate_root::Items<'_> {
                    #body
                }
            },
        }],
        used_generics,
    })
}
