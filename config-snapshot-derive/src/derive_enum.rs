//! Enum-specific `Describe` derivation.
//!
//! This module generates one match arm per variant for `Describe::shape` and,
//! when struct or tuple variants exist, the `Record` and `Sequence` impls that
//! expose their fields.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{DataEnum, Fields, Result};

use crate::{
    case::{member_name, RenameRule},
    members::{items_body, member_names, named_members, redacted_check, unnamed_fields},
    strategy::parse_variant_rename,
    Capability, DeriveOutput,
};

/// Arms accumulated across all variants.
#[derive(Default)]
struct EnumArms {
    shape: Vec<TokenStream>,
    members: Vec<TokenStream>,
    member: Vec<TokenStream>,
    redacted: Vec<TokenStream>,
    items: Vec<TokenStream>,
}

/// Context for deriving a single enum variant.
struct VariantContext<'a> {
    name: &'a Ident,
    variant_ident: &'a Ident,
    generics: &'a syn::Generics,
    rename_all: Option<RenameRule>,
    crate_root: &'a TokenStream,
    used_generics: &'a mut Vec<Ident>,
}

pub(crate) fn derive_enum(
    name: &Ident,
    data: DataEnum,
    generics: &syn::Generics,
    rename_all: Option<RenameRule>,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut arms = EnumArms::default();
    let mut used_generics = Vec::new();

    for variant in data.variants {
        let rename = parse_variant_rename(&variant.attrs)?;
        let variant_ident = &variant.ident;
        let mut ctx = VariantContext {
            name,
            variant_ident,
            generics,
            rename_all,
            crate_root,
            used_generics: &mut used_generics,
        };

        match variant.fields {
            Fields::Unit => {
                let symbol = member_name(variant_ident, rename, rename_all);
                arms.shape.push(quote! {
                    #name::#variant_ident => #crate_root::Shape::Scalar(
                        #crate_root::Scalar::Symbol(#symbol)
                    )
                });
            }
            Fields::Named(fields) => derive_named_variant(&mut ctx, &mut arms, fields)?,
            Fields::Unnamed(fields) => derive_unnamed_variant(&mut ctx, &mut arms, fields)?,
        }
    }

    let EnumArms {
        shape,
        members,
        member,
        redacted,
        items,
    } = arms;

    let shape_body = if shape.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#shape),*
            }
        }
    };

    let mut capability_impls = Vec::new();
    if !members.is_empty() {
        capability_impls.push(Capability {
            trait_name: "Record",
            items: quote! {
                #[allow(unreachable_patterns)]
                fn members(&self) -> ::std::vec::Vec<::std::borrow::Cow<'_, str>> {
                    match self {
                        #(#members,)*
                        _ => ::std::vec::Vec::new(),
                    }
                }

                fn member(
                    &self,
                    name: &str,
                ) -> ::core::result::Result<#crate_root::Member<'_>, #crate_root::AccessError> {
                    match (self, name) {
                        #(#member,)*
                        _ => ::core::result::Result::Err(
                            #crate_root::AccessError::no_such_member(name)
                        ),
                    }
                }

                #[allow(unreachable_patterns)]
                fn is_redacted(&self, name: &str) -> bool {
                    match self {
                        #(#redacted,)*
                        _ => false,
                    }
                }
            },
        });
    }
    if !items.is_empty() {
        capability_impls.push(Capability {
            trait_name: "Sequence",
            items: quote! {
                #[allow(unreachable_patterns)]
                fn items(&self) -> #crate_root::Items<'_> {
                    match self {
                        #(#items,)*
                        _ => ::std::boxed::Box::new(::core::iter::empty()),
                    }
                }
            },
        });
    }

    Ok(DeriveOutput {
        shape_body,
        capability_impls,
        used_generics,
    })
}

fn derive_named_variant(
    ctx: &mut VariantContext<'_>,
    arms: &mut EnumArms,
    fields: syn::FieldsNamed,
) -> Result<()> {
    let name = ctx.name;
    let variant_ident = ctx.variant_ident;
    let crate_root = ctx.crate_root;

    let members = named_members(fields, ctx.rename_all, ctx.generics, ctx.used_generics)?;
    let names = member_names(&members);
    let redacted = redacted_check(&members);

    arms.shape.push(quote! {
        #name::#variant_ident { .. } => #crate_root::Shape::Record(self)
    });
    arms.members.push(quote! {
        #name::#variant_ident { .. } => ::std::vec![#(#names),*]
    });
    arms.redacted.push(quote! {
        #name::#variant_ident { .. } => #redacted
    });
    for member in members.iter().filter(|member| !member.redact) {
        let member_name = &member.name;
        let ident = &member.ident;
        arms.member.push(quote_spanned! { member.span =>
            (#name::#variant_ident { #ident: value, .. }, #member_name) => {
                ::core::result::Result::Ok(#crate_root::Member::Borrowed(value))
            }
        });
    }
    Ok(())
}

fn derive_unnamed_variant(
    ctx: &mut VariantContext<'_>,
    arms: &mut EnumArms,
    fields: syn::FieldsUnnamed,
) -> Result<()> {
    let name = ctx.name;
    let variant_ident = ctx.variant_ident;
    let crate_root = ctx.crate_root;

    let fields = unnamed_fields(fields, ctx.generics, ctx.used_generics)?;
    let patterns: Vec<TokenStream> = fields
        .iter()
        .map(|field| match &field.binding {
            Some(binding) => quote! { #binding },
            None => quote! { _ },
        })
        .collect();

    if let [field] = fields.as_slice() {
        if let Some(binding) = &field.binding {
            arms.shape.push(quote_spanned! { field.span =>
                #name::#variant_ident(#binding) => #crate_root::Describe::shape(#binding)
            });
            return Ok(());
        }
    }

    let items: Vec<TokenStream> = fields
        .iter()
        .filter_map(|field| field.binding.as_ref())
        .map(|binding| quote! { #binding })
        .collect();
    let body = items_body(&items, crate_root);

    arms.shape.push(quote! {
        #name::#variant_ident(..) => #crate_root::Shape::Sequence(self)
    });
    arms.items.push(quote! {
        #name::#variant_ident(#(#patterns),*) => {
            #body
        }
    });
    Ok(())
}
