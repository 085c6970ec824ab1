//! Shared field handling for struct and enum derivation.
//!
//! Named fields become record members and unnamed fields become sequence
//! items. Both paths parse field strategies the same way and collect the
//! generic parameters that captured fields use.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, Result};

use crate::{
    case::{member_name, RenameRule},
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Strategy},
};

/// A named field exposed through `Record`.
pub(crate) struct NamedMember {
    /// Member name after `rename` and `rename_all`.
    pub(crate) name: String,
    pub(crate) ident: Ident,
    /// Masked without being read.
    pub(crate) redact: bool,
    pub(crate) span: Span,
}

/// Collects the members of a named field list.
///
/// Skipped fields are left out. Redacted fields are listed but never read, so
/// their types need no bounds.
pub(crate) fn named_members(
    fields: syn::FieldsNamed,
    rule: Option<RenameRule>,
    generics: &syn::Generics,
    used_generics: &mut Vec<Ident>,
) -> Result<Vec<NamedMember>> {
    let mut members: Vec<NamedMember> = Vec::new();
    for field in fields.named {
        let span = field.span();
        let Strategy::Capture { rename, redact } = parse_field_strategy(&field.attrs, true)? else {
            continue;
        };
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "expected a named field"));
        };
        let name = member_name(&ident, rename, rule);
        if members.iter().any(|member| member.name == name) {
            return Err(syn::Error::new(
                span,
                format!("duplicate member name `{name}`"),
            ));
        }
        if !redact {
            collect_generics_from_type(&field.ty, generics, used_generics);
        }
        members.push(NamedMember {
            name,
            ident,
            redact,
            span,
        });
    }
    Ok(members)
}

/// An unnamed field: its pattern binding and, when captured, its position.
pub(crate) struct UnnamedField {
    /// `field_N` for captured fields, `None` for skipped ones.
    pub(crate) binding: Option<Ident>,
    pub(crate) index: syn::Index,
    pub(crate) span: Span,
}

pub(crate) fn unnamed_fields(
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
    used_generics: &mut Vec<Ident>,
) -> Result<Vec<UnnamedField>> {
    let mut result = Vec::new();
    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let binding = if parse_field_strategy(&field.attrs, false)?.is_skipped() {
            None
        } else {
            collect_generics_from_type(&field.ty, generics, used_generics);
            Some(format_ident!("field_{index}"))
        };
        result.push(UnnamedField {
            binding,
            index: syn::Index::from(index),
            span,
        });
    }
    Ok(result)
}

/// Builds the body of `Sequence::items` from already-borrowed item expressions.
pub(crate) fn items_body(items: &[TokenStream], crate_root: &TokenStream) -> TokenStream {
    if items.is_empty() {
        return quote! {
            ::std::boxed::Box::new(::core::iter::empty())
        };
    }
    let count = items.len();
    quote! {
        let items: [&dyn #crate_root::Describe; #count] = [#(#items),*];
        ::std::boxed::Box::new(::core::iter::IntoIterator::into_iter(items))
    }
}

/// `matches!` over the redacted member names, or `false` when there are none.
pub(crate) fn redacted_check(members: &[NamedMember]) -> TokenStream {
    let redacted: Vec<&str> = members
        .iter()
        .filter(|member| member.redact)
        .map(|member| member.name.as_str())
        .collect();
    if redacted.is_empty() {
        quote! { false }
    } else {
        quote! { ::core::matches!(name, #(#redacted)|*) }
    }
}

/// `Cow::Borrowed` name literals in declaration order.
pub(crate) fn member_names(members: &[NamedMember]) -> Vec<TokenStream> {
    members
        .iter()
        .map(|member| {
            let name = &member.name;
            quote_spanned! { member.span =>
                ::std::borrow::Cow::Borrowed(#name)
            }
        })
        .collect()
}
