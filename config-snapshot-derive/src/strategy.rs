//! Parsing of `#[snapshot(...)]` field and variant attributes.
//!
//! This module maps attribute syntax to capture decisions and produces
//! structured errors for invalid forms.

use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// How a field is captured.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Capture` | Read by reference under its own name |
/// | `#[snapshot(rename = "..")]` | `Capture` | Read under the given name |
/// | `#[snapshot(redact)]` | `Capture` | Always masked, never read |
/// | `#[snapshot(skip)]` | `Skip` | Not exposed at all |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// The field is exposed as a member or item.
    Capture {
        /// Explicit member name.
        rename: Option<String>,
        /// Whether the value is always masked.
        redact: bool,
    },
    /// The field is invisible to the snapshot.
    Skip,
}

impl Strategy {
    pub(crate) fn is_skipped(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

#[derive(Default)]
struct RawFieldOptions {
    skip: bool,
    rename: Option<LitStr>,
    redact: bool,
}

/// Parses the attributes of a field. `named` is false for tuple fields, which
/// only accept `skip`.
pub(crate) fn parse_field_strategy(attrs: &[Attribute], named: bool) -> Result<Strategy> {
    let mut raw = RawFieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("snapshot") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        if raw.skip {
                            return Err(meta.error("duplicate `skip` option"));
                        }
                        raw.skip = true;
                    } else if meta.path.is_ident("redact") {
                        if raw.redact {
                            return Err(meta.error("duplicate `redact` option"));
                        }
                        if !named {
                            return Err(meta.error("`redact` is only supported on named fields"));
                        }
                        raw.redact = true;
                    } else if meta.path.is_ident("rename") {
                        if !named {
                            return Err(meta.error("`rename` is only supported on named fields"));
                        }
                        let value: LitStr = meta.value()?.parse()?;
                        if raw.rename.replace(value).is_some() {
                            return Err(meta.error("duplicate `rename` option"));
                        }
                    } else {
                        return Err(meta.error(format!(
                            "unknown field option `{}`; expected `skip`, `rename` or `redact`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )));
                    }
                    Ok(())
                })?;
            }
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected an option list, e.g. #[snapshot(skip)]",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[snapshot]",
                ));
            }
        }
    }

    if raw.skip {
        if let Some(rename) = &raw.rename {
            return Err(syn::Error::new(
                rename.span(),
                "`skip` cannot be combined with `rename`",
            ));
        }
        if raw.redact {
            return Err(syn::Error::new(
                attrs
                    .iter()
                    .find(|attr| attr.path().is_ident("snapshot"))
                    .map_or_else(proc_macro2::Span::call_site, Spanned::span),
                "`skip` cannot be combined with `redact`",
            ));
        }
        return Ok(Strategy::Skip);
    }

    Ok(Strategy::Capture {
        rename: raw.rename.map(|name| name.value()),
        redact: raw.redact,
    })
}

/// Parses the attributes of an enum variant: only `rename` is accepted.
pub(crate) fn parse_variant_rename(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut rename: Option<LitStr> = None;
    for attr in attrs {
        if !attr.path().is_ident("snapshot") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(
                attr.span(),
                "expected `#[snapshot(rename = \"...\")]` on a variant",
            ));
        };
        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                if rename.replace(value).is_some() {
                    return Err(meta.error("duplicate `rename` option"));
                }
                Ok(())
            } else {
                Err(meta.error(format!(
                    "unknown variant option `{}`; expected `rename`",
                    meta.path
                        .get_ident()
                        .map_or_else(|| "?".to_string(), ToString::to_string)
                )))
            }
        })?;
    }
    Ok(rename.map(|name| name.value()))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_captures_under_own_name() {
        let attrs = parse_attrs(quote! {});
        let strategy = parse_field_strategy(&attrs, true).unwrap();
        assert!(matches!(
            strategy,
            Strategy::Capture {
                rename: None,
                redact: false
            }
        ));
    }

    #[test]
    fn skip_is_parsed() {
        let attrs = parse_attrs(quote! { #[snapshot(skip)] });
        assert!(parse_field_strategy(&attrs, true).unwrap().is_skipped());
        assert!(parse_field_strategy(&attrs, false).unwrap().is_skipped());
    }

    #[test]
    fn rename_and_redact_combine() {
        let attrs = parse_attrs(quote! { #[snapshot(rename = "ConnString", redact)] });
        match parse_field_strategy(&attrs, true).unwrap() {
            Strategy::Capture { rename, redact } => {
                assert_eq!(rename.as_deref(), Some("ConnString"));
                assert!(redact);
            }
            Strategy::Skip => panic!("expected Capture"),
        }
    }

    #[test]
    fn options_may_span_several_attributes() {
        let attrs = parse_attrs(quote! {
            #[snapshot(redact)]
            #[snapshot(rename = "Key")]
        });
        assert!(matches!(
            parse_field_strategy(&attrs, true).unwrap(),
            Strategy::Capture { redact: true, .. }
        ));
    }

    #[test]
    fn skip_with_rename_errors() {
        let attrs = parse_attrs(quote! { #[snapshot(skip, rename = "X")] });
        let err = parse_field_strategy(&attrs, true).unwrap_err().to_string();
        assert!(err.contains("cannot be combined"));
    }

    #[test]
    fn duplicate_option_errors() {
        let attrs = parse_attrs(quote! { #[snapshot(redact, redact)] });
        let err = parse_field_strategy(&attrs, true).unwrap_err().to_string();
        assert!(err.contains("duplicate `redact`"));
    }

    #[test]
    fn tuple_fields_reject_named_options() {
        let attrs = parse_attrs(quote! { #[snapshot(redact)] });
        let err = parse_field_strategy(&attrs, false).unwrap_err().to_string();
        assert!(err.contains("only supported on named fields"));
    }

    #[test]
    fn bare_attribute_errors() {
        let attrs = parse_attrs(quote! { #[snapshot] });
        assert!(parse_field_strategy(&attrs, true).is_err());
    }

    #[test]
    fn name_value_syntax_error() {
        let attrs = parse_attrs(quote! { #[snapshot = "value"] });
        let err = parse_field_strategy(&attrs, true).unwrap_err().to_string();
        assert!(err.contains("name-value syntax is not supported"));
    }

    #[test]
    fn variant_rename_is_parsed() {
        let attrs = parse_attrs(quote! { #[snapshot(rename = "read-only")] });
        assert_eq!(
            parse_variant_rename(&attrs).unwrap().as_deref(),
            Some("read-only")
        );
        let attrs = parse_attrs(quote! { #[snapshot(skip)] });
        assert!(parse_variant_rename(&attrs)
            .unwrap_err()
            .to_string()
            .contains("unknown variant option"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(skip)]
        });
        assert!(!parse_field_strategy(&attrs, true).unwrap().is_skipped());
    }
}
