//! Container-level attribute parsing for `#[derive(Snapshot)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, LitStr, Meta, Result};

use crate::case::RenameRule;

/// Options parsed from container-level `#[snapshot(...)]` attributes.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Case convention applied to member and variant names.
    pub(crate) rename_all: Option<RenameRule>,
}

/// Parses container-level `#[snapshot(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("snapshot") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        let value: LitStr = meta.value()?.parse()?;
                        let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                            syn::Error::new(
                                value.span(),
                                format!(
                                    "unknown rename rule `{}`; expected one of {}",
                                    value.value(),
                                    RenameRule::NAMES.join(", ")
                                ),
                            )
                        })?;
                        if options.rename_all.replace(rule).is_some() {
                            return Err(meta.error("duplicate `rename_all` option"));
                        }
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `rename_all`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected `#[snapshot(rename_all = \"...\")]` on the container",
                ));
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[snapshot]",
                ));
            }
        }
    }

    Ok(options)
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
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.rename_all.is_none());
    }

    #[test]
    fn rename_all_is_parsed() {
        let attrs = parse_attrs(quote! { #[snapshot(rename_all = "PascalCase")] });
        let options = parse_container_options(&attrs).unwrap();
        assert_eq!(options.rename_all, Some(RenameRule::PascalCase));
    }

    #[test]
    fn unknown_rule_errors() {
        let attrs = parse_attrs(quote! { #[snapshot(rename_all = "Title Case")] });
        let err = parse_container_options(&attrs).unwrap_err().to_string();
        assert!(err.contains("unknown rename rule `Title Case`"));
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[snapshot(deny_unknown)] });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option"));
    }

    #[test]
    fn duplicate_rename_all_errors() {
        let attrs = parse_attrs(quote! {
            #[snapshot(rename_all = "camelCase")]
            #[snapshot(rename_all = "snake_case")]
        });
        let result = parse_container_options(&attrs);
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn bare_snapshot_on_container_errors() {
        let attrs = parse_attrs(quote! { #[snapshot] });
        assert!(parse_container_options(&attrs).is_err());
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! { #[serde(rename_all = "camelCase")] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.rename_all.is_none());
    }
}
