//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts configuration attributes from the struct and its
//! fields during macro expansion. The annotation string itself is passed
//! through untouched and interpreted at runtime.

use syn::parse::ParseStream;
use syn::{Attribute, Field, LitStr, Token};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw annotation string, e.g. `"DB_URL,required"`.
    pub annotation: Option<LitStr>,

    /// Merge the field's children into the parent key.
    pub flatten: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Accepts a string literal annotation and the `flatten` flag, in any
    /// order and across any number of `#[env]` attributes.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&field.attrs) {
            attr.parse_args_with(|input: ParseStream| {
                while !input.is_empty() {
                    if input.peek(LitStr) {
                        let lit: LitStr = input.parse()?;
                        if attrs.annotation.is_some() {
                            return Err(syn::Error::new(
                                lit.span(),
                                "duplicate env annotation string",
                            ));
                        }
                        attrs.annotation = Some(lit);
                    } else {
                        let ident: syn::Ident = input.parse()?;
                        if ident == "flatten" {
                            attrs.flatten = true;
                        } else {
                            return Err(syn::Error::new(
                                ident.span(),
                                "unsupported env attribute, expected an annotation string or `flatten`",
                            ));
                        }
                    }

                    if input.is_empty() {
                        break;
                    }
                    input.parse::<Token![,]>()?;
                }
                Ok(())
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[env(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Root key used by `FromEnv::from_env()`.
    pub prefix: Option<String>,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in env_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parsed.prefix = Some(lit.value());
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(parsed)
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    #[test]
    fn test_parse_annotation() {
        let field: Field = parse_quote! {
            #[env("DB_URL,required")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation.unwrap().value(), "DB_URL,required");
        assert!(!attrs.flatten);
    }

    #[test]
    fn test_parse_flatten() {
        let field: Field = parse_quote! {
            #[env(flatten)]
            pub common: Common
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.annotation.is_none());
        assert!(attrs.flatten);
    }

    #[test]
    fn test_parse_flatten_with_annotation() {
        let field: Field = parse_quote! {
            #[env(flatten, ",skipprefix")]
            pub common: Common
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation.unwrap().value(), ",skipprefix");
        assert!(attrs.flatten);
    }

    #[test]
    fn test_parse_multiple_attributes() {
        let field: Field = parse_quote! {
            #[env(",split=:")]
            #[env(flatten)]
            pub dirs: Vec<String>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation.unwrap().value(), ",split=:");
        assert!(attrs.flatten);
    }

    #[test]
    fn test_no_attributes() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub plain: u32
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.annotation.is_none());
        assert!(!attrs.flatten);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let field: Field = parse_quote! {
            #[env(nested)]
            pub inner: Inner
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_duplicate_annotation_is_error() {
        let field: Field = parse_quote! {
            #[env("A")]
            #[env("B")]
            pub inner: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_struct_prefix() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "MYAPP")]
            struct Config {}
        };

        let attrs = StructAttrs::from_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.prefix.as_deref(), Some("MYAPP"));
    }

    #[test]
    fn test_unknown_struct_attribute_is_error() {
        let input: DeriveInput = parse_quote! {
            #[env(rename_all = "lowercase")]
            struct Config {}
        };

        assert!(StructAttrs::from_attrs(&input.attrs).is_err());
    }
}
