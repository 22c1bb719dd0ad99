//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// `Populate` derive macro
///
/// Implements `envbind::Populate` for a struct with named fields. Each field
/// is populated in declaration order from a key composed of the parent key
/// and the field name in `UPPER_SNAKE_CASE`. Every field type must itself
/// implement `Populate`.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "APP")]`: Root key used by `FromEnv::from_env()`
///
/// **Field-level**:
/// - `#[env("NAME,required,split=:,skipprefix,skip")]`: Field annotation,
///   parsed when the struct is populated
/// - `#[env(flatten)]`: Merge the field's children into the parent key
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(Populate, attributes(env))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Populate only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Populate only supports structs",
            ));
        }
    };

    // One `Context::field` call per field, in declaration order
    let field_steps = fields
        .iter()
        .map(|field| {
            let attrs = FieldAttrs::from_field(field)?;
            let field_name = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let ident = field_name.unraw().to_string();

            let mut descriptor = quote! { ::envbind::Field::new(#ident) };
            if attrs.flatten {
                descriptor = quote! { #descriptor.embedded() };
            }
            if let Some(annotation) = &attrs.annotation {
                descriptor = quote! { #descriptor.annotated(#annotation) };
            }

            Ok(quote! {
                __cx.field(__key, &#descriptor, &mut self.#field_name)?;
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let prefix = struct_attrs.prefix.map(|prefix| {
        quote! { const PREFIX: &'static str = #prefix; }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::Populate for #struct_name #ty_generics #where_clause {
            #prefix

            fn populate(
                &mut self,
                __cx: &::envbind::Context<'_>,
                __key: &str,
                _: ::core::option::Option<&::envbind::Tag>,
            ) -> ::core::result::Result<(), ::envbind::EnvError> {
                #(#field_steps)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
