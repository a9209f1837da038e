//! Proc macro definitions for the `tainted_string` crate.
//!
//! The macro is re-exported by `tainted_string` (feature `derive`), so you
//! should normally use that crate instead of depending on this one
//! directly.
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Declares a taint variant marker type.
///
/// Implements `tainted_string::Variant` for a unit struct so it can be
/// used as the variant parameter of `TaintedString`:
///
/// ```rust
/// use tainted_string::{TaintedString, TaintVariant, Variant};
///
/// #[derive(TaintVariant)]
/// struct CustomerName;
///
/// #[derive(TaintVariant)]
/// #[variant(name = "session token")]
/// struct SessionToken;
///
/// assert_eq!(CustomerName::NAME, "CustomerName");
/// assert_eq!(SessionToken::NAME, "session token");
/// let name: TaintedString<CustomerName> = TaintedString::wrap("Sarah");
/// # let _ = name;
/// ```
///
/// The diagnostic name defaults to the struct identifier and can be
/// overridden with `#[variant(name = "...")]`. Only unit structs are
/// accepted: a variant is pure identity and carries no data of its own.
#[proc_macro_derive(TaintVariant, attributes(variant))]
pub fn taint_variant_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impl_taint_variant(&ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn impl_taint_variant(ast: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    match &ast.data {
        Data::Struct(data) if matches!(data.fields, Fields::Unit) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "TaintVariant can only be derived for unit structs",
            ));
        }
    }

    let mut name = ast.ident.to_string();
    for attr in &ast.attrs {
        if attr.path().is_ident("variant") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    name = value.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported attribute, expected `name`"))
                }
            })?;
        }
    }

    let ident = &ast.ident;
    Ok(quote! {
        impl ::tainted_string::Variant for #ident {
            const NAME: &'static str = #name;
        }
    })
}
