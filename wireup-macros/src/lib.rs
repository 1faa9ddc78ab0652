use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use std::env::var_os;
use syn::parse::Parse;

mod attr_parsing;
mod injectable;

/// Implements `wireup::Injectable` for a struct.
///
/// ## Struct attributes
/// - `#[injectable(implements(dyn A, dyn B))]`: the interfaces the type can be resolved as.
/// - `#[injectable(constructor = path)]`: function returning `Result<Self, E>` where `E: Into<InstantiateErrorKind>`,
///   `Default::default` is used otherwise.
/// - `#[injectable(component)]`: registers the type for component scanning.
///
/// ## Field attributes
/// - `#[inject]`: the field, of type `Option<Box<T>>`, is injected with `T`.
/// - `#[inject(readonly)]`: the field is discovered, but refuses injection.
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(item: TokenStream) -> TokenStream {
    expand_with(item, injectable::expand)
}

fn expand_with<F, I, K>(input: TokenStream, f: F) -> TokenStream
where
    F: FnOnce(I) -> syn::Result<K>,
    I: Parse,
    K: ToTokens,
{
    expand(syn::parse(input).and_then(f))
}

fn expand<T>(result: syn::Result<T>) -> TokenStream
where
    T: ToTokens,
{
    match result {
        Ok(tokens) => {
            let tokens = (quote! { #tokens }).into();
            if var_os("MACROS_DEBUG").is_some() {
                eprintln!("{tokens}");
            }
            tokens
        }
        Err(err) => err.into_compile_error().into(),
    }
}
