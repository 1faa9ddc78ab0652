mod attr;

use crate::injectable::attr::{parse_field_attrs, parse_struct_attrs, InjectArgs, InjectableArgs};

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{
    spanned::Spanned as _, Data, DataStruct, DeriveInput, Error, Field, Fields, GenericArgument, Ident, LitStr, PathArguments, Type,
};

/// Extracts `T` from `Option<Box<T>>`
fn injected_type(ty: &Type) -> Option<&Type> {
    fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
        let Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let segment = type_path.path.segments.last()?;
        if segment.ident != wrapper {
            return None;
        }
        let PathArguments::AngleBracketed(args) = &segment.arguments else {
            return None;
        };
        if args.args.len() != 1 {
            return None;
        }
        match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        }
    }

    single_generic(ty, "Option").and_then(|boxed| single_generic(boxed, "Box"))
}

fn expand_field(field: &Field, inject_args: &InjectArgs) -> syn::Result<TokenStream> {
    let Some(ident) = &field.ident else {
        return Err(Error::new_spanned(field, "#[inject] can only be used on named fields"));
    };
    let Some(inner) = injected_type(&field.ty) else {
        return Err(Error::new_spanned(&field.ty, "injectable field must be of type `Option<Box<T>>`"));
    };
    let name = LitStr::new(&ident.to_string(), ident.span());

    Ok(if inject_args.readonly.is_some() {
        quote_spanned! { field.span() =>
            ::wireup::Field::readonly::<#inner>(#name)
        }
    } else {
        quote_spanned! { field.span() =>
            ::wireup::Field::new::<#inner>(#name, |this: &mut Self, value| this.#ident = value)
        }
    })
}

fn generate_fields_function(data: &DataStruct) -> syn::Result<TokenStream> {
    let fields_quote = data
        .fields
        .iter()
        .filter_map(|field| parse_field_attrs(&field.attrs).map(|args| args.and_then(|args| expand_field(field, &args))))
        .collect::<syn::Result<Vec<_>>>()?;

    if fields_quote.is_empty() {
        return Ok(quote! {});
    }

    Ok(quote! {
        fn fields() -> ::wireup::__private::Vec<::wireup::Field<Self>> {
            ::wireup::__private::vec![
                #( #fields_quote, )*
            ]
        }
    })
}

fn generate_interfaces_function(args: &InjectableArgs) -> TokenStream {
    let Some((_, implements)) = &args.implements else {
        return quote! {};
    };

    let interfaces_quote = implements.iter().map(|interface| {
        quote_spanned! { interface.span() =>
            ::wireup::Interface::new::<#interface>(
                |this: ::wireup::__private::Box<Self>| -> ::wireup::__private::Box<#interface> { this }
            )
        }
    });

    quote! {
        fn interfaces() -> ::wireup::__private::Vec<::wireup::Interface<Self>> {
            ::wireup::__private::vec![
                #( #interfaces_quote, )*
            ]
        }
    }
}

fn generate_instantiate_function(args: &InjectableArgs) -> TokenStream {
    match &args.constructor {
        Some((_, constructor)) => quote_spanned! { constructor.span() =>
            fn instantiate() -> ::core::result::Result<Self, ::wireup::InstantiateErrorKind> {
                #constructor().map_err(::core::convert::Into::into)
            }
        },
        None => quote! {
            fn instantiate() -> ::core::result::Result<Self, ::wireup::InstantiateErrorKind> {
                ::core::result::Result::Ok(::core::default::Default::default())
            }
        },
    }
}

fn generate_component_entry(ident: &Ident) -> TokenStream {
    let entry_name = format_ident!("__WIREUP_COMPONENT_{}", ident.to_string().to_uppercase());

    quote_spanned! { Span::call_site() =>
        #[::wireup::scan::distributed_slice(::wireup::scan::COMPONENTS)]
        #[linkme(crate = ::wireup::scan::linkme)]
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        static #entry_name: fn() -> ::wireup::scan::ComponentEntry = || {
            ::wireup::scan::ComponentEntry {
                module_path: ::core::module_path!(),
                component: ::wireup::Component::of::<#ident>(),
            }
        };
    }
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "#[derive(Injectable)] can only be used on structs"));
    };
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(&input.generics, "generic types can't be injectable"));
    }
    if matches!(data.fields, Fields::Unnamed(_)) && data.fields.iter().any(|field| parse_field_attrs(&field.attrs).is_some()) {
        return Err(Error::new_spanned(&input.ident, "#[inject] can only be used on named fields"));
    }

    let args = parse_struct_attrs(&input.attrs)?;
    let ident = &input.ident;

    let instantiate_function_quote = generate_instantiate_function(&args);
    let fields_function_quote = generate_fields_function(data)?;
    let interfaces_function_quote = generate_interfaces_function(&args);
    let component_entry_quote = match args.component {
        Some(_) => generate_component_entry(ident),
        None => quote! {},
    };

    Ok(quote! {
        impl ::wireup::Injectable for #ident {
            #instantiate_function_quote
            #fields_function_quote
            #interfaces_function_quote
        }

        #component_entry_quote
    })
}
