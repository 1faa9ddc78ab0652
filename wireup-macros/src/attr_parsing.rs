use core::any;
use quote::ToTokens;
use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Token,
};

fn duplicate_error<K: ToTokens>(kw: K) -> syn::Error {
    let kw_name = any::type_name::<K>().rsplit("::").next().unwrap_or_default();
    let msg = "` specified more than once";
    syn::Error::new_spanned(kw, ["`", kw_name, msg].concat())
}

/// Parses `kw = value`
pub(crate) fn parse_assignment_attribute<K, T>(input: ParseStream<'_>, out: &mut Option<(K, T)>) -> syn::Result<()>
where
    K: Parse + ToTokens,
    T: Parse,
{
    let kw = input.parse()?;
    input.parse::<Token![=]>()?;
    let inner = input.parse()?;

    if out.is_some() {
        return Err(duplicate_error(kw));
    }

    *out = Some((kw, inner));

    Ok(())
}

/// Parses `kw(value, ...)`
pub(crate) fn parse_list_attribute<K, T>(input: ParseStream<'_>, out: &mut Option<(K, Punctuated<T, Token![,]>)>) -> syn::Result<()>
where
    K: Parse + ToTokens,
    T: Parse,
{
    let kw = input.parse()?;
    let content;
    parenthesized!(content in input);
    let inner = Punctuated::parse_terminated(&content)?;

    if out.is_some() {
        return Err(duplicate_error(kw));
    }

    *out = Some((kw, inner));

    Ok(())
}

/// Parses a bare `kw`
pub(crate) fn parse_flag_attribute<K>(input: ParseStream<'_>, out: &mut Option<K>) -> syn::Result<()>
where
    K: Parse + ToTokens,
{
    let kw = input.parse()?;

    if out.is_some() {
        return Err(duplicate_error(kw));
    }

    *out = Some(kw);

    Ok(())
}

pub(crate) trait Combine: Sized {
    fn combine(self, other: Self) -> syn::Result<Self>;
}

pub(crate) fn parse_attrs<T>(ident: &str, attrs: &[syn::Attribute]) -> Option<Result<T, (syn::Error, syn::Attribute)>>
where
    T: Combine + Parse + Default,
{
    let mut iter = attrs
        .iter()
        .filter(|attr| attr.meta.path().is_ident(ident))
        .map(|attr| (attr, parse_args::<T>(attr)));

    let first = match iter.next() {
        Some((_, Ok(first))) => first,
        Some((attr, Err(err))) => return Some(Err((err, attr.clone()))),
        None => return None,
    };

    let result = iter.try_fold(first, |out, (attr, next_result)| match next_result {
        Ok(next) => out.combine(next).map_err(|err| (err, attr.clone())),
        Err(err) => Err((err, attr.clone())),
    });

    Some(result)
}

/// A bare `#[ident]` is parsed as the default arguments
fn parse_args<T: Parse + Default>(attr: &syn::Attribute) -> syn::Result<T> {
    match attr.meta {
        syn::Meta::Path(_) => Ok(T::default()),
        _ => attr.parse_args(),
    }
}

pub(crate) fn combine_attribute<K, T>(a: &mut Option<(K, T)>, b: Option<(K, T)>) -> syn::Result<()>
where
    K: ToTokens,
{
    if let Some((kw, inner)) = b {
        if a.is_some() {
            return Err(duplicate_error(kw));
        }
        *a = Some((kw, inner));
    }
    Ok(())
}

pub(crate) fn combine_flag<K>(a: &mut Option<K>, b: Option<K>) -> syn::Result<()>
where
    K: ToTokens,
{
    if let Some(kw) = b {
        if a.is_some() {
            return Err(duplicate_error(kw));
        }
        *a = Some(kw);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_assignment_attribute, parse_attrs, parse_flag_attribute, Combine};
    use syn::{
        parse::{Parse, ParseStream},
        parse_quote, Attribute, Path, Token,
    };

    mod kw {
        syn::custom_keyword!(name);
        syn::custom_keyword!(flag);
    }

    #[derive(Default)]
    struct Args {
        name: Option<(kw::name, Path)>,
        flag: Option<kw::flag>,
    }

    impl Parse for Args {
        fn parse(input: ParseStream) -> syn::Result<Self> {
            let mut args = Self::default();
            while !input.is_empty() {
                if input.peek(kw::name) {
                    parse_assignment_attribute(input, &mut args.name)?;
                } else {
                    parse_flag_attribute(input, &mut args.flag)?;
                }
                let _ = input.parse::<Token![,]>();
            }
            Ok(args)
        }
    }

    impl Combine for Args {
        fn combine(mut self, other: Self) -> syn::Result<Self> {
            super::combine_attribute(&mut self.name, other.name)?;
            super::combine_flag(&mut self.flag, other.flag)?;
            Ok(self)
        }
    }

    #[test]
    fn test_parse_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[args(name = Self::new)]), parse_quote!(#[args(flag)]), parse_quote!(#[other])];

        let args = parse_attrs::<Args>("args", &attrs).unwrap().ok().unwrap();
        assert!(args.name.is_some());
        assert!(args.flag.is_some());

        assert!(parse_attrs::<Args>("missing", &attrs).is_none());
    }

    #[test]
    fn test_bare_attr_is_default() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[args])];

        let args = parse_attrs::<Args>("args", &attrs).unwrap().ok().unwrap();
        assert!(args.name.is_none());
        assert!(args.flag.is_none());
    }

    #[test]
    fn test_duplicate_attr() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[args(flag)]), parse_quote!(#[args(flag)])];

        assert!(parse_attrs::<Args>("args", &attrs).unwrap().is_err());
    }
}
