use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Path, Token, Type,
};

use crate::attr_parsing::{combine_attribute, combine_flag, parse_assignment_attribute, parse_attrs, parse_flag_attribute, parse_list_attribute, Combine};

pub(crate) mod kw {
    syn::custom_keyword!(implements);
    syn::custom_keyword!(constructor);
    syn::custom_keyword!(component);
    syn::custom_keyword!(readonly);
}

/// `#[injectable(...)]` on the struct
#[derive(Default)]
pub(crate) struct InjectableArgs {
    pub(super) implements: Option<(kw::implements, Punctuated<Type, Token![,]>)>,
    pub(super) constructor: Option<(kw::constructor, Path)>,
    pub(super) component: Option<kw::component>,
}

impl Parse for InjectableArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let lh = input.lookahead1();
            if lh.peek(kw::implements) {
                parse_list_attribute(input, &mut args.implements)?;
            } else if lh.peek(kw::constructor) {
                parse_assignment_attribute(input, &mut args.constructor)?;
            } else if lh.peek(kw::component) {
                parse_flag_attribute(input, &mut args.component)?;
            } else {
                return Err(lh.error());
            }

            let _ = input.parse::<Token![,]>();
        }

        Ok(args)
    }
}

impl Combine for InjectableArgs {
    fn combine(mut self, other: Self) -> syn::Result<Self> {
        let Self {
            implements,
            constructor,
            component,
        } = other;
        combine_attribute(&mut self.implements, implements)?;
        combine_attribute(&mut self.constructor, constructor)?;
        combine_flag(&mut self.component, component)?;
        Ok(self)
    }
}

/// `#[inject]` or `#[inject(...)]` on a field
#[derive(Default)]
pub(crate) struct InjectArgs {
    pub(super) readonly: Option<kw::readonly>,
}

impl Parse for InjectArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let lh = input.lookahead1();
            if lh.peek(kw::readonly) {
                parse_flag_attribute(input, &mut args.readonly)?;
            } else {
                return Err(lh.error());
            }

            let _ = input.parse::<Token![,]>();
        }

        Ok(args)
    }
}

impl Combine for InjectArgs {
    fn combine(mut self, other: Self) -> syn::Result<Self> {
        combine_flag(&mut self.readonly, other.readonly)?;
        Ok(self)
    }
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<InjectableArgs> {
    parse_attrs("injectable", attrs)
        .unwrap_or_else(|| Ok(InjectableArgs::default()))
        .map_err(|(err, attr)| syn::Error::new_spanned(attr, err))
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Option<syn::Result<InjectArgs>> {
    parse_attrs("inject", attrs).map(|result| result.map_err(|(err, attr)| syn::Error::new_spanned(attr, err)))
}
