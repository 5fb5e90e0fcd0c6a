use syn::{Ident, Variant, punctuated::Punctuated, spanned::Spanned, token::Comma};

use super::ReflectMeta;

/// A fieldless enum.
pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<&'a Variant>,
}

impl<'a> ReflectEnum<'a> {
    pub fn new(meta: ReflectMeta<'a>, variants: &'a Punctuated<Variant, Comma>) -> syn::Result<Self> {
        if meta.impl_with_generic() {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Reflect` cannot be derived for generic enums",
            ));
        }
        if variants.is_empty() {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Reflect` cannot be derived for enums without variants",
            ));
        }
        let attrs = meta.attrs();
        let struct_only = [attrs.default, attrs.anonymous, attrs.data_contract, attrs.open];
        if let Some(span) = struct_only.into_iter().flatten().next() {
            return Err(syn::Error::new(span, "attribute is only allowed on structs"));
        }
        for variant in variants {
            if !variant.fields.is_empty() {
                return Err(syn::Error::new(
                    variant.span(),
                    "`Reflect` can only be derived for enums without fields",
                ));
            }
        }
        Ok(Self {
            meta,
            variants: variants.iter().collect(),
        })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    pub fn variant_idents(&self) -> impl Iterator<Item = &'a Ident> + '_ {
        self.variants.iter().map(|variant| &variant.ident)
    }
}
