use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, Generics, Ident, WhereClause, parse_quote};

use super::TypeAttributes;

/// What every kind of reflected type shares: its ident, generics and
/// type-level attributes.
pub(crate) struct ReflectMeta<'a> {
    ident: &'a Ident,
    generics: Generics,
    attrs: TypeAttributes,
}

impl<'a> ReflectMeta<'a> {
    /// Adds a `Typed` bound to every type parameter.
    pub fn new(ident: &'a Ident, generics: &Generics, attrs: TypeAttributes) -> Self {
        let mut generics = generics.clone();
        let typed_ = crate::path::typed_();
        let bounds: Vec<_> = generics
            .type_params()
            .map(|param| {
                let ident = &param.ident;
                quote!(#ident: #typed_)
            })
            .collect();
        if !bounds.is_empty() {
            let where_clause: &mut WhereClause = generics.make_where_clause();
            for bound in bounds {
                where_clause.predicates.push(parse_quote!(#bound));
            }
        }
        Self {
            ident,
            generics,
            attrs,
        }
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Whether the type has type parameters.
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| matches!(param, GenericParam::Type(_)))
    }

    /// Builds the base descriptor:
    ///
    /// ```ignore
    /// TypeInfo::new("Name")
    ///     .with_namespace(module_path!())
    ///     .with_generic_arguments(vec![TypeInfo::of::<T>(), ...])
    /// ```
    pub fn type_info_tokens(&self) -> TokenStream {
        let type_info_ = crate::path::type_info_();
        let macro_exports_ = crate::path::macro_exports_();

        let (name, namespace) = match self.attrs.custom_path() {
            Some((namespace, name)) => {
                let namespace = namespace.map(|namespace| quote!(.with_namespace(#namespace)));
                (quote!(#name), namespace)
            }
            None => {
                let name = self.ident.to_string();
                (
                    quote!(#name),
                    Some(quote!(.with_namespace(::core::module_path!()))),
                )
            }
        };

        let arguments: Vec<_> = self
            .generics
            .type_params()
            .map(|param| {
                let ident = &param.ident;
                quote!(#type_info_::of::<#ident>())
            })
            .collect();
        let generic_arguments = if arguments.is_empty() {
            crate::utils::empty()
        } else {
            quote!(.with_generic_arguments(#macro_exports_::vec![#(#arguments),*]))
        };

        quote! {
            #type_info_::new(#name)
                #namespace
                #generic_arguments
        }
    }
}
