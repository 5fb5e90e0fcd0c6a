use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::derive_data::ReflectMeta;

/// Implements `Reflect` with the given `ReflectRef` variant.
///
/// Only structs hand out a mutable view.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, kind: Ident, mutable: bool) -> TokenStream {
    let reflect_ = crate::path::reflect_();
    let type_handle_ = crate::path::type_handle_();
    let ops_ = crate::path::ops_();
    let macro_exports_ = crate::path::macro_exports_();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.generics().split_for_impl();

    let reflect_mut = if mutable {
        quote!(#ops_::ReflectMut::#kind(self))
    } else {
        quote!(#ops_::ReflectMut::Opaque)
    };

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn type_handle(&self) -> #macro_exports_::Arc<#type_handle_> {
                #type_handle_::of::<Self>()
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #reflect_mut
            }
        }
    }
}
