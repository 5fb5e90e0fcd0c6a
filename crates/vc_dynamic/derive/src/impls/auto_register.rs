use proc_macro2::TokenStream;

use crate::derive_data::ReflectMeta;

/// Submits the type to the global registry's collector.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    // The instantiations of a generic type are unknown here.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let auto_register_ = crate::path::auto_register_();
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegistration(#auto_register_::register_type::<#ident>)
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> TokenStream {
    crate::utils::empty()
}
