use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use super::{get_auto_register_impl, impl_trait_reflect};
use crate::derive_data::ReflectEnum;

/// Implements `Reflect`, `Enum` and `Typed` for a fieldless enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();

    let reflect_trait_tokens =
        impl_trait_reflect(meta, Ident::new("Enum", Span::call_site()), false);
    let enum_trait_tokens = impl_trait_enum(info);
    let typed_trait_tokens = impl_trait_typed(info);
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #reflect_trait_tokens

        #enum_trait_tokens

        #typed_trait_tokens

        #auto_register_tokens
    }
}

fn impl_trait_enum(info: &ReflectEnum) -> TokenStream {
    let ops_ = crate::path::ops_();
    let ident = info.meta().ident();

    let variants: Vec<_> = info.variant_idents().collect();
    let names: Vec<_> = variants.iter().map(|variant| variant.to_string()).collect();
    let indices: Vec<_> = (0..variants.len()).collect();

    quote! {
        impl #ops_::Enum for #ident {
            fn variant_name(&self) -> &str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(Self::#variants => #indices,)*
                }
            }

            fn discriminant(&self) -> i64 {
                match self {
                    #(Self::#variants => Self::#variants as i64,)*
                }
            }
        }
    }
}

fn impl_trait_typed(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();
    let reflect_ = crate::path::reflect_();
    let typed_ = crate::path::typed_();
    let type_info_ = crate::path::type_info_();
    let type_shape_ = crate::path::type_shape_();
    let enum_shape_ = crate::path::enum_shape_();
    let variant_info_ = crate::path::variant_info_();
    let macro_exports_ = crate::path::macro_exports_();

    let ident = meta.ident();
    let base_info = meta.type_info_tokens();

    let variants: Vec<_> = info.variant_idents().collect();
    let names: Vec<_> = variants.iter().map(|variant| variant.to_string()).collect();
    let indices: Vec<_> = (0..variants.len()).collect();

    quote! {
        impl #typed_ for #ident {
            fn type_info() -> #type_info_ {
                #base_info
            }

            fn type_shape() -> #type_shape_ {
                #type_shape_::Enum(#enum_shape_::new(
                    #macro_exports_::vec![
                        #(#variant_info_::new(#names, Self::#variants as i64),)*
                    ],
                    |index| match index {
                        #(#indices => ::core::option::Option::Some(
                            #macro_exports_::Box::new(Self::#variants) as #macro_exports_::Box<dyn #reflect_>
                        ),)*
                        _ => ::core::option::Option::None,
                    },
                ))
            }
        }
    }
}
