use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use super::{get_auto_register_impl, impl_trait_reflect};
use crate::derive_data::{ReflectStruct, StructField};

/// Implements `Reflect`, `Struct` and `Typed` for a struct with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let reflect_trait_tokens =
        impl_trait_reflect(meta, Ident::new("Struct", Span::call_site()), true);
    let struct_trait_tokens = impl_trait_struct(info);
    let typed_trait_tokens = impl_trait_typed(info);
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #reflect_trait_tokens

        #struct_trait_tokens

        #typed_trait_tokens

        #auto_register_tokens
    }
}

fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let reflect_ = crate::path::reflect_();
    let ops_ = crate::path::ops_();
    let macro_exports_ = crate::path::macro_exports_();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.generics().split_for_impl();

    let fields: Vec<&StructField> = info.active_fields().collect();
    let field_idents: Vec<_> = fields.iter().map(|field| field.ident()).collect();
    let field_types: Vec<_> = fields.iter().map(|field| field.ty()).collect();
    let member_names: Vec<_> = fields.iter().map(|field| field.member_name()).collect();
    let indices: Vec<_> = (0..fields.len()).collect();
    let member_len = fields.len();

    quote! {
        impl #impl_generics #ops_::Struct for #ident #ty_generics #where_clause {
            fn member(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#member_names => ::core::option::Option::Some(&self.#field_idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn member_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#field_idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#member_names),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn member_len(&self) -> usize {
                #member_len
            }

            fn set_member(
                &mut self,
                name: &str,
                value: #macro_exports_::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), #macro_exports_::Box<dyn #reflect_>> {
                match name {
                    #(#member_names => {
                        self.#field_idents = value.take::<#field_types>()?;
                        ::core::result::Result::Ok(())
                    })*
                    _ => ::core::result::Result::Err(value),
                }
            }
        }
    }
}

fn impl_trait_typed(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let attrs = meta.attrs();
    let reflect_ = crate::path::reflect_();
    let typed_ = crate::path::typed_();
    let type_info_ = crate::path::type_info_();
    let property_info_ = crate::path::property_info_();
    let type_shape_ = crate::path::type_shape_();
    let struct_shape_ = crate::path::struct_shape_();
    let member_info_ = crate::path::member_info_();
    let type_registry_ = crate::path::type_registry_();
    let macro_exports_ = crate::path::macro_exports_();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.generics().split_for_impl();

    let fields: Vec<&StructField> = info.active_fields().collect();
    let field_types: Vec<_> = fields.iter().map(|field| field.ty()).collect();
    let member_names: Vec<_> = fields.iter().map(|field| field.member_name()).collect();

    // type_info
    let base_info = meta.type_info_tokens();
    let anonymous_info = if attrs.anonymous.is_some() {
        quote! {
            .anonymous()
            .with_properties(#macro_exports_::vec![
                #(#property_info_::new(#member_names, #type_info_::of::<#field_types>()),)*
            ])
        }
    } else {
        crate::utils::empty()
    };

    // type_shape
    let members = fields.iter().map(|field| {
        let ty = field.ty();
        let name = field.member_name();
        let data_member = field
            .attrs
            .data_member
            .map(|_| quote!(.data_member()));
        quote!(#member_info_::new::<#ty>(#name) #data_member)
    });

    let with_default = attrs.default.map(|_| {
        quote! {
            .with_default(|| {
                #macro_exports_::Box::new(<Self as ::core::default::Default>::default())
                    as #macro_exports_::Box<dyn #reflect_>
            })
        }
    });

    let initializers = info.fields.iter().map(|field| {
        let ident = field.ident();
        let ty = field.ty();
        if field.is_active() {
            quote!(#ident: values.next()?.take::<#ty>().ok()?)
        } else {
            quote!(#ident: ::core::default::Default::default())
        }
    });

    let (values_arg, values_iter) = if fields.is_empty() {
        (quote!(_values), crate::utils::empty())
    } else {
        (quote!(values), quote!(let mut values = values.into_iter();))
    };
    let registry_arg = if fields.is_empty() {
        quote!(_registry)
    } else {
        quote!(registry)
    };

    let anonymous_shape = attrs.anonymous.map(|_| quote!(.anonymous()));
    let data_contract = attrs.data_contract.map(|_| quote!(.data_contract()));
    let open = attrs.open.map(|_| quote!(.open()));

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> #type_info_ {
                #base_info
                    #anonymous_info
            }

            fn type_shape() -> #type_shape_ {
                #type_shape_::Struct(
                    #struct_shape_::new(#macro_exports_::vec![#(#members),*])
                        #with_default
                        .with_from_members(|#values_arg| {
                            #values_iter
                            let value = Self {
                                #(#initializers,)*
                            };
                            ::core::option::Option::Some(
                                #macro_exports_::Box::new(value) as #macro_exports_::Box<dyn #reflect_>
                            )
                        })
                        #anonymous_shape
                        #data_contract
                        #open
                )
            }

            fn register_dependencies(#registry_arg: &mut #type_registry_) {
                #(registry.register::<#field_types>();)*
            }
        }
    }
}
