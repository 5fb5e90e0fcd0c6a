// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;
mod trait_reflect;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_reflect::impl_trait_reflect;

pub(crate) use enum_kind::impl_enum;
pub(crate) use struct_kind::impl_struct;

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput};

use crate::derive_data::{ReflectEnum, ReflectMeta, ReflectStruct, TypeAttributes};

/// Parses the input and dispatches on its kind.
pub(crate) fn match_reflect_impls(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let meta = ReflectMeta::new(&ast.ident, &ast.generics, attrs);

    match &ast.data {
        Data::Struct(data) => Ok(impl_struct(&ReflectStruct::new(meta, &data.fields)?)),
        Data::Enum(data) => Ok(impl_enum(&ReflectEnum::new(meta, &data.variants)?)),
        Data::Union(_) => Err(syn::Error::new(
            ast.ident.span(),
            "`Reflect` cannot be derived for unions",
        )),
    }
}
