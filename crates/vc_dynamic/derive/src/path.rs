//! Paths into `vc_dynamic` used by the generated code.
//!
//! Kept in one place so that moving an item in `vc_dynamic` only touches
//! this file.

use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn reflect_() -> TokenStream {
    quote!(::vc_dynamic::Reflect)
}

#[inline(always)]
pub(crate) fn typed_() -> TokenStream {
    quote!(::vc_dynamic::Typed)
}

#[inline(always)]
pub(crate) fn macro_exports_() -> TokenStream {
    quote!(::vc_dynamic::__macro_exports)
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_() -> TokenStream {
    quote!(::vc_dynamic::__macro_exports::auto_register)
}

#[inline(always)]
pub(crate) fn type_handle_() -> TokenStream {
    quote!(::vc_dynamic::handle::TypeHandle)
}

#[inline(always)]
pub(crate) fn type_shape_() -> TokenStream {
    quote!(::vc_dynamic::handle::TypeShape)
}

#[inline(always)]
pub(crate) fn struct_shape_() -> TokenStream {
    quote!(::vc_dynamic::handle::StructShape)
}

#[inline(always)]
pub(crate) fn member_info_() -> TokenStream {
    quote!(::vc_dynamic::handle::MemberInfo)
}

#[inline(always)]
pub(crate) fn enum_shape_() -> TokenStream {
    quote!(::vc_dynamic::handle::EnumShape)
}

#[inline(always)]
pub(crate) fn variant_info_() -> TokenStream {
    quote!(::vc_dynamic::handle::VariantInfo)
}

#[inline(always)]
pub(crate) fn type_info_() -> TokenStream {
    quote!(::vc_dynamic::info::TypeInfo)
}

#[inline(always)]
pub(crate) fn property_info_() -> TokenStream {
    quote!(::vc_dynamic::info::PropertyInfo)
}

#[inline(always)]
pub(crate) fn type_registry_() -> TokenStream {
    quote!(::vc_dynamic::registry::TypeRegistry)
}

#[inline(always)]
pub(crate) fn ops_() -> TokenStream {
    quote!(::vc_dynamic::ops)
}
