//! Derive macro for `vc_dynamic`.
//!
//! See [`Reflect`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Reflect`, `Typed` and one kind trait:
///
/// - `Struct` for `struct T { ... }`
/// - `Enum` for fieldless enums, `enum T { A, B = 4 }`
///
/// Tuple structs, unit structs, unions and enums with fields are rejected.
///
/// The descriptor of the type is its ident in `module_path!()`, with one
/// generic argument per type parameter. Every type parameter must be
/// `Typed`.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, data_contract, type_path = "shop::Order")]
/// struct Order { /* ... */ }
/// ```
///
/// - `default`: values are built with `Default::default()` and then
///   populated member by member. Without it, values are built in one go from
///   every member, so all members must be present (or be `Option`s).
/// - `anonymous`: the type is structural. Its descriptor lists the members,
///   and resolvers match it by member names rather than by name.
/// - `data_contract`: only fields marked `data_member` take part when the
///   mapper is asked for data-contract members.
/// - `open`: objects mapped to this type may carry members it does not
///   declare.
/// - `auto_register`: the type is added to the global registry the first
///   time it is used. No-op for generic types or without the
///   `auto_register` feature.
/// - `type_path = "..."`: overrides the namespace and name of the
///   descriptor. Generic arguments are still appended.
///
/// Only `auto_register` and `type_path` apply to enums.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, data_contract)]
/// struct Account {
///     #[reflect(data_member, rename = "Name")]
///     name: String,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// - `data_member`: part of the data contract.
/// - `rename = "..."`: the member name used in dynamic objects.
/// - `skip`: not a member at all. The field is filled with
///   `Default::default()` when a value is built from its members.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::match_reflect_impls(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
