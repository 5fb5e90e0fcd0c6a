//! Dynamic objects and the mapping between them and statically typed values.
//!
//! A [`DynamicObject`](object::DynamicObject) is a bag of named properties
//! with an optional [`TypeInfo`](info::TypeInfo) descriptor, meant to cross
//! process boundaries. The [`DynamicObjectMapper`](mapper::DynamicObjectMapper)
//! turns any [`Reflect`] value into such an object and back, keeping shared
//! references and cycles intact within one call. Descriptors are turned back
//! into types by a [`TypeResolver`](resolver::TypeResolver), and the
//! [`serde`] module reads and writes objects with any serde format.
//!
//! The crate requires `std`. The process-wide registry, the default resolver
//! slot and the cycle guard of `DynamicObject`'s `Debug` output live in
//! `std`-only statics.
//!
//! # Examples
//!
//! ```
//! use vc_dynamic::derive::Reflect;
//! use vc_dynamic::mapper::DynamicObjectMapper;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Order {
//!     id: u64,
//!     lines: Vec<String>,
//! }
//!
//! let mapper = DynamicObjectMapper::new();
//! let order = Order { id: 7, lines: vec!["A-1".into()] };
//!
//! let object = mapper.map_object(&order);
//! assert_eq!(object.property_names(), ["id", "lines"]);
//!
//! let json = serde_json::to_string(&object).unwrap();
//! let object = serde_json::from_str(&json).unwrap();
//! assert_eq!(mapper.map::<Order>(&object).unwrap(), order);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names `::vc_dynamic`, including inside this crate.
extern crate self as vc_dynamic;

// -----------------------------------------------------------------------------
// std

// `std` is always linked. Paths go through `core` and `alloc` where those
// suffice.
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod handle;
pub mod impls;
pub mod info;
pub mod mapper;
pub mod object;
pub mod ops;
pub mod registry;
pub mod resolver;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::{Reflect, Typed};
pub use vc_dynamic_derive as derive;
