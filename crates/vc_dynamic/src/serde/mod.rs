//! Reading and writing dynamic objects with any serde format.
//!
//! An object is written as a map:
//!
//! | key          | content                                               |
//! |--------------|-------------------------------------------------------|
//! | `Id`         | present when the object is referenced more than once  |
//! | `Type`       | the object's [`TypeInfo`](crate::info::TypeInfo)      |
//! | `Value`      | the value of a wrapped scalar                         |
//! | `Values`     | the items of a wrapped array                          |
//! | `Properties` | `[{Name, Type?, Value}]`, `Type` only for scalars     |
//!
//! Exactly one of `Value`, `Values` and `Properties` is present. Later
//! references to an object with an `Id` are written as `{"Ref": id}`, so
//! shared and cyclic graphs survive the trip.
//!
//! # Examples
//!
//! ```
//! use vc_dynamic::mapper::DynamicObjectMapper;
//! use vc_dynamic::object::DynamicObject;
//!
//! let mapper = DynamicObjectMapper::new();
//! let json = serde_json::to_string(&mapper.map_object(&vec![1, 2, 3])).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"Type":{"Name":"Vec","Namespace":"alloc::vec","IsGeneric":true,"GenericArguments":[{"Name":"i32"}]},"Values":[1,2,3]}"#,
//! );
//!
//! let object: DynamicObject = serde_json::from_str(&json).unwrap();
//! assert_eq!(mapper.map::<Vec<i32>>(&object).unwrap(), [1, 2, 3]);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod de;
mod error;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::{DynamicObjectSeed, read_dynamic_object};
pub use error::MalformedPayloadError;

// -----------------------------------------------------------------------------
// Keys

const ID: &str = "Id";
const REF: &str = "Ref";
const TYPE: &str = "Type";
const VALUE: &str = "Value";
const VALUES: &str = "Values";
const PROPERTIES: &str = "Properties";
const NAME: &str = "Name";

#[cfg(test)]
mod tests;
