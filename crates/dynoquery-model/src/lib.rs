//! Wire-level value types for dynoquery.
//!
//! This crate owns the tagged-union [`AttributeValue`] wire representation
//! (single-key JSON objects, string-encoded numbers, base64 binary) and the
//! native [`Value`] model callers build expression trees from, together
//! with the serializer between the two. The expression crate depends on
//! these types only; nothing here performs I/O.

pub mod attribute_value;
pub mod error;
pub mod value;

pub use attribute_value::{AttrType, AttributeValue};
pub use error::SerializationError;
pub use value::{Number, Value, deserialize, serialize};
