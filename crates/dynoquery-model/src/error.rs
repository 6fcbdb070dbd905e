//! Error types for native-value serialization.

use crate::attribute_value::AttrType;

/// Errors produced while converting native values to or from wire
/// attribute values.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The native value cannot be serialized as the requested wire type.
    #[error("cannot serialize {type_name} value as {hint}")]
    IncompatibleHint {
        /// Name of the native value's type.
        type_name: &'static str,
        /// The requested wire type.
        hint: AttrType,
    },
    /// Non-finite numbers have no decimal wire representation.
    #[error("cannot serialize non-finite number {value}")]
    NonFiniteNumber {
        /// The offending number.
        value: f64,
    },
    /// A wire number string could not be parsed back into a native number.
    #[error("invalid number literal '{text}'")]
    InvalidNumber {
        /// The unparseable literal.
        text: String,
    },
    /// A wire type tag string was not one of the known tags.
    #[error("unknown attribute type tag '{tag}'")]
    UnknownTypeTag {
        /// The unrecognized tag.
        tag: String,
    },
}
