//! Native value model and the value serializer.
//!
//! [`Value`] is the in-memory counterpart of the wire [`AttributeValue`]:
//! callers build expression trees out of native values, and the serializer
//! converts them into tagged wire values at tree-construction time.
//!
//! Numbers travel as round-trip-safe decimal strings. Sets are
//! canonicalized (sorted, deduplicated) so logically equal sets produce
//! byte-identical wire output regardless of insertion order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::attribute_value::{AttrType, AttributeValue};
use crate::error::SerializationError;

/// A native number, either integral or floating-point.
///
/// Equality is numeric: `Number::Int(2) == Number::Float(2.0)`. This keeps
/// the serialize/deserialize round trip an equality for integral floats,
/// whose wire form drops the fractional part.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// A signed integer.
    Int(i64),
    /// A finite floating-point number (non-finite values are rejected at
    /// serialization time).
    Float(f64),
}

impl Number {
    /// Renders the decimal wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::NonFiniteNumber`] for NaN or infinity,
    /// which have no decimal form.
    pub fn wire_string(self) -> Result<String, SerializationError> {
        match self {
            Self::Int(i) => Ok(i.to_string()),
            Self::Float(f) if f.is_finite() => Ok(f.to_string()),
            Self::Float(f) => Err(SerializationError::NonFiniteNumber { value: f }),
        }
    }

    /// Parses a wire number literal.
    ///
    /// Literals without a fractional part parse as [`Number::Int`]; others
    /// (including integers beyond `i64` range) parse as [`Number::Float`].
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::InvalidNumber`] if the literal is not
    /// a finite decimal number.
    pub fn parse(text: &str) -> Result<Self, SerializationError> {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Self::Int(i));
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Self::Float(f)),
            _ => Err(SerializationError::InvalidNumber {
                text: text.to_owned(),
            }),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => a as f64 == b,
        }
    }
}

macro_rules! impl_number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

impl_number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// A native value, convertible to a wire [`AttributeValue`].
///
/// Set variants are kept in canonical (sorted, deduplicated) order; build
/// them through [`Value::string_set`], [`Value::number_set`], and
/// [`Value::binary_set`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(Number),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Binary(bytes::Bytes),
    /// Heterogeneous list.
    List(Vec<Value>),
    /// String-keyed map.
    Map(HashMap<String, Value>),
    /// Set of strings.
    StringSet(Vec<String>),
    /// Set of numbers.
    NumberSet(Vec<Number>),
    /// Set of byte strings.
    BinarySet(Vec<bytes::Bytes>),
}

impl Value {
    /// Builds a canonical string set: sorted, duplicates removed.
    #[must_use]
    pub fn string_set<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut v: Vec<String> = elements.into_iter().map(Into::into).collect();
        v.sort();
        v.dedup();
        Self::StringSet(v)
    }

    /// Builds a canonical number set: numerically sorted, numeric
    /// duplicates removed.
    #[must_use]
    pub fn number_set<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Number>,
    {
        let mut v: Vec<Number> = elements.into_iter().collect();
        v.sort_by(cmp_numeric);
        v.dedup_by(|a, b| a == b);
        Self::NumberSet(v)
    }

    /// Builds a canonical binary set: sorted bytewise, duplicates removed.
    #[must_use]
    pub fn binary_set<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<bytes::Bytes>,
    {
        let mut v: Vec<bytes::Bytes> = elements.into_iter().map(Into::into).collect();
        v.sort();
        v.dedup();
        Self::BinarySet(v)
    }

    /// Returns the wire tag this value maps to without a hint.
    #[must_use]
    pub fn direct_attr_type(&self) -> AttrType {
        match self {
            Self::Null => AttrType::Null,
            Self::Bool(_) => AttrType::Bool,
            Self::Number(_) => AttrType::N,
            Self::String(_) => AttrType::S,
            Self::Binary(_) => AttrType::B,
            Self::List(_) => AttrType::L,
            Self::Map(_) => AttrType::M,
            Self::StringSet(_) => AttrType::Ss,
            Self::NumberSet(_) => AttrType::Ns,
            Self::BinarySet(_) => AttrType::Bs,
        }
    }

    /// Human-readable name of the native type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::StringSet(_) => "string set",
            Self::NumberSet(_) => "number set",
            Self::BinarySet(_) => "binary set",
        }
    }
}

fn cmp_numeric(a: &Number, b: &Number) -> Ordering {
    a.as_f64().total_cmp(&b.as_f64())
}

// Conversions from Rust primitives, so expression builders accept bare
// native values. Concrete impls per type (a blanket impl would collide
// with the operand conversions downstream).

macro_rules! impl_value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Number(Number::Int(i64::from(v)))
            }
        })*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bytes::Bytes> for Value {
    fn from(v: bytes::Bytes) -> Self {
        Self::Binary(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Binary(bytes::Bytes::from(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(v: HashMap<String, Value>) -> Self {
        Self::Map(v)
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serializes a native value into its wire form.
///
/// With no hint the wire tag is inferred from the native variant. A hint
/// (from a typed attribute or operand) must either match the inferred tag
/// or name a supported coercion; lists coerce to the set type the hint
/// names when every element admits it.
///
/// # Errors
///
/// Returns a [`SerializationError`] for an incompatible hint or a
/// non-finite number.
pub fn serialize(value: Value, hint: Option<AttrType>) -> Result<AttributeValue, SerializationError> {
    match hint {
        None => serialize_inferred(value),
        Some(t) if t == value.direct_attr_type() => serialize_inferred(value),
        Some(t) => serialize_coerced(value, t),
    }
}

fn serialize_inferred(value: Value) -> Result<AttributeValue, SerializationError> {
    match value {
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Bool(b) => Ok(AttributeValue::Bool(b)),
        Value::Number(n) => Ok(AttributeValue::N(n.wire_string()?)),
        Value::String(s) => Ok(AttributeValue::S(s)),
        Value::Binary(b) => Ok(AttributeValue::B(b)),
        Value::List(items) => {
            let out: Result<Vec<_>, _> = items.into_iter().map(serialize_inferred).collect();
            Ok(AttributeValue::L(out?))
        }
        Value::Map(m) => {
            let out: Result<HashMap<_, _>, _> = m
                .into_iter()
                .map(|(k, v)| serialize_inferred(v).map(|av| (k, av)))
                .collect();
            Ok(AttributeValue::M(out?))
        }
        Value::StringSet(v) => Ok(AttributeValue::Ss(canonical_strings(v))),
        Value::NumberSet(v) => Ok(AttributeValue::Ns(canonical_numbers(v)?)),
        Value::BinarySet(v) => Ok(AttributeValue::Bs(canonical_bytes(v))),
    }
}

fn serialize_coerced(value: Value, hint: AttrType) -> Result<AttributeValue, SerializationError> {
    let type_name = value.type_name();
    let mismatch = || SerializationError::IncompatibleHint { type_name, hint };

    let Value::List(items) = value else {
        return Err(mismatch());
    };

    match hint {
        AttrType::Ss => {
            let strings: Option<Vec<String>> = items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            strings
                .map(|v| AttributeValue::Ss(canonical_strings(v)))
                .ok_or_else(mismatch)
        }
        AttrType::Ns => {
            let numbers: Option<Vec<Number>> = items
                .into_iter()
                .map(|v| match v {
                    Value::Number(n) => Some(n),
                    _ => None,
                })
                .collect();
            match numbers {
                Some(v) => Ok(AttributeValue::Ns(canonical_numbers(v)?)),
                None => Err(mismatch()),
            }
        }
        AttrType::Bs => {
            let blobs: Option<Vec<bytes::Bytes>> = items
                .into_iter()
                .map(|v| match v {
                    Value::Binary(b) => Some(b),
                    _ => None,
                })
                .collect();
            blobs
                .map(|v| AttributeValue::Bs(canonical_bytes(v)))
                .ok_or_else(mismatch)
        }
        _ => Err(mismatch()),
    }
}

fn canonical_strings(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v.dedup();
    v
}

fn canonical_numbers(v: Vec<Number>) -> Result<Vec<String>, SerializationError> {
    let mut pairs: Vec<(f64, String)> = v
        .into_iter()
        .map(|n| n.wire_string().map(|s| (n.as_f64(), s)))
        .collect::<Result<_, _>>()?;
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    let mut out: Vec<String> = pairs.into_iter().map(|(_, s)| s).collect();
    out.dedup();
    Ok(out)
}

fn canonical_bytes(mut v: Vec<bytes::Bytes>) -> Vec<bytes::Bytes> {
    v.sort();
    v.dedup();
    v
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Converts a wire value back into a native value.
///
/// Number literals without a fractional part come back as
/// [`Number::Int`], all others as [`Number::Float`].
///
/// # Errors
///
/// Returns [`SerializationError::InvalidNumber`] if a number literal in
/// the wire value cannot be parsed.
pub fn deserialize(value: AttributeValue) -> Result<Value, SerializationError> {
    match value {
        AttributeValue::S(s) => Ok(Value::String(s)),
        AttributeValue::N(n) => Ok(Value::Number(Number::parse(&n)?)),
        AttributeValue::B(b) => Ok(Value::Binary(b)),
        AttributeValue::Bool(b) => Ok(Value::Bool(b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(items) => {
            let out: Result<Vec<_>, _> = items.into_iter().map(deserialize).collect();
            Ok(Value::List(out?))
        }
        AttributeValue::M(m) => {
            let out: Result<HashMap<_, _>, _> = m
                .into_iter()
                .map(|(k, v)| deserialize(v).map(|nv| (k, nv)))
                .collect();
            Ok(Value::Map(out?))
        }
        AttributeValue::Ss(v) => Ok(Value::StringSet(v)),
        AttributeValue::Ns(v) => {
            let out: Result<Vec<_>, _> = v.iter().map(|n| Number::parse(n)).collect();
            Ok(Value::NumberSet(out?))
        }
        AttributeValue::Bs(v) => Ok(Value::BinarySet(v)),
    }
}
