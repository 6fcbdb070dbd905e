//! Wire-level `AttributeValue` type with custom serialization.
//!
//! `AttributeValue` is a tagged union where exactly one variant is present.
//! The JSON wire format uses single-key objects like `{"S": "hello"}`.
//! Numbers are string-encoded to preserve arbitrary precision; binary
//! payloads are base64-encoded.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SerializationError;

/// The ten wire type tags an [`AttributeValue`] can carry.
///
/// Tags are used as serialization hints for typed attributes and by the
/// `attribute_type` condition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
    /// String (`S`).
    S,
    /// Number (`N`), string-encoded.
    N,
    /// Binary (`B`).
    B,
    /// Boolean (`BOOL`).
    Bool,
    /// Null (`NULL`).
    Null,
    /// List (`L`).
    L,
    /// Map (`M`).
    M,
    /// String set (`SS`).
    Ss,
    /// Number set (`NS`).
    Ns,
    /// Binary set (`BS`).
    Bs,
}

impl AttrType {
    /// Returns the wire tag string for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
            Self::Bool => "BOOL",
            Self::Null => "NULL",
            Self::L => "L",
            Self::M => "M",
            Self::Ss => "SS",
            Self::Ns => "NS",
            Self::Bs => "BS",
        }
    }

    /// Returns `true` for the three set tags (`SS`, `NS`, `BS`).
    #[must_use]
    pub fn is_set(self) -> bool {
        matches!(self, Self::Ss | Self::Ns | Self::Bs)
    }

    /// Returns `true` for types with a defined ordering on the wire
    /// (`S`, `N`, `B`), the only types ordering comparisons accept.
    #[must_use]
    pub fn is_comparable(self) -> bool {
        matches!(self, Self::S | Self::N | Self::B)
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttrType {
    type Err = SerializationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Self::S),
            "N" => Ok(Self::N),
            "B" => Ok(Self::B),
            "BOOL" => Ok(Self::Bool),
            "NULL" => Ok(Self::Null),
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "SS" => Ok(Self::Ss),
            "NS" => Ok(Self::Ns),
            "BS" => Ok(Self::Bs),
            other => Err(SerializationError::UnknownTypeTag {
                tag: other.to_owned(),
            }),
        }
    }
}

/// A wire attribute value.
///
/// Exactly one variant is present. Set variants hold their elements in
/// sorted order (the serializer canonicalizes them), so logically equal
/// sets compare equal and produce byte-identical wire output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value (string-encoded for arbitrary precision).
    N(String),
    /// Binary value (base64-encoded in JSON).
    B(bytes::Bytes),
    /// Boolean value.
    Bool(bool),
    /// Null value.
    Null(bool),
    /// List of attribute values.
    L(Vec<AttributeValue>),
    /// Map of attribute values.
    M(HashMap<String, AttributeValue>),
    /// String set, sorted.
    Ss(Vec<String>),
    /// Number set, sorted numerically (string-encoded).
    Ns(Vec<String>),
    /// Binary set, sorted bytewise.
    Bs(Vec<bytes::Bytes>),
}

impl AttributeValue {
    /// Returns the wire type tag of this value.
    #[must_use]
    pub fn attr_type(&self) -> AttrType {
        match self {
            Self::S(_) => AttrType::S,
            Self::N(_) => AttrType::N,
            Self::B(_) => AttrType::B,
            Self::Bool(_) => AttrType::Bool,
            Self::Null(_) => AttrType::Null,
            Self::L(_) => AttrType::L,
            Self::M(_) => AttrType::M,
            Self::Ss(_) => AttrType::Ss,
            Self::Ns(_) => AttrType::Ns,
            Self::Bs(_) => AttrType::Bs,
        }
    }

    /// Returns `true` if this is a set variant with no elements.
    ///
    /// Empty sets are not representable on the wire; update compilation
    /// rewrites assignments of them into removals.
    #[must_use]
    pub fn is_empty_set(&self) -> bool {
        match self {
            Self::Ss(v) | Self::Ns(v) => v.is_empty(),
            Self::Bs(v) => v.is_empty(),
            _ => false,
        }
    }

    /// Returns the string if this is an `S` value.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number literal if this is an `N` value.
    #[must_use]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::N(n) => map.serialize_entry("N", n)?,
            Self::B(b) => map.serialize_entry("B", &BASE64.encode(b))?,
            Self::Bool(b) => map.serialize_entry("BOOL", b)?,
            Self::Null(b) => map.serialize_entry("NULL", b)?,
            Self::L(list) => map.serialize_entry("L", list)?,
            Self::M(m) => map.serialize_entry("M", m)?,
            Self::Ss(v) => map.serialize_entry("SS", v)?,
            Self::Ns(v) => map.serialize_entry("NS", v)?,
            Self::Bs(v) => {
                let encoded: Vec<String> = v.iter().map(|b| BASE64.encode(b)).collect();
                map.serialize_entry("BS", &encoded)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom("attribute value must have one type key"));
        };

        let value = match key.as_str() {
            "S" => AttributeValue::S(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "B" => {
                let encoded: String = map.next_value()?;
                let decoded = BASE64.decode(&encoded).map_err(de::Error::custom)?;
                AttributeValue::B(bytes::Bytes::from(decoded))
            }
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            "SS" => AttributeValue::Ss(map.next_value()?),
            "NS" => AttributeValue::Ns(map.next_value()?),
            "BS" => {
                let encoded: Vec<String> = map.next_value()?;
                let decoded: Result<Vec<bytes::Bytes>, _> = encoded
                    .iter()
                    .map(|e| BASE64.decode(e).map(bytes::Bytes::from))
                    .collect();
                AttributeValue::Bs(decoded.map_err(de::Error::custom)?)
            }
            other => {
                return Err(de::Error::unknown_field(
                    other,
                    &["S", "N", "B", "BOOL", "NULL", "L", "M", "SS", "NS", "BS"],
                ));
            }
        };

        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(
                "attribute value must have exactly one type key",
            ));
        }

        Ok(value)
    }
}
