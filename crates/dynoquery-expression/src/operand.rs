//! Operand model for condition and update expressions.
//!
//! An operand is anything that can stand on one side of a comparison or
//! on the right-hand side of an update action: a document path, a
//! serialized literal, or one of the derived forms (`size`, arithmetic,
//! `list_append`, `if_not_exists`). Type constraints are enforced when a
//! node is constructed; serialization of a built tree cannot fail.

use dynoquery_model::{AttrType, AttributeValue, Number, Value, serialize};

use crate::error::ExpressionError;
use crate::path::Path;
use crate::registry::PlaceholderRegistry;

/// One operand in an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A document path reference.
    Path(Path),
    /// A literal, already serialized to its wire form.
    Value(AttributeValue),
    /// `size (path)`, the size of the referenced attribute.
    Size(Box<Operand>),
    /// `lhs + rhs` arithmetic over numbers.
    Increment(Box<Operand>, Box<Operand>),
    /// `lhs - rhs` arithmetic over numbers.
    Decrement(Box<Operand>, Box<Operand>),
    /// `list_append (lhs, rhs)`, list concatenation.
    ListAppend(Box<Operand>, Box<Operand>),
    /// `if_not_exists (path, default)`, the default when the path is absent.
    IfNotExists(Box<Operand>, Box<Operand>),
}

impl Operand {
    /// Serializes a native value into a literal operand, optionally under
    /// a wire type hint.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Serialization`] when the value does not
    /// admit the hint.
    pub fn value(value: impl Into<Value>, hint: Option<AttrType>) -> Result<Self, ExpressionError> {
        Ok(Self::Value(serialize(value.into(), hint)?))
    }

    /// Builds a `size (path)` operand. Its result type is `N`.
    #[must_use]
    pub fn size(path: Path) -> Self {
        Self::Size(Box::new(Self::Path(path)))
    }

    /// Builds a `lhs + rhs` operand. Both sides must be number-typed or
    /// untyped.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when either side is bound
    /// to a non-number type.
    pub fn increment(
        lhs: impl Into<OperandArg>,
        rhs: impl Into<OperandArg>,
    ) -> Result<Self, ExpressionError> {
        let (lhs, rhs) = arithmetic_pair("increment", lhs, rhs)?;
        Ok(Self::Increment(Box::new(lhs), Box::new(rhs)))
    }

    /// Builds a `lhs - rhs` operand. Both sides must be number-typed or
    /// untyped.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when either side is bound
    /// to a non-number type.
    pub fn decrement(
        lhs: impl Into<OperandArg>,
        rhs: impl Into<OperandArg>,
    ) -> Result<Self, ExpressionError> {
        let (lhs, rhs) = arithmetic_pair("decrement", lhs, rhs)?;
        Ok(Self::Decrement(Box::new(lhs), Box::new(rhs)))
    }

    /// Builds a `list_append (lhs, rhs)` operand. Both sides must be
    /// list-typed or untyped.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when either side is bound
    /// to a non-list type.
    pub fn list_append(
        lhs: impl Into<OperandArg>,
        rhs: impl Into<OperandArg>,
    ) -> Result<Self, ExpressionError> {
        let lhs = lhs.into().resolve(Some(AttrType::L))?;
        let rhs = rhs.into().resolve(Some(AttrType::L))?;
        require_type(&lhs, AttrType::L, "list_append")?;
        require_type(&rhs, AttrType::L, "list_append")?;
        Ok(Self::ListAppend(Box::new(lhs), Box::new(rhs)))
    }

    /// Builds an `if_not_exists (path, default)` operand. The default is
    /// serialized under the path's type hint.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Serialization`] when the default does
    /// not admit the path's type.
    pub fn if_not_exists(
        path: Path,
        default: impl Into<OperandArg>,
    ) -> Result<Self, ExpressionError> {
        let hint = path.attr_type();
        let default = default.into().resolve(hint)?;
        Ok(Self::IfNotExists(
            Box::new(Self::Path(path)),
            Box::new(default),
        ))
    }

    /// The wire type this operand is known to produce, if any.
    #[must_use]
    pub fn attr_type(&self) -> Option<AttrType> {
        match self {
            Self::Path(path) => path.attr_type(),
            Self::Value(av) => Some(av.attr_type()),
            Self::Size(_) | Self::Increment(_, _) | Self::Decrement(_, _) => Some(AttrType::N),
            Self::ListAppend(_, _) => Some(AttrType::L),
            Self::IfNotExists(path, default) => path.attr_type().or_else(|| default.attr_type()),
        }
    }

    /// Serializes this operand against a registry, returning its
    /// placeholder text.
    pub fn serialize(&self, registry: &mut PlaceholderRegistry) -> String {
        match self {
            Self::Path(path) => serialize_path(path, registry),
            Self::Value(av) => registry.value_placeholder(av.clone()),
            Self::Size(inner) => format!("size ({})", inner.serialize(registry)),
            Self::Increment(lhs, rhs) => {
                format!("{} + {}", lhs.serialize(registry), rhs.serialize(registry))
            }
            Self::Decrement(lhs, rhs) => {
                format!("{} - {}", lhs.serialize(registry), rhs.serialize(registry))
            }
            Self::ListAppend(lhs, rhs) => format!(
                "list_append ({}, {})",
                lhs.serialize(registry),
                rhs.serialize(registry)
            ),
            Self::IfNotExists(path, default) => format!(
                "if_not_exists ({}, {})",
                path.serialize(registry),
                default.serialize(registry)
            ),
        }
    }
}

impl From<Path> for Operand {
    fn from(path: Path) -> Self {
        Self::Path(path)
    }
}

/// Substitutes name placeholders segment by segment, re-attaching any
/// `[i]` index suffixes unchanged.
fn serialize_path(path: &Path, registry: &mut PlaceholderRegistry) -> String {
    let parts: Vec<String> = path
        .segments()
        .iter()
        .map(|segment| {
            let name_end = segment.find('[').unwrap_or(segment.len());
            let (name, suffix) = segment.split_at(name_end);
            format!("{}{suffix}", registry.name_placeholder(name))
        })
        .collect();
    parts.join(".")
}

fn arithmetic_pair(
    operation: &'static str,
    lhs: impl Into<OperandArg>,
    rhs: impl Into<OperandArg>,
) -> Result<(Operand, Operand), ExpressionError> {
    let lhs = lhs.into().resolve(Some(AttrType::N))?;
    let rhs = rhs.into().resolve(Some(AttrType::N))?;
    require_type(&lhs, AttrType::N, operation)?;
    require_type(&rhs, AttrType::N, operation)?;
    Ok((lhs, rhs))
}

fn require_type(
    operand: &Operand,
    expected: AttrType,
    operation: &'static str,
) -> Result<(), ExpressionError> {
    match operand.attr_type() {
        None => Ok(()),
        Some(t) if t == expected => Ok(()),
        Some(t) => Err(ExpressionError::type_mismatch(
            operation,
            format!("operand is {t}-typed, expected {expected}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Right-hand-side coercion
// ---------------------------------------------------------------------------

/// An argument position that accepts either an existing operand or a bare
/// native value.
///
/// Native values are serialized on the spot, using the left-hand operand's
/// known type as a hint (so comparing a set-typed path against a plain
/// list serializes the list as a set).
#[derive(Debug, Clone)]
pub enum OperandArg {
    /// An already-built operand, used as-is.
    Operand(Operand),
    /// A native value, serialized when the enclosing node is built.
    Native(Value),
}

impl OperandArg {
    pub(crate) fn resolve(self, hint: Option<AttrType>) -> Result<Operand, ExpressionError> {
        match self {
            Self::Operand(op) => Ok(op),
            Self::Native(v) => Operand::value(v, hint),
        }
    }
}

impl From<Operand> for OperandArg {
    fn from(op: Operand) -> Self {
        Self::Operand(op)
    }
}

impl From<Path> for OperandArg {
    fn from(path: Path) -> Self {
        Self::Operand(Operand::Path(path))
    }
}

macro_rules! impl_native_operand_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for OperandArg {
            fn from(v: $t) -> Self {
                Self::Native(v.into())
            }
        })*
    };
}

impl_native_operand_arg!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f64,
    &str,
    String,
    Number,
    bytes::Bytes,
    Vec<u8>,
    Vec<Value>,
    Value
);
