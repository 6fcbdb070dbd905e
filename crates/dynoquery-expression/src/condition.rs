//! Condition tree construction and serialization.
//!
//! Conditions gate writes and restrict reads. They are immutable trees of
//! comparisons, predicate functions, and boolean combinators, built
//! through explicit methods on [`Operand`] and [`Path`]. All type checks
//! run at construction; serializing a built tree cannot fail.

use std::fmt;

use dynoquery_model::AttrType;

use crate::error::ExpressionError;
use crate::operand::{Operand, OperandArg};
use crate::path::Path;
use crate::registry::PlaceholderRegistry;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Equal (`=`).
    Eq,
    /// Not equal (`<>`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl ComparisonOp {
    fn is_ordering(self) -> bool {
        !matches!(self, Self::Eq | Self::Ne)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// An immutable condition tree node.
///
/// Equality is structural (operator plus children), so built trees can be
/// compared directly in tests without serializing.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `lhs op rhs`.
    Compare {
        /// Comparison operator.
        op: ComparisonOp,
        /// Left-hand operand.
        lhs: Operand,
        /// Right-hand operand.
        rhs: Operand,
    },
    /// `operand BETWEEN lower AND upper` (inclusive).
    Between {
        /// Value under test.
        operand: Operand,
        /// Lower bound.
        lower: Operand,
        /// Upper bound.
        upper: Operand,
    },
    /// `operand IN (candidates...)`.
    In {
        /// Value under test.
        operand: Operand,
        /// Candidate values.
        candidates: Vec<Operand>,
    },
    /// `attribute_exists (path)`.
    Exists {
        /// The path tested for presence.
        path: Operand,
    },
    /// `attribute_not_exists (path)`.
    NotExists {
        /// The path tested for absence.
        path: Operand,
    },
    /// `attribute_type (path, type)`.
    OfType {
        /// The path whose type is tested.
        path: Operand,
        /// The expected type tag, as a string literal operand.
        expected: Operand,
    },
    /// `begins_with (operand, prefix)`.
    BeginsWith {
        /// The string operand.
        operand: Operand,
        /// The prefix.
        prefix: Operand,
    },
    /// `contains (operand, member)`.
    Contains {
        /// The container (string or set or list).
        operand: Operand,
        /// The member sought.
        member: Operand,
    },
    /// `(lhs AND rhs)`.
    And(Box<Condition>, Box<Condition>),
    /// `(lhs OR rhs)`.
    Or(Box<Condition>, Box<Condition>),
    /// `(NOT inner)`.
    Not(Box<Condition>),
}

impl Condition {
    /// Conjoins two conditions: `(self AND other)`.
    #[must_use]
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(other))
    }

    /// Disjoins two conditions: `(self OR other)`.
    #[must_use]
    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Negates this condition: `(NOT self)`.
    #[must_use]
    pub fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }

    /// Folds a condition into an optional accumulator: `None` yields the
    /// condition itself, `Some(acc)` yields `(acc AND condition)`.
    ///
    /// This supports accumulating optional filters starting from `None`
    /// without a special empty condition.
    #[must_use]
    pub fn and_option(acc: Option<Condition>, condition: Condition) -> Condition {
        match acc {
            None => condition,
            Some(lhs) => lhs.and(condition),
        }
    }

    /// Serializes this tree against a registry, left to right, children
    /// before parents, so placeholder ordinals follow document order of
    /// the produced text.
    pub fn serialize(&self, registry: &mut PlaceholderRegistry) -> String {
        match self {
            Self::Compare { op, lhs, rhs } => format!(
                "{} {op} {}",
                lhs.serialize(registry),
                rhs.serialize(registry)
            ),
            Self::Between {
                operand,
                lower,
                upper,
            } => format!(
                "{} BETWEEN {} AND {}",
                operand.serialize(registry),
                lower.serialize(registry),
                upper.serialize(registry)
            ),
            Self::In {
                operand,
                candidates,
            } => {
                let head = operand.serialize(registry);
                let list: Vec<String> =
                    candidates.iter().map(|c| c.serialize(registry)).collect();
                format!("{head} IN ({})", list.join(", "))
            }
            Self::Exists { path } => format!("attribute_exists ({})", path.serialize(registry)),
            Self::NotExists { path } => {
                format!("attribute_not_exists ({})", path.serialize(registry))
            }
            Self::OfType { path, expected } => format!(
                "attribute_type ({}, {})",
                path.serialize(registry),
                expected.serialize(registry)
            ),
            Self::BeginsWith { operand, prefix } => format!(
                "begins_with ({}, {})",
                operand.serialize(registry),
                prefix.serialize(registry)
            ),
            Self::Contains { operand, member } => format!(
                "contains ({}, {})",
                operand.serialize(registry),
                member.serialize(registry)
            ),
            Self::And(lhs, rhs) => format!(
                "({} AND {})",
                lhs.serialize(registry),
                rhs.serialize(registry)
            ),
            Self::Or(lhs, rhs) => format!(
                "({} OR {})",
                lhs.serialize(registry),
                rhs.serialize(registry)
            ),
            Self::Not(inner) => format!("(NOT {})", inner.serialize(registry)),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder methods on Operand
// ---------------------------------------------------------------------------

impl Operand {
    /// `self = rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when both sides carry
    /// known, differing wire types.
    pub fn equals(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        self.compare(ComparisonOp::Eq, rhs)
    }

    /// `self <> rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when both sides carry
    /// known, differing wire types.
    pub fn not_equals(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        self.compare(ComparisonOp::Ne, rhs)
    }

    /// `self < rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the types differ or
    /// are not comparable on the wire.
    pub fn less_than(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        self.compare(ComparisonOp::Lt, rhs)
    }

    /// `self <= rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the types differ or
    /// are not comparable on the wire.
    pub fn less_than_or_equal(
        self,
        rhs: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        self.compare(ComparisonOp::Le, rhs)
    }

    /// `self > rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the types differ or
    /// are not comparable on the wire.
    pub fn greater_than(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        self.compare(ComparisonOp::Gt, rhs)
    }

    /// `self >= rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the types differ or
    /// are not comparable on the wire.
    pub fn greater_than_or_equal(
        self,
        rhs: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        self.compare(ComparisonOp::Ge, rhs)
    }

    fn compare(
        self,
        op: ComparisonOp,
        rhs: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        let rhs = rhs.into().resolve(self.attr_type())?;
        check_compatible("comparison", &self, &rhs)?;
        if op.is_ordering() {
            check_comparable("comparison", &self)?;
            check_comparable("comparison", &rhs)?;
        }
        Ok(Condition::Compare { op, lhs: self, rhs })
    }

    /// `self BETWEEN lower AND upper` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the three types
    /// differ or are not comparable on the wire.
    pub fn between(
        self,
        lower: impl Into<OperandArg>,
        upper: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        let hint = self.attr_type();
        let lower = lower.into().resolve(hint)?;
        let upper = upper.into().resolve(hint)?;
        check_compatible("BETWEEN", &self, &lower)?;
        check_compatible("BETWEEN", &self, &upper)?;
        for operand in [&self, &lower, &upper] {
            check_comparable("BETWEEN", operand)?;
        }
        Ok(Condition::Between {
            operand: self,
            lower,
            upper,
        })
    }

    /// `self IN (candidates...)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Composition`] for an empty candidate
    /// list, or [`ExpressionError::TypeMismatch`] when a candidate's type
    /// differs from the operand's.
    pub fn is_in<I, T>(self, candidates: I) -> Result<Condition, ExpressionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OperandArg>,
    {
        let hint = self.attr_type();
        let candidates: Vec<Operand> = candidates
            .into_iter()
            .map(|c| c.into().resolve(hint))
            .collect::<Result<_, _>>()?;
        if candidates.is_empty() {
            return Err(ExpressionError::composition(
                "IN requires at least one candidate value",
            ));
        }
        for candidate in &candidates {
            check_compatible("IN", &self, candidate)?;
        }
        Ok(Condition::In {
            operand: self,
            candidates,
        })
    }

    /// `attribute_exists (self)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Composition`] when the operand is not a
    /// document path.
    pub fn exists(self) -> Result<Condition, ExpressionError> {
        require_path(&self, "attribute_exists")?;
        Ok(Condition::Exists { path: self })
    }

    /// `attribute_not_exists (self)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Composition`] when the operand is not a
    /// document path.
    pub fn not_exists(self) -> Result<Condition, ExpressionError> {
        require_path(&self, "attribute_not_exists")?;
        Ok(Condition::NotExists { path: self })
    }

    /// `attribute_type (self, expected)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Composition`] when the operand is not a
    /// document path.
    pub fn is_type(self, expected: AttrType) -> Result<Condition, ExpressionError> {
        require_path(&self, "attribute_type")?;
        let expected = Operand::value(expected.as_str(), None)?;
        Ok(Condition::OfType {
            path: self,
            expected,
        })
    }

    /// `begins_with (self, prefix)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when either side is bound
    /// to a non-string type.
    pub fn begins_with(self, prefix: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        let prefix = prefix.into().resolve(Some(AttrType::S))?;
        for operand in [&self, &prefix] {
            match operand.attr_type() {
                None | Some(AttrType::S) => {}
                Some(t) => {
                    return Err(ExpressionError::type_mismatch(
                        "begins_with",
                        format!("operand is {t}-typed, expected S"),
                    ));
                }
            }
        }
        Ok(Condition::BeginsWith {
            operand: self,
            prefix,
        })
    }

    /// `contains (self, member)`: substring test on strings, membership
    /// test on sets and lists.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the operand's type
    /// admits no members, or the member's type does not fit the
    /// container's element type.
    pub fn contains(self, member: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        let member_hint = match self.attr_type() {
            None | Some(AttrType::L) => None,
            Some(AttrType::S | AttrType::Ss) => Some(AttrType::S),
            Some(AttrType::Ns) => Some(AttrType::N),
            Some(AttrType::Bs) => Some(AttrType::B),
            Some(t) => {
                return Err(ExpressionError::type_mismatch(
                    "contains",
                    format!("{t}-typed operand has no members"),
                ));
            }
        };
        let member = member.into().resolve(member_hint)?;
        if let (Some(expected), Some(actual)) = (member_hint, member.attr_type()) {
            if expected != actual {
                return Err(ExpressionError::type_mismatch(
                    "contains",
                    format!("member is {actual}-typed, container admits {expected}"),
                ));
            }
        }
        Ok(Condition::Contains {
            operand: self,
            member,
        })
    }
}

fn check_compatible(
    operation: &'static str,
    lhs: &Operand,
    rhs: &Operand,
) -> Result<(), ExpressionError> {
    if let (Some(a), Some(b)) = (lhs.attr_type(), rhs.attr_type()) {
        if a != b {
            return Err(ExpressionError::type_mismatch(
                operation,
                format!("cannot compare {a} with {b}"),
            ));
        }
    }
    Ok(())
}

fn check_comparable(operation: &'static str, operand: &Operand) -> Result<(), ExpressionError> {
    match operand.attr_type() {
        None => Ok(()),
        Some(t) if t.is_comparable() => Ok(()),
        Some(t) => Err(ExpressionError::type_mismatch(
            operation,
            format!("{t} values have no ordering"),
        )),
    }
}

fn require_path(operand: &Operand, operation: &str) -> Result<(), ExpressionError> {
    match operand {
        Operand::Path(_) => Ok(()),
        _ => Err(ExpressionError::composition(format!(
            "{operation} requires a document path operand"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Builder methods on Path (delegating through Operand)
// ---------------------------------------------------------------------------

impl Path {
    /// `self = rhs`. See [`Operand::equals`].
    ///
    /// # Errors
    ///
    /// See [`Operand::equals`].
    pub fn equals(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        Operand::from(self).equals(rhs)
    }

    /// `self <> rhs`. See [`Operand::not_equals`].
    ///
    /// # Errors
    ///
    /// See [`Operand::not_equals`].
    pub fn not_equals(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        Operand::from(self).not_equals(rhs)
    }

    /// `self < rhs`. See [`Operand::less_than`].
    ///
    /// # Errors
    ///
    /// See [`Operand::less_than`].
    pub fn less_than(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        Operand::from(self).less_than(rhs)
    }

    /// `self <= rhs`. See [`Operand::less_than_or_equal`].
    ///
    /// # Errors
    ///
    /// See [`Operand::less_than_or_equal`].
    pub fn less_than_or_equal(
        self,
        rhs: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        Operand::from(self).less_than_or_equal(rhs)
    }

    /// `self > rhs`. See [`Operand::greater_than`].
    ///
    /// # Errors
    ///
    /// See [`Operand::greater_than`].
    pub fn greater_than(self, rhs: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        Operand::from(self).greater_than(rhs)
    }

    /// `self >= rhs`. See [`Operand::greater_than_or_equal`].
    ///
    /// # Errors
    ///
    /// See [`Operand::greater_than_or_equal`].
    pub fn greater_than_or_equal(
        self,
        rhs: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        Operand::from(self).greater_than_or_equal(rhs)
    }

    /// `self BETWEEN lower AND upper`. See [`Operand::between`].
    ///
    /// # Errors
    ///
    /// See [`Operand::between`].
    pub fn between(
        self,
        lower: impl Into<OperandArg>,
        upper: impl Into<OperandArg>,
    ) -> Result<Condition, ExpressionError> {
        Operand::from(self).between(lower, upper)
    }

    /// `self IN (candidates...)`. See [`Operand::is_in`].
    ///
    /// # Errors
    ///
    /// See [`Operand::is_in`].
    pub fn is_in<I, T>(self, candidates: I) -> Result<Condition, ExpressionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OperandArg>,
    {
        Operand::from(self).is_in(candidates)
    }

    /// `attribute_exists (self)`.
    #[must_use]
    pub fn exists(self) -> Condition {
        Condition::Exists {
            path: Operand::from(self),
        }
    }

    /// `attribute_not_exists (self)`.
    #[must_use]
    pub fn not_exists(self) -> Condition {
        Condition::NotExists {
            path: Operand::from(self),
        }
    }

    /// `attribute_type (self, expected)`. See [`Operand::is_type`].
    ///
    /// # Errors
    ///
    /// See [`Operand::is_type`].
    pub fn is_type(self, expected: AttrType) -> Result<Condition, ExpressionError> {
        Operand::from(self).is_type(expected)
    }

    /// `begins_with (self, prefix)`. See [`Operand::begins_with`].
    ///
    /// # Errors
    ///
    /// See [`Operand::begins_with`].
    pub fn begins_with(self, prefix: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        Operand::from(self).begins_with(prefix)
    }

    /// `contains (self, member)`. See [`Operand::contains`].
    ///
    /// # Errors
    ///
    /// See [`Operand::contains`].
    pub fn contains(self, member: impl Into<OperandArg>) -> Result<Condition, ExpressionError> {
        Operand::from(self).contains(member)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use dynoquery_model::{AttributeValue, Value};

    use super::*;

    fn typed(name: &str, t: AttrType) -> Path {
        Path::parse(name).unwrap().typed(t)
    }

    #[test]
    fn test_should_serialize_equality_end_to_end() {
        let mut registry = PlaceholderRegistry::new();
        let condition = typed("foo", AttrType::S).equals("bar").unwrap();
        assert_eq!(condition.serialize(&mut registry), "#0 = :0");
        assert_eq!(
            registry.attribute_names(),
            HashMap::from([("#0".to_owned(), "foo".to_owned())])
        );
        assert_eq!(
            registry.attribute_values(),
            HashMap::from([(":0".to_owned(), AttributeValue::S("bar".to_owned()))])
        );
    }

    #[test]
    fn test_should_parenthesize_boolean_combinators() {
        let mut registry = PlaceholderRegistry::new();
        let a = typed("a", AttrType::N).greater_than(1).unwrap();
        let b = typed("b", AttrType::N).less_than(2).unwrap();
        let condition = a.and(b);
        assert_eq!(condition.serialize(&mut registry), "(#0 > :0 AND #1 < :1)");
    }

    #[test]
    fn test_should_serialize_nested_not() {
        let mut registry = PlaceholderRegistry::new();
        let condition = typed("flag", AttrType::Bool).equals(true).unwrap().not();
        assert_eq!(condition.serialize(&mut registry), "(NOT #0 = :0)");
    }

    #[test]
    fn test_should_serialize_between() {
        let mut registry = PlaceholderRegistry::new();
        let condition = typed("age", AttrType::N).between(18, 65).unwrap();
        assert_eq!(
            condition.serialize(&mut registry),
            "#0 BETWEEN :0 AND :1"
        );
    }

    #[test]
    fn test_should_serialize_in_list() {
        let mut registry = PlaceholderRegistry::new();
        let condition = typed("status", AttrType::S)
            .is_in(["open", "closed"])
            .unwrap();
        assert_eq!(condition.serialize(&mut registry), "#0 IN (:0, :1)");
    }

    #[test]
    fn test_should_serialize_predicate_functions() {
        let mut registry = PlaceholderRegistry::new();
        let exists = Path::parse("a").unwrap().exists();
        let of_type = Path::parse("b").unwrap().is_type(AttrType::Ss).unwrap();
        let begins = typed("c", AttrType::S).begins_with("pre").unwrap();
        assert_eq!(exists.serialize(&mut registry), "attribute_exists (#0)");
        assert_eq!(of_type.serialize(&mut registry), "attribute_type (#1, :0)");
        assert_eq!(begins.serialize(&mut registry), "begins_with (#2, :1)");
        assert_eq!(
            registry.attribute_values().get(":0"),
            Some(&AttributeValue::S("SS".to_owned()))
        );
    }

    #[test]
    fn test_should_intern_shared_names_across_conditions() {
        let mut registry = PlaceholderRegistry::new();
        let first = typed("x", AttrType::N).equals(1).unwrap();
        let second = typed("x", AttrType::N).equals(2).unwrap();
        assert_eq!(first.serialize(&mut registry), "#0 = :0");
        assert_eq!(second.serialize(&mut registry), "#0 = :1");

        let mut fresh = PlaceholderRegistry::new();
        assert_eq!(second.serialize(&mut fresh), "#0 = :0");
    }

    #[test]
    fn test_should_compare_trees_structurally() {
        let a = typed("x", AttrType::N).equals(1).unwrap();
        let b = typed("x", AttrType::N).equals(1).unwrap();
        let c = typed("x", AttrType::N).equals(2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_should_fold_from_optional_accumulator() {
        let cond = typed("x", AttrType::N).equals(1).unwrap();
        assert_eq!(Condition::and_option(None, cond.clone()), cond);

        let other = typed("y", AttrType::N).equals(2).unwrap();
        let folded = Condition::and_option(Some(cond.clone()), other.clone());
        assert_eq!(folded, cond.and(other));
    }

    #[test]
    fn test_should_reject_mismatched_comparison_types() {
        let result = typed("name", AttrType::S).equals(Operand::value(1, None).unwrap());
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_reject_ordering_on_non_comparable_type() {
        let result = typed("flags", AttrType::Ss)
            .less_than(Operand::value(Value::string_set(["a"]), None).unwrap());
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_reject_between_on_bool() {
        let result = typed("flag", AttrType::Bool).between(false, true);
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_reject_empty_in_list() {
        let result = typed("status", AttrType::S).is_in(Vec::<&str>::new());
        assert!(matches!(result, Err(ExpressionError::Composition { .. })));
    }

    #[test]
    fn test_should_reject_exists_on_value_operand() {
        let operand = Operand::value(1, None).unwrap();
        assert!(matches!(
            operand.exists(),
            Err(ExpressionError::Composition { .. })
        ));
    }

    #[test]
    fn test_should_reject_begins_with_on_number_path() {
        let result = typed("count", AttrType::N).begins_with("1");
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_type_check_contains_member() {
        // String set admits string members.
        assert!(typed("tags", AttrType::Ss).contains("a").is_ok());
        // Number member does not fit a string set.
        let result = typed("tags", AttrType::Ss).contains(Operand::value(1, None).unwrap());
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
        // Scalars other than strings have no members at all.
        let result = typed("count", AttrType::N).contains("x");
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_serialize_size_comparison() {
        let mut registry = PlaceholderRegistry::new();
        let condition = Operand::size(Path::parse("tags").unwrap())
            .greater_than(2)
            .unwrap();
        assert_eq!(condition.serialize(&mut registry), "size (#0) > :0");
    }
}
