//! Update expression construction and serialization.
//!
//! An update is an aggregate of `SET`, `REMOVE`, `ADD`, and `DELETE`
//! actions. Actions are immutable once constructed; the aggregate keeps
//! insertion order within each clause and always emits clauses in the
//! fixed order `SET REMOVE ADD DELETE`.

use dynoquery_model::AttrType;

use crate::error::ExpressionError;
use crate::operand::{Operand, OperandArg};
use crate::path::Path;
use crate::registry::PlaceholderRegistry;

/// `path = value` within a `SET` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAction {
    /// Target path.
    pub path: Path,
    /// Value operand assigned to it.
    pub value: Operand,
}

/// A path within a `REMOVE` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveAction {
    /// Path to remove.
    pub path: Path,
}

/// `path value` within an `ADD` clause (numbers and sets only).
#[derive(Debug, Clone, PartialEq)]
pub struct AddAction {
    /// Target path.
    pub path: Path,
    /// Amount or set to add.
    pub value: Operand,
}

/// `path value` within a `DELETE` clause (sets only).
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAction {
    /// Target path.
    pub path: Path,
    /// Set elements to delete.
    pub value: Operand,
}

/// One update action of any clause kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A `SET` assignment.
    Set(SetAction),
    /// A `REMOVE` of a path.
    Remove(RemoveAction),
    /// An `ADD` to a number or set.
    Add(AddAction),
    /// A `DELETE` of set elements.
    Delete(DeleteAction),
}

impl Action {
    /// Builds a `SET path = value` action.
    ///
    /// Assigning an empty set is not representable on the wire, so such an
    /// assignment comes back as a `REMOVE` of the same path instead.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Serialization`] when a native value does
    /// not admit the path's type.
    pub fn set(path: Path, value: impl Into<OperandArg>) -> Result<Self, ExpressionError> {
        let value = value.into().resolve(path.attr_type())?;
        if let Operand::Value(av) = &value {
            if av.is_empty_set() {
                return Ok(Self::Remove(RemoveAction { path }));
            }
        }
        Ok(Self::Set(SetAction { path, value }))
    }

    /// Builds a `REMOVE path` action.
    #[must_use]
    pub fn remove(path: Path) -> Self {
        Self::Remove(RemoveAction { path })
    }

    /// Builds an `ADD path value` action. The value must be a number or a
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the value's wire
    /// type is not one of `N`, `SS`, `NS`, `BS`.
    pub fn add(path: Path, value: impl Into<OperandArg>) -> Result<Self, ExpressionError> {
        let value = value.into().resolve(path.attr_type())?;
        match value.attr_type() {
            Some(AttrType::N | AttrType::Ss | AttrType::Ns | AttrType::Bs) => {
                Ok(Self::Add(AddAction { path, value }))
            }
            other => Err(ExpressionError::type_mismatch(
                "ADD",
                format!(
                    "value must be a number or set, got {}",
                    other.map_or_else(|| "an untyped operand".to_owned(), |t| t.to_string())
                ),
            )),
        }
    }

    /// Builds a `DELETE path value` action. The value must be a set.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the value's wire
    /// type is not one of `SS`, `NS`, `BS`.
    pub fn delete(path: Path, value: impl Into<OperandArg>) -> Result<Self, ExpressionError> {
        let value = value.into().resolve(path.attr_type())?;
        match value.attr_type() {
            Some(AttrType::Ss | AttrType::Ns | AttrType::Bs) => {
                Ok(Self::Delete(DeleteAction { path, value }))
            }
            other => Err(ExpressionError::type_mismatch(
                "DELETE",
                format!(
                    "value must be a set, got {}",
                    other.map_or_else(|| "an untyped operand".to_owned(), |t| t.to_string())
                ),
            )),
        }
    }
}

// Action sugar on Path, mirroring the condition builders.
impl Path {
    /// Builds a `SET` of this path. See [`Action::set`].
    ///
    /// # Errors
    ///
    /// See [`Action::set`].
    pub fn assign(self, value: impl Into<OperandArg>) -> Result<Action, ExpressionError> {
        Action::set(self, value)
    }

    /// Builds a `REMOVE` of this path.
    #[must_use]
    pub fn remove(self) -> Action {
        Action::remove(self)
    }

    /// Builds an `ADD` to this path. See [`Action::add`].
    ///
    /// # Errors
    ///
    /// See [`Action::add`].
    pub fn add(self, value: impl Into<OperandArg>) -> Result<Action, ExpressionError> {
        Action::add(self, value)
    }

    /// Builds a `DELETE` from this path. See [`Action::delete`].
    ///
    /// # Errors
    ///
    /// See [`Action::delete`].
    pub fn delete(self, value: impl Into<OperandArg>) -> Result<Action, ExpressionError> {
        Action::delete(self, value)
    }
}

/// Aggregate of update actions, grouped by clause.
///
/// Actions are appended one at a time; each clause keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set_actions: Vec<SetAction>,
    remove_actions: Vec<RemoveAction>,
    add_actions: Vec<AddAction>,
    delete_actions: Vec<DeleteAction>,
}

impl Update {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action to its clause.
    pub fn push(&mut self, action: Action) -> &mut Self {
        match action {
            Action::Set(a) => self.set_actions.push(a),
            Action::Remove(a) => self.remove_actions.push(a),
            Action::Add(a) => self.add_actions.push(a),
            Action::Delete(a) => self.delete_actions.push(a),
        }
        self
    }

    /// Returns `true` if no actions have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set_actions.is_empty()
            && self.remove_actions.is_empty()
            && self.add_actions.is_empty()
            && self.delete_actions.is_empty()
    }

    /// Serializes the update expression, or `None` when there are no
    /// actions (no expression should be emitted at all).
    pub fn serialize(&self, registry: &mut PlaceholderRegistry) -> Option<String> {
        let mut clauses: Vec<String> = Vec::new();

        if !self.set_actions.is_empty() {
            let actions: Vec<String> = self
                .set_actions
                .iter()
                .map(|a| {
                    let path = Operand::Path(a.path.clone()).serialize(registry);
                    format!("{path} = {}", a.value.serialize(registry))
                })
                .collect();
            clauses.push(format!("SET {}", actions.join(", ")));
        }
        if !self.remove_actions.is_empty() {
            let actions: Vec<String> = self
                .remove_actions
                .iter()
                .map(|a| Operand::Path(a.path.clone()).serialize(registry))
                .collect();
            clauses.push(format!("REMOVE {}", actions.join(", ")));
        }
        if !self.add_actions.is_empty() {
            let actions: Vec<String> = self
                .add_actions
                .iter()
                .map(|a| {
                    let path = Operand::Path(a.path.clone()).serialize(registry);
                    format!("{path} {}", a.value.serialize(registry))
                })
                .collect();
            clauses.push(format!("ADD {}", actions.join(", ")));
        }
        if !self.delete_actions.is_empty() {
            let actions: Vec<String> = self
                .delete_actions
                .iter()
                .map(|a| {
                    let path = Operand::Path(a.path.clone()).serialize(registry);
                    format!("{path} {}", a.value.serialize(registry))
                })
                .collect();
            clauses.push(format!("DELETE {}", actions.join(", ")));
        }

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" "))
        }
    }
}

impl FromIterator<Action> for Update {
    fn from_iter<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        let mut update = Self::new();
        for action in actions {
            update.push(action);
        }
        update
    }
}

impl Extend<Action> for Update {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, actions: I) {
        for action in actions {
            self.push(action);
        }
    }
}
