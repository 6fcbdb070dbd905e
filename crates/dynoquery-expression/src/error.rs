//! Error types for expression construction.
//!
//! Every error here is raised while the expression tree is being built;
//! serialization of a successfully constructed tree cannot fail. None of
//! these indicate transient conditions. They are caller programming
//! errors and must propagate rather than be retried.

use dynoquery_model::SerializationError;

/// Errors produced while building condition, update, or projection trees.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    /// A document path string did not match the path grammar.
    #[error("invalid document path '{path}': {reason}")]
    PathSyntax {
        /// The offending raw path.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
    /// An operand or action combination violates a declared type constraint.
    #[error("type mismatch in {operation}: {message}")]
    TypeMismatch {
        /// The operation being constructed.
        operation: &'static str,
        /// Explanation.
        message: String,
    },
    /// A native value could not be serialized to its wire form.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// A structurally invalid combination of expression nodes.
    #[error("invalid expression composition: {message}")]
    Composition {
        /// Explanation.
        message: String,
    },
}

impl ExpressionError {
    pub(crate) fn path_syntax(path: &str, reason: impl Into<String>) -> Self {
        Self::PathSyntax {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_mismatch(operation: &'static str, message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn composition(message: impl Into<String>) -> Self {
        Self::Composition {
            message: message.into(),
        }
    }
}
