//! Expression compiler for dynoquery.
//!
//! This crate turns trees of comparison and update operations into the
//! placeholder-based expression strings a document-store API consumes
//! (condition/filter/key-condition, update, and projection expressions)
//! plus the two substitution tables (`ExpressionAttributeNames`,
//! `ExpressionAttributeValues`). The pipeline is:
//!
//! 1. **Construction**: build immutable [`Condition`]/[`Update`] trees
//!    from [`Path`]s, operands, and native values. All type constraints
//!    are checked here.
//! 2. **Compilation**: hand the trees to an [`ExpressionCompiler`], which
//!    serializes them against one shared [`PlaceholderRegistry`] and
//!    returns the request-ready [`CompiledExpressions`].
//!
//! Everything is pure in-memory string building; no I/O occurs here.

pub mod attribute;
pub mod compiler;
pub mod condition;
pub mod error;
pub mod operand;
pub mod path;
pub mod projection;
pub mod registry;
pub mod update;

pub use attribute::{Attribute, AttributeDef};
pub use compiler::{CompiledExpressions, ExpressionCompiler};
pub use condition::{ComparisonOp, Condition};
pub use error::ExpressionError;
pub use operand::{Operand, OperandArg};
pub use path::Path;
pub use projection::{ProjectionPath, projection_expression};
pub use registry::PlaceholderRegistry;
pub use update::{Action, Update};

pub use dynoquery_model::{AttrType, AttributeValue, Number, SerializationError, Value};
