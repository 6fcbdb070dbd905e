//! Schema collaborator seam.
//!
//! The expression layer never depends on a concrete schema or model
//! framework; it only needs each attribute's declared name and wire type.
//! Both sides depend on this trait, which keeps schema definitions and
//! expression types free of any cycle.

use dynoquery_model::AttrType;

use crate::path::Path;

/// A declared attribute: a name and a wire type.
///
/// Implement this on schema/model attribute definitions to use them
/// directly in conditions, updates, and projections. The declared name is
/// a single path segment taken verbatim, so names containing literal dots
/// are supported.
pub trait Attribute {
    /// The attribute's declared name.
    fn name(&self) -> &str;

    /// The attribute's declared wire type.
    fn attr_type(&self) -> AttrType;

    /// A typed document path rooted at this attribute.
    fn path(&self) -> Path {
        Path::single_segment(self.name()).typed(self.attr_type())
    }
}

/// A standalone attribute definition for callers without a schema layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDef {
    name: String,
    attr_type: AttrType,
}

impl AttributeDef {
    /// Defines an attribute with a name and wire type.
    #[must_use]
    pub fn new(name: impl Into<String>, attr_type: AttrType) -> Self {
        Self {
            name: name.into(),
            attr_type,
        }
    }
}

impl Attribute for AttributeDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn attr_type(&self) -> AttrType {
        self.attr_type
    }
}
