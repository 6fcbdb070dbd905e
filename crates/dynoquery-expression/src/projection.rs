//! Projection expression compilation.
//!
//! A projection names the attributes a read should return. Inputs are
//! normalized to document paths (raw strings are parsed, schema
//! attributes contribute their declared name verbatim) and serialized
//! through the same name-placeholder mechanism as every other path, so
//! repeated prefixes across requested attributes share placeholders.

use crate::attribute::Attribute;
use crate::error::ExpressionError;
use crate::operand::Operand;
use crate::path::Path;
use crate::registry::PlaceholderRegistry;

/// One requested projection attribute, before path normalization.
#[derive(Debug, Clone)]
pub enum ProjectionPath {
    /// A raw dotted path string, parsed at compile time.
    Raw(String),
    /// An already-built document path.
    Parsed(Path),
}

impl ProjectionPath {
    /// Normalizes a schema attribute: its declared name becomes a single
    /// verbatim path segment.
    pub fn attribute<A: Attribute + ?Sized>(attr: &A) -> Self {
        Self::Parsed(attr.path())
    }

    fn into_path(self) -> Result<Path, ExpressionError> {
        match self {
            Self::Raw(raw) => Path::parse(&raw),
            Self::Parsed(path) => Ok(path),
        }
    }
}

impl From<&str> for ProjectionPath {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_owned())
    }
}

impl From<String> for ProjectionPath {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Path> for ProjectionPath {
    fn from(path: Path) -> Self {
        Self::Parsed(path)
    }
}

/// Compiles a projection expression from the requested attributes,
/// joining the substituted paths with `, `.
///
/// # Errors
///
/// Returns [`ExpressionError::PathSyntax`] for an unparseable raw path,
/// or [`ExpressionError::Composition`] when no attributes are requested.
pub fn projection_expression<I, T>(
    attributes: I,
    registry: &mut PlaceholderRegistry,
) -> Result<String, ExpressionError>
where
    I: IntoIterator<Item = T>,
    T: Into<ProjectionPath>,
{
    let mut parts: Vec<String> = Vec::new();
    for item in attributes {
        let path = item.into().into_path()?;
        parts.push(Operand::Path(path).serialize(registry));
    }
    if parts.is_empty() {
        return Err(ExpressionError::composition(
            "projection requires at least one attribute",
        ));
    }
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use dynoquery_model::AttrType;

    use super::*;
    use crate::attribute::AttributeDef;

    #[test]
    fn test_should_compile_mixed_depth_projection() {
        let mut registry = PlaceholderRegistry::new();
        let expression = projection_expression(
            ["Description", "RelatedItems[0]", "ProductReviews.FiveStar"],
            &mut registry,
        )
        .unwrap();
        assert_eq!(expression, "#0, #1[0], #2.#3");
        assert_eq!(
            registry.attribute_names(),
            HashMap::from([
                ("#0".to_owned(), "Description".to_owned()),
                ("#1".to_owned(), "RelatedItems".to_owned()),
                ("#2".to_owned(), "ProductReviews".to_owned()),
                ("#3".to_owned(), "FiveStar".to_owned()),
            ])
        );
    }

    #[test]
    fn test_should_share_placeholders_across_repeated_prefixes() {
        let mut registry = PlaceholderRegistry::new();
        let expression = projection_expression(
            ["ProductReviews.FiveStar", "ProductReviews.OneStar"],
            &mut registry,
        )
        .unwrap();
        assert_eq!(expression, "#0.#1, #0.#2");
    }

    #[test]
    fn test_should_accept_schema_attributes_and_paths() {
        let mut registry = PlaceholderRegistry::new();
        let attr = AttributeDef::new("file.name", AttrType::S);
        let expression = projection_expression(
            [
                ProjectionPath::attribute(&attr),
                ProjectionPath::from(Path::parse("size").unwrap()),
            ],
            &mut registry,
        )
        .unwrap();
        assert_eq!(expression, "#0, #1");
        assert_eq!(
            registry.attribute_names().get("#0"),
            Some(&"file.name".to_owned())
        );
    }

    #[test]
    fn test_should_reject_malformed_projection_path() {
        let mut registry = PlaceholderRegistry::new();
        let result = projection_expression(["ok", "bad["], &mut registry);
        assert!(matches!(result, Err(ExpressionError::PathSyntax { .. })));
    }

    #[test]
    fn test_should_reject_empty_projection() {
        let mut registry = PlaceholderRegistry::new();
        let result = projection_expression(Vec::<&str>::new(), &mut registry);
        assert!(matches!(result, Err(ExpressionError::Composition { .. })));
    }
}
