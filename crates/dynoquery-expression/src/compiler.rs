//! Request-level expression compilation.
//!
//! One outgoing request may carry several expressions (a key condition, a
//! filter, an update, a projection) that must share a single placeholder
//! registry so names are interned across all of them. The compiler owns
//! that lifecycle: build the trees, hand them to one
//! [`ExpressionCompiler`], and attach the resulting
//! [`CompiledExpressions`] to the request.

use std::collections::HashMap;

use dynoquery_model::AttributeValue;
use serde::Serialize;

use crate::condition::Condition;
use crate::error::ExpressionError;
use crate::projection::{ProjectionPath, projection_expression};
use crate::registry::PlaceholderRegistry;
use crate::update::Update;

/// The compiled expression fields of one request.
///
/// Serializes with `PascalCase` field names and omits empty fields, so it
/// can be merged directly into an outgoing API payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompiledExpressions {
    /// Key condition restricting a query to matching keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,
    /// Condition gating a write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Filter applied to read results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    /// Update actions to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,
    /// Attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// `#k` → raw attribute name substitutions.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,
    /// `:k` → wire value substitutions.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: HashMap<String, AttributeValue>,
}

/// Compiles the expressions of one request against a shared registry.
///
/// Expressions are compiled in a fixed order (key condition, condition,
/// filter, update, projection), which determines placeholder numbering.
#[derive(Debug, Default)]
pub struct ExpressionCompiler<'a> {
    key_condition: Option<&'a Condition>,
    condition: Option<&'a Condition>,
    filter: Option<&'a Condition>,
    update: Option<&'a Update>,
    projection: Vec<ProjectionPath>,
}

impl<'a> ExpressionCompiler<'a> {
    /// Creates a compiler with no expressions attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a key condition.
    #[must_use]
    pub fn key_condition(mut self, condition: &'a Condition) -> Self {
        self.key_condition = Some(condition);
        self
    }

    /// Attaches a write condition.
    #[must_use]
    pub fn condition(mut self, condition: &'a Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Attaches a result filter.
    #[must_use]
    pub fn filter(mut self, condition: &'a Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    /// Attaches an update. An empty update compiles to no expression.
    #[must_use]
    pub fn update(mut self, update: &'a Update) -> Self {
        self.update = Some(update);
        self
    }

    /// Attaches projection attributes.
    #[must_use]
    pub fn projection<I, T>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProjectionPath>,
    {
        self.projection = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Compiles everything against one fresh registry.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::PathSyntax`] for an unparseable raw
    /// projection path. Condition and update trees cannot fail here;
    /// their constraints were checked at construction.
    pub fn compile(self) -> Result<CompiledExpressions, ExpressionError> {
        let mut registry = PlaceholderRegistry::new();
        let mut out = CompiledExpressions {
            key_condition_expression: self
                .key_condition
                .map(|c| c.serialize(&mut registry)),
            condition_expression: self.condition.map(|c| c.serialize(&mut registry)),
            filter_expression: self.filter.map(|c| c.serialize(&mut registry)),
            update_expression: self.update.and_then(|u| u.serialize(&mut registry)),
            ..CompiledExpressions::default()
        };
        if !self.projection.is_empty() {
            out.projection_expression =
                Some(projection_expression(self.projection, &mut registry)?);
        }
        out.expression_attribute_names = registry.attribute_names();
        out.expression_attribute_values = registry.attribute_values();

        tracing::debug!(
            names = out.expression_attribute_names.len(),
            values = out.expression_attribute_values.len(),
            has_key_condition = out.key_condition_expression.is_some(),
            has_condition = out.condition_expression.is_some(),
            has_filter = out.filter_expression.is_some(),
            has_update = out.update_expression.is_some(),
            has_projection = out.projection_expression.is_some(),
            "compiled request expressions"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use dynoquery_model::AttrType;

    use super::*;
    use crate::path::Path;

    fn typed(name: &str, t: AttrType) -> Path {
        Path::parse(name).unwrap().typed(t)
    }

    #[test]
    fn test_should_share_registry_across_expressions() {
        let condition = typed("version", AttrType::N).equals(1).unwrap();
        let update: Update = [typed("version", AttrType::N).assign(2).unwrap()]
            .into_iter()
            .collect();

        let compiled = ExpressionCompiler::new()
            .condition(&condition)
            .update(&update)
            .compile()
            .unwrap();

        assert_eq!(compiled.condition_expression.as_deref(), Some("#0 = :0"));
        assert_eq!(compiled.update_expression.as_deref(), Some("SET #0 = :1"));
        assert_eq!(compiled.expression_attribute_names.len(), 1);
        assert_eq!(compiled.expression_attribute_values.len(), 2);
    }

    #[test]
    fn test_should_omit_expression_for_empty_update() {
        let update = Update::new();
        let compiled = ExpressionCompiler::new().update(&update).compile().unwrap();
        assert!(compiled.update_expression.is_none());
        assert!(compiled.expression_attribute_names.is_empty());
    }

    #[test]
    fn test_should_serialize_minimal_pascal_case_payload() {
        let condition = typed("foo", AttrType::S).equals("bar").unwrap();
        let compiled = ExpressionCompiler::new()
            .condition(&condition)
            .compile()
            .unwrap();

        let json = serde_json::to_value(&compiled).unwrap();
        assert_eq!(json["ConditionExpression"], "#0 = :0");
        assert_eq!(json["ExpressionAttributeNames"]["#0"], "foo");
        assert_eq!(json["ExpressionAttributeValues"][":0"]["S"], "bar");
        assert!(json.get("UpdateExpression").is_none());
        assert!(json.get("ProjectionExpression").is_none());
    }

    #[test]
    fn test_should_compile_query_with_filter_and_projection() {
        let key = typed("pk", AttrType::S).equals("user#1").unwrap();
        let filter = typed("age", AttrType::N).greater_than(21).unwrap();

        let compiled = ExpressionCompiler::new()
            .key_condition(&key)
            .filter(&filter)
            .projection(["pk", "age", "name"])
            .compile()
            .unwrap();

        assert_eq!(compiled.key_condition_expression.as_deref(), Some("#0 = :0"));
        assert_eq!(compiled.filter_expression.as_deref(), Some("#1 > :1"));
        assert_eq!(compiled.projection_expression.as_deref(), Some("#0, #1, #2"));
    }

    #[test]
    fn test_should_surface_projection_path_errors() {
        let result = ExpressionCompiler::new().projection(["bad["]).compile();
        assert!(matches!(result, Err(ExpressionError::PathSyntax { .. })));
    }
}
