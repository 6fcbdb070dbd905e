//! Placeholder allocation for compiled expressions.
//!
//! Expression strings never contain literal attribute names or values.
//! Both are replaced by short placeholder tokens (`#k` for names, `:k`
//! for values) with side tables mapping tokens back to the real data.
//! One registry serves all expressions compiled for a single outgoing
//! request, then is discarded; it is not meant to be shared across
//! threads or requests.

use std::collections::HashMap;

use dynoquery_model::AttributeValue;

/// Allocates `#k` name placeholders and `:k` value placeholders.
///
/// Names are interned: the same raw name always yields the same token
/// within one registry. Values are positional: every serialization call
/// gets a fresh slot, even for equal literals. The two counters are
/// independent and both start at zero; first use determines numbering.
#[derive(Debug, Default)]
pub struct PlaceholderRegistry {
    names: Vec<String>,
    name_ordinals: HashMap<String, usize>,
    values: Vec<AttributeValue>,
}

impl PlaceholderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the placeholder for a raw attribute name, allocating the
    /// next ordinal on first use.
    pub fn name_placeholder(&mut self, raw: &str) -> String {
        if let Some(&ordinal) = self.name_ordinals.get(raw) {
            return format!("#{ordinal}");
        }
        let ordinal = self.names.len();
        self.names.push(raw.to_owned());
        self.name_ordinals.insert(raw.to_owned(), ordinal);
        format!("#{ordinal}")
    }

    /// Allocates a fresh value placeholder for one occurrence of a
    /// serialized value. Equal values do not share slots.
    pub fn value_placeholder(&mut self, value: AttributeValue) -> String {
        let ordinal = self.values.len();
        self.values.push(value);
        format!(":{ordinal}")
    }

    /// The `ExpressionAttributeNames` side table: `#k` → raw name.
    #[must_use]
    pub fn attribute_names(&self) -> HashMap<String, String> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, raw)| (format!("#{i}"), raw.clone()))
            .collect()
    }

    /// The `ExpressionAttributeValues` side table: `:k` → wire value.
    #[must_use]
    pub fn attribute_values(&self) -> HashMap<String, AttributeValue> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!(":{i}"), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_intern_repeated_names() {
        let mut registry = PlaceholderRegistry::new();
        assert_eq!(registry.name_placeholder("foo"), "#0");
        assert_eq!(registry.name_placeholder("bar"), "#1");
        assert_eq!(registry.name_placeholder("foo"), "#0");
        assert_eq!(
            registry.attribute_names(),
            HashMap::from([
                ("#0".to_owned(), "foo".to_owned()),
                ("#1".to_owned(), "bar".to_owned()),
            ])
        );
    }

    #[test]
    fn test_should_not_intern_values() {
        let mut registry = PlaceholderRegistry::new();
        let five = AttributeValue::N("5".to_owned());
        assert_eq!(registry.value_placeholder(five.clone()), ":0");
        assert_eq!(registry.value_placeholder(five.clone()), ":1");
        assert_eq!(
            registry.attribute_values(),
            HashMap::from([(":0".to_owned(), five.clone()), (":1".to_owned(), five)])
        );
    }

    #[test]
    fn test_should_keep_name_and_value_counters_independent() {
        let mut registry = PlaceholderRegistry::new();
        assert_eq!(registry.value_placeholder(AttributeValue::Bool(true)), ":0");
        assert_eq!(registry.name_placeholder("x"), "#0");
        assert_eq!(registry.value_placeholder(AttributeValue::Bool(false)), ":1");
        assert_eq!(registry.name_placeholder("y"), "#1");
    }

    #[test]
    fn test_should_restart_ordinals_per_registry() {
        let mut first = PlaceholderRegistry::new();
        first.name_placeholder("a");
        first.name_placeholder("b");

        let mut second = PlaceholderRegistry::new();
        assert_eq!(second.name_placeholder("b"), "#0");
    }
}
