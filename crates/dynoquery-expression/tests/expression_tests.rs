//! End-to-end expression compilation scenarios.

use std::collections::HashMap;

use dynoquery_expression::{
    AttrType, Attribute, AttributeDef, AttributeValue, Condition, ExpressionCompiler, Operand,
    Path, PlaceholderRegistry, Update, Value,
};

#[test]
fn test_should_compile_string_equality_request() {
    let foo = AttributeDef::new("foo", AttrType::S);
    let condition = foo.path().equals("bar").unwrap();

    let compiled = ExpressionCompiler::new()
        .condition(&condition)
        .compile()
        .unwrap();

    assert_eq!(compiled.condition_expression.as_deref(), Some("#0 = :0"));
    assert_eq!(
        compiled.expression_attribute_names,
        HashMap::from([("#0".to_owned(), "foo".to_owned())])
    );
    assert_eq!(
        compiled.expression_attribute_values,
        HashMap::from([(":0".to_owned(), AttributeValue::S("bar".to_owned()))])
    );
}

#[test]
fn test_should_compile_projection_request() {
    let compiled = ExpressionCompiler::new()
        .projection(["Description", "RelatedItems[0]", "ProductReviews.FiveStar"])
        .compile()
        .unwrap();

    assert_eq!(
        compiled.projection_expression.as_deref(),
        Some("#0, #1[0], #2.#3")
    );
    assert_eq!(
        compiled.expression_attribute_names,
        HashMap::from([
            ("#0".to_owned(), "Description".to_owned()),
            ("#1".to_owned(), "RelatedItems".to_owned()),
            ("#2".to_owned(), "ProductReviews".to_owned()),
            ("#3".to_owned(), "FiveStar".to_owned()),
        ])
    );
}

#[test]
fn test_should_compile_four_clause_update() {
    let foo = AttributeDef::new("foo", AttrType::S);
    let foo_set = AttributeDef::new("fooSet", AttrType::Ns);

    let update: Update = [
        foo.path().assign("bar").unwrap(),
        foo.path().remove(),
        foo_set
            .path()
            .add(Value::number_set([0.into()]))
            .unwrap(),
        foo_set
            .path()
            .delete(Value::number_set([1.into()]))
            .unwrap(),
    ]
    .into_iter()
    .collect();

    let compiled = ExpressionCompiler::new().update(&update).compile().unwrap();

    assert_eq!(
        compiled.update_expression.as_deref(),
        Some("SET #0 = :0 REMOVE #0 ADD #1 :1 DELETE #1 :2")
    );
    assert_eq!(
        compiled.expression_attribute_names,
        HashMap::from([
            ("#0".to_owned(), "foo".to_owned()),
            ("#1".to_owned(), "fooSet".to_owned()),
        ])
    );
    assert_eq!(
        compiled.expression_attribute_values,
        HashMap::from([
            (":0".to_owned(), AttributeValue::S("bar".to_owned())),
            (":1".to_owned(), AttributeValue::Ns(vec!["0".to_owned()])),
            (":2".to_owned(), AttributeValue::Ns(vec!["1".to_owned()])),
        ])
    );
}

#[test]
fn test_should_interleave_placeholders_in_document_order() {
    let mut registry = PlaceholderRegistry::new();
    let left = Path::parse("a").unwrap().typed(AttrType::N).equals(1).unwrap();
    let right = Path::parse("b")
        .unwrap()
        .typed(AttrType::S)
        .begins_with("x")
        .unwrap()
        .or(Path::parse("a").unwrap().exists());
    let condition = left.and(right);

    assert_eq!(
        condition.serialize(&mut registry),
        "(#0 = :0 AND (begins_with (#1, :1) OR attribute_exists (#0)))"
    );
}

#[test]
fn test_should_compile_conditional_counter_update() {
    let views = AttributeDef::new("views", AttrType::N);
    let condition = views.path().exists();
    let update: Update = [
        views
            .path()
            .assign(Operand::increment(views.path(), 1).unwrap())
            .unwrap(),
    ]
    .into_iter()
    .collect();

    let compiled = ExpressionCompiler::new()
        .condition(&condition)
        .update(&update)
        .compile()
        .unwrap();

    assert_eq!(
        compiled.condition_expression.as_deref(),
        Some("attribute_exists (#0)")
    );
    assert_eq!(
        compiled.update_expression.as_deref(),
        Some("SET #0 = #0 + :0")
    );
    assert_eq!(compiled.expression_attribute_names.len(), 1);
}

#[test]
fn test_should_keep_registries_isolated_between_compiles() {
    let condition = Path::parse("x").unwrap().typed(AttrType::N).equals(1).unwrap();

    let first = ExpressionCompiler::new()
        .condition(&condition)
        .compile()
        .unwrap();
    let second = ExpressionCompiler::new()
        .condition(&condition)
        .compile()
        .unwrap();

    assert_eq!(
        first.condition_expression,
        second.condition_expression
    );
    assert_eq!(first.expression_attribute_names, second.expression_attribute_names);
}

#[test]
fn test_should_fold_optional_filters() {
    let status = AttributeDef::new("status", AttrType::S);
    let age = AttributeDef::new("age", AttrType::N);

    let mut filter: Option<Condition> = None;
    for condition in [
        status.path().equals("open").unwrap(),
        age.path().greater_than_or_equal(18).unwrap(),
    ] {
        filter = Some(Condition::and_option(filter, condition));
    }

    let filter = filter.unwrap();
    let compiled = ExpressionCompiler::new().filter(&filter).compile().unwrap();
    assert_eq!(
        compiled.filter_expression.as_deref(),
        Some("(#0 = :0 AND #1 >= :1)")
    );
}

#[test]
fn test_should_compile_typed_set_comparison_from_native_list() {
    // A set-typed path serializes a bare native list as a set.
    let tags = AttributeDef::new("tags", AttrType::Ss);
    let condition = tags
        .path()
        .equals(vec![Value::from("b"), Value::from("a")])
        .unwrap();

    let compiled = ExpressionCompiler::new()
        .condition(&condition)
        .compile()
        .unwrap();
    assert_eq!(
        compiled.expression_attribute_values,
        HashMap::from([(
            ":0".to_owned(),
            AttributeValue::Ss(vec!["a".to_owned(), "b".to_owned()])
        )])
    );
}
