//! Property-based tests for resolution and example synthesis
//!
//! Schemas are generated as raw JSON, resolved against an empty root and
//! checked against the compositional rules of synthesis.

use hyperdoc_core::{ref_label, resolve, synthesize, Error, ResolvedSchema};
use hyperdoc_schemas::Schema;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for primitive type names that always synthesize
fn primitive_type_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("null"),
        Just("boolean"),
        Just("integer"),
        Just("number"),
        Just("string"),
    ]
}

/// Strategy for property names
fn property_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,12}"
}

/// Strategy for author-supplied examples
fn example_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::from),
    ]
}

/// Strategy for schemas that can always be synthesized
fn schema_strategy() -> impl Strategy<Value = Value> {
    let leaf = (primitive_type_strategy(), proptest::option::of(example_strategy())).prop_map(
        |(kind, example)| match example {
            Some(example) => json!({"type": kind, "example": example}),
            None => json!({"type": kind}),
        },
    );

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            proptest::collection::btree_map(property_name_strategy(), inner.clone(), 0..4)
                .prop_map(|properties| json!({"type": "object", "properties": properties})),
            inner
                .clone()
                .prop_map(|item| json!({"type": "array", "items": item})),
            proptest::collection::vec(inner, 1..4)
                .prop_map(|items| json!({"type": "array", "items": items})),
        ]
    })
}

/// Strategy for object schemas
fn object_schema_strategy() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map(property_name_strategy(), schema_strategy(), 0..5)
        .prop_map(|properties| json!({"type": "object", "properties": properties}))
}

/// Strategy for homogeneous and tuple array schemas with at least one item
fn array_schema_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        schema_strategy().prop_map(|item| json!({"type": "array", "items": item})),
        proptest::collection::vec(schema_strategy(), 1..4)
            .prop_map(|items| json!({"type": "array", "items": items})),
    ]
}

fn resolved(schema: &Value) -> ResolvedSchema {
    resolve(&Schema::from_value(schema).unwrap(), &json!({})).unwrap()
}

fn default_for(kind: &str) -> Value {
    match kind {
        "integer" | "number" => json!(0),
        "boolean" => json!(false),
        "string" => json!(""),
        _ => Value::Null,
    }
}

proptest! {
    #[test]
    fn prop_object_keys_match_properties(schema in object_schema_strategy()) {
        let node = resolved(&schema);

        let value = synthesize(&node).unwrap();
        let object = value.as_object().unwrap();

        let keys: Vec<_> = object.keys().cloned().collect();
        let names: Vec<_> = node.properties.keys().cloned().collect();
        prop_assert_eq!(keys, names);

        for (name, property) in &node.properties {
            prop_assert_eq!(&object[name], &synthesize(property).unwrap());
        }
    }

    #[test]
    fn prop_array_has_one_element_from_first_item(schema in array_schema_strategy()) {
        let node = resolved(&schema);

        let first = &node.items.as_ref().unwrap().schemas[0];
        prop_assert_eq!(synthesize(&node).unwrap(), json!([synthesize(first).unwrap()]));
    }

    #[test]
    fn prop_primitive_defaults(kind in primitive_type_strategy()) {
        let node = resolved(&json!({"type": kind}));
        prop_assert_eq!(synthesize(&node).unwrap(), default_for(kind));
    }

    #[test]
    fn prop_example_wins_over_primitive_default(
        kind in primitive_type_strategy(),
        example in example_strategy(),
    ) {
        let node = resolved(&json!({"type": kind, "example": example.clone()}));
        prop_assert_eq!(&node.literal_example, &serde_json::to_string(&example).unwrap());
        prop_assert_eq!(synthesize(&node).unwrap(), example);
    }

    #[test]
    fn prop_synthesized_examples_encode(schema in schema_strategy()) {
        let node = resolved(&schema);
        let encoded = hyperdoc_core::encode_example(&node).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, synthesize(&node).unwrap());
    }

    #[test]
    fn prop_definition_labels(name in "[A-Za-z][A-Za-z0-9_]{0,20}") {
        prop_assert_eq!(ref_label(&format!("#/definitions/{name}")), name);
    }
}

#[test]
fn test_string_example_literal() {
    let node = resolved(&json!({"type": "string", "example": "hi"}));
    assert_eq!(synthesize(&node).unwrap(), json!("hi"));
}

#[test]
fn test_untyped_schema_without_example() {
    let node = resolved(&json!({"description": "opaque"}));
    assert!(matches!(synthesize(&node), Err(Error::NoExample { .. })));
}
