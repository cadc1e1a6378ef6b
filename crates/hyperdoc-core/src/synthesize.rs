//! Example synthesis
//!
//! Produces a representative JSON value for a [`ResolvedSchema`] by
//! type-directed dispatch. `array` wins over `object`, which wins over the
//! author's example, which wins over primitive defaults.

use crate::error::{Error, Result};
use crate::resolve::ResolvedSchema;
use hyperdoc_schemas::PrimitiveType;
use serde_json::{Map, Value};
use tracing::trace;

/// Synthesize an example value for a resolved schema.
///
/// Arrays yield a single element built from the first item schema, tuple
/// arrays included. Objects yield every property; the first failing
/// property aborts the whole object.
pub fn synthesize(schema: &ResolvedSchema) -> Result<Value> {
    if schema.is_array() {
        let first = schema.items.as_ref().and_then(|items| items.schemas.first());
        return match first {
            Some(item) => Ok(Value::Array(vec![synthesize(item)?])),
            None => Ok(Value::Array(Vec::new())),
        };
    }

    if schema.is_object() {
        let mut object = Map::new();
        for (name, property) in &schema.properties {
            trace!(property = %name, "Synthesizing property example");
            object.insert(name.clone(), synthesize(property)?);
        }
        return Ok(Value::Object(object));
    }

    if let Some(example) = &schema.example {
        return Ok(example.clone());
    }

    primitive_default(schema).ok_or_else(|| Error::NoExample {
        schema: schema.identity().to_string(),
    })
}

fn primitive_default(schema: &ResolvedSchema) -> Option<Value> {
    let types = &schema.types;
    if types.contains(PrimitiveType::Number) || types.contains(PrimitiveType::Integer) {
        Some(Value::from(0))
    } else if types.contains(PrimitiveType::Boolean) {
        Some(Value::Bool(false))
    } else if types.contains(PrimitiveType::String) {
        Some(Value::String(String::new()))
    } else if types.contains(PrimitiveType::Null) {
        Some(Value::Null)
    } else {
        None
    }
}

/// Synthesize and serialize an example as indented JSON
pub fn encode_example(schema: &ResolvedSchema) -> Result<String> {
    let example = synthesize(schema)?;
    serde_json::to_string_pretty(&example).map_err(|e| {
        Error::serialization(format!("Failed to encode example for {}", schema.identity()), e)
    })
}
