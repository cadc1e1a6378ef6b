//! Same-document reference lookup
//!
//! References are JSON pointers (RFC 6901) anchored at the root document:
//! `#` names the root itself and `#/definitions/Pet` walks into it. References
//! naming another document are rejected.
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::borrow::Cow;

/// Split a reference into its JSON pointer, rejecting external documents.
///
/// The fragment is percent-decoded (`#/definitions/Pet%20Owner`) before
/// it is read as a pointer.
pub fn pointer_of(reference: &str) -> LoaderResult<Cow<'_, str>> {
    match reference.find('#') {
        Some(0) => {
            let pointer = percent_decode_str(&reference[1..])
                .decode_utf8()
                .map_err(|e| {
                    LoaderError::reference_error(reference, format!("Invalid fragment: {}", e))
                })?;
            validate_json_pointer(reference, &pointer)?;
            Ok(pointer)
        }
        _ => Err(LoaderError::ExternalReference {
            reference: reference.to_string(),
        }),
    }
}

/// Locate the value a reference points at inside `root`
pub fn lookup<'a>(root: &'a Value, reference: &str) -> LoaderResult<&'a Value> {
    let pointer = pointer_of(reference)?;
    apply_json_pointer(root, &pointer, reference)
}

/// Apply a JSON pointer to extract a specific part of the document
pub fn apply_json_pointer<'a>(
    document: &'a Value,
    pointer: &str,
    reference: &str,
) -> LoaderResult<&'a Value> {
    let mut current = document;
    if pointer.is_empty() {
        return Ok(current);
    }

    for segment in pointer.split('/').skip(1) {
        let decoded_segment = decode_segment(segment);

        current = match current {
            Value::Object(obj) => obj.get(&decoded_segment).ok_or_else(|| {
                LoaderError::reference_error(
                    reference,
                    format!("Property '{}' not found", decoded_segment),
                )
            })?,
            Value::Array(arr) => {
                let index = decoded_segment.parse::<usize>().map_err(|_| {
                    LoaderError::reference_error(
                        reference,
                        format!("Invalid array index '{}'", decoded_segment),
                    )
                })?;
                arr.get(index).ok_or_else(|| {
                    LoaderError::reference_error(
                        reference,
                        format!("Array index {} out of bounds", index),
                    )
                })?
            }
            _ => {
                return Err(LoaderError::reference_error(
                    reference,
                    format!(
                        "Cannot access property '{}' on non-object/array",
                        decoded_segment
                    ),
                ))
            }
        };
    }

    Ok(current)
}

/// Validate JSON pointer syntax
pub fn validate_json_pointer(reference: &str, pointer: &str) -> LoaderResult<()> {
    if pointer.is_empty() {
        return Ok(());
    }

    if !pointer.starts_with('/') {
        return Err(LoaderError::reference_error(
            reference,
            "JSON pointer must start with '/' or be empty",
        ));
    }

    for segment in pointer.split('/').skip(1) {
        let mut chars = segment.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '~' {
                match chars.peek() {
                    Some('0') | Some('1') => {
                        chars.next();
                    }
                    _ => {
                        return Err(LoaderError::reference_error(
                            reference,
                            "Invalid escape sequence in JSON pointer",
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}

// `~1` must be decoded before `~0` so that `~01` yields `~1`
fn decode_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "definitions": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"}
                    }
                },
                "a/b": {"type": "string"},
                "m~n": {"type": "integer"},
                "Pet Owner": {"type": "string"},
                "100%": {"type": "number"}
            },
            "items": [1, 2, 3]
        })
    }

    #[test]
    fn test_lookup_object_and_array() -> LoaderResult<()> {
        let doc = document();

        assert_eq!(lookup(&doc, "#/definitions/Pet")?["type"], "object");
        assert_eq!(lookup(&doc, "#/items/1")?, &json!(2));
        assert_eq!(lookup(&doc, "#")?, &doc);

        Ok(())
    }

    #[test]
    fn test_lookup_escaped_segments() -> LoaderResult<()> {
        let doc = document();

        assert_eq!(lookup(&doc, "#/definitions/a~1b")?["type"], "string");
        assert_eq!(lookup(&doc, "#/definitions/m~0n")?["type"], "integer");

        Ok(())
    }

    #[test]
    fn test_lookup_percent_encoded_fragment() -> LoaderResult<()> {
        let doc = document();

        assert_eq!(lookup(&doc, "#/definitions/Pet%20Owner")?["type"], "string");
        assert_eq!(lookup(&doc, "#/definitions/100%25")?["type"], "number");
        assert_eq!(lookup(&doc, "#/definitions/a%7E1b")?["type"], "string");
        assert!(lookup(&doc, "#/definitions/%FF").is_err());

        Ok(())
    }

    #[test]
    fn test_lookup_failures() {
        let doc = document();

        let missing = lookup(&doc, "#/definitions/Missing").unwrap_err();
        assert!(missing.to_string().contains("Property 'Missing' not found"));

        assert!(lookup(&doc, "#/items/9").is_err());
        assert!(lookup(&doc, "#/items/first").is_err());
        assert!(lookup(&doc, "#/definitions/Pet/type/deeper").is_err());
        assert!(matches!(
            lookup(&doc, "other.json#/definitions/Pet"),
            Err(LoaderError::ExternalReference { .. })
        ));
        assert!(matches!(
            lookup(&doc, "pet.json"),
            Err(LoaderError::ExternalReference { .. })
        ));
    }

    #[test]
    fn test_json_pointer_validation() {
        assert!(validate_json_pointer("#", "").is_ok());
        assert!(validate_json_pointer("#/definitions/Pet", "/definitions/Pet").is_ok());
        assert!(validate_json_pointer("#/escaped~0", "/escaped~0").is_ok());

        assert!(validate_json_pointer("#invalid", "invalid").is_err());
        assert!(validate_json_pointer("#/bad~escape", "/bad~escape").is_err());
    }
}
