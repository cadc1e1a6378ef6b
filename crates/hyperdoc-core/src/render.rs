//! Template rendering of [`Document`]s with Tera
//!
//! Templates see the serialized document plus `host`. Two helpers are
//! registered:
//!
//! - filter `join_types(sep=", ")` joins a schema's `type` set
//! - testers `array_schema` / `object_schema` check a schema's `type` set
//!
//! The bundled macros are available to every template as
//! `{% import "hyperdoc/macros.md" as doc %}`.

use crate::document::Document;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tera::{Context, Tera, Value};
use tracing::debug;

/// Name of the bundled macro library
pub const MACROS_TEMPLATE: &str = "hyperdoc/macros.md";

/// Name under which the main template is registered
pub const MAIN_TEMPLATE: &str = "hyperdoc/main";

const DEFAULT_TEMPLATE_SOURCE: &str = include_str!("../templates/default.md.tera");
const MACROS_SOURCE: &str = include_str!("../templates/macros.md.tera");

/// Renders documents through a single template
#[derive(Debug)]
pub struct Generator {
    tera: Tera,
}

impl Generator {
    /// A generator using the built-in Markdown template
    pub fn new() -> Result<Self> {
        Self::from_template_str(DEFAULT_TEMPLATE_SOURCE)
    }

    pub fn from_template_str(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.register_filter("join_types", join_types);
        tera.register_tester("array_schema", |value: Option<&Value>, _: &[Value]| {
            Ok(has_type(value, "array"))
        });
        tera.register_tester("object_schema", |value: Option<&Value>, _: &[Value]| {
            Ok(has_type(value, "object"))
        });

        tera.add_raw_templates(vec![(MACROS_TEMPLATE, MACROS_SOURCE), (MAIN_TEMPLATE, source)])
            .map_err(|e| Error::template("Failed to parse template", e))?;

        Ok(Self { tera })
    }

    pub fn from_template_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading template");
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read template {}", path.display()), e))?;
        Self::from_template_str(&source)
    }

    /// Render a document to a string
    pub fn render(&self, document: &Document) -> Result<String> {
        self.tera
            .render(MAIN_TEMPLATE, &context_for(document)?)
            .map_err(|e| Error::template("Failed to render document", e))
    }

    /// Render a document into a writer
    pub fn process<W: Write>(&self, out: W, document: &Document) -> Result<()> {
        self.tera
            .render_to(MAIN_TEMPLATE, &context_for(document)?, out)
            .map_err(|e| Error::template("Failed to render document", e))
    }
}

fn context_for(document: &Document) -> Result<Context> {
    let mut context = Context::from_serialize(document)
        .map_err(|e| Error::template("Failed to build template context", e))?;
    context.insert("host", document.host());
    Ok(context)
}

/// `{{ schema.type | join_types(sep="|") }}`
fn join_types(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let sep = match args.get("sep") {
        Some(Value::String(sep)) => sep.as_str(),
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "join_types: `sep` must be a string, got {other}"
            )))
        }
        None => ", ",
    };

    let joined = match value {
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(sep),
        Value::String(single) => single.clone(),
        Value::Null => String::new(),
        other => {
            return Err(tera::Error::msg(format!(
                "join_types: expected a type list, got {other}"
            )))
        }
    };

    Ok(Value::String(joined))
}

fn has_type(schema: Option<&Value>, name: &str) -> bool {
    schema
        .and_then(|s| s.get("type"))
        .and_then(Value::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use hyperdoc_schemas::HyperSchema;
    use serde_json::json;

    fn pets_document() -> Document {
        let root = json!({
            "title": "Pets API",
            "description": "Manage pets",
            "href": "https://api.example.com",
            "definitions": {
                "Pet": {
                    "type": "object",
                    "description": "A pet",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string", "example": "Rex"},
                        "tags": {"type": "array", "items": {"type": "string"}}
                    }
                }
            },
            "properties": {
                "pet": {"$ref": "#/definitions/Pet"}
            },
            "links": [
                {
                    "href": "/pets",
                    "rel": "instances",
                    "description": "List pets",
                    "targetSchema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                },
                {
                    "href": "/pets",
                    "rel": "create",
                    "method": "POST",
                    "schema": {"$ref": "#/definitions/Pet"}
                }
            ]
        });
        build(&HyperSchema::from_value(&root).unwrap(), &root).unwrap()
    }

    #[test]
    fn test_join_types_filter() {
        let mut args = HashMap::new();
        assert_eq!(
            join_types(&json!(["string", "null"]), &args).unwrap(),
            json!("string, null")
        );

        args.insert("sep".to_string(), json!("|"));
        assert_eq!(
            join_types(&json!(["string", "null"]), &args).unwrap(),
            json!("string|null")
        );
        assert_eq!(join_types(&json!(null), &args).unwrap(), json!(""));
        assert!(join_types(&json!(3), &args).is_err());
    }

    #[test]
    fn test_type_testers() {
        let array = json!({"type": ["array"]});
        let object = json!({"type": ["object", "null"]});
        assert!(has_type(Some(&array), "array"));
        assert!(!has_type(Some(&array), "object"));
        assert!(has_type(Some(&object), "object"));
        assert!(!has_type(Some(&Value::Null), "object"));
        assert!(!has_type(None, "array"));
    }

    #[test]
    fn test_default_template() {
        let doc = pets_document();
        let output = Generator::new().unwrap().render(&doc).unwrap();

        assert!(output.starts_with("# Pets API"));
        assert!(output.contains("Manage pets"));
        assert!(output.contains("## GET /pets"));
        assert!(output.contains("## POST /pets"));
        assert!(output.contains("Host: api.example.com"));
        assert!(output.contains("HTTP/1.1 200 OK"));
        assert!(output.contains("HTTP/1.1 201 Created"));
        assert!(output.contains("\"name\": \"Rex\""));
        assert!(output.contains("[Pet](#pet)"));
        assert!(output.contains("`pet.name`"));

        // Every label link has a target in the document
        assert!(output.contains("## Definitions"));
        assert!(output.contains("<a id=\"pet\"></a>\n\n### Pet\n"));
        assert_eq!(output.matches("<a id=").count(), doc.definitions.len());
    }

    #[test]
    fn test_anchor_slugs_match_links() {
        let root = json!({
            "definitions": {"Pet Owner": {"type": "string", "description": "Keeper"}},
            "properties": {"owner": {"$ref": "#/definitions/Pet%20Owner"}},
            "links": []
        });
        let doc = build(&HyperSchema::from_value(&root).unwrap(), &root).unwrap();
        assert_eq!(doc.properties["owner"].ref_label, "Pet Owner");
        let output = Generator::new().unwrap().render(&doc).unwrap();

        assert!(output.contains("[Pet Owner](#pet-owner)"));
        assert!(output.contains("<a id=\"pet-owner\"></a>\n\n### Pet Owner\n"));
        assert!(output.contains("Type: `string`"));
    }

    #[test]
    fn test_custom_template() {
        let doc = pets_document();
        let generator = Generator::from_template_str(
            "{{ title }}@{{ host }}\n\
             {% for op in operations %}{{ op.method }} {{ op.response.status_code }}\
             {% if op.target_schema is array_schema %} list{% endif %}\
             {% if op.schema is object_schema %} form{% endif %}\n{% endfor %}",
        )
        .unwrap();

        assert_eq!(
            generator.render(&doc).unwrap(),
            "Pets API@api.example.com\nGET 200 list\nPOST 201 form\n"
        );
    }

    #[test]
    fn test_process_writes_output() {
        let doc = pets_document();
        let generator = Generator::from_template_str("{{ operations | length }}").unwrap();

        let mut out = Vec::new();
        generator.process(&mut out, &doc).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2");
    }

    #[test]
    fn test_template_errors() {
        let err = Generator::from_template_str("{% if %}").unwrap_err();
        assert!(matches!(err, Error::Template { .. }));

        let generator = Generator::from_template_str("{{ missing.field }}").unwrap();
        let err = generator.render(&pets_document()).unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }

    #[test]
    fn test_missing_template_file() {
        let err = Generator::from_template_file(Path::new("/nonexistent/doc.tera")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
