// Tests for document formatting and the output writer

use super::test_support::SharedBuffer;
use super::*;
use hyperdoc_core::build;
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
                "properties": {"name": {"type": "string", "description": "Call name"}}
            }
        },
        "properties": {"pet": {"$ref": "#/definitions/Pet"}},
        "links": [
            {"href": "/pets", "rel": "instances", "description": "List pets",
             "targetSchema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}},
            {"href": "/pets/{id}", "method": "PATCH", "schema": {"$ref": "#/definitions/Pet"}}
        ]
    });
    build(&HyperSchema::from_value(&root).unwrap(), &root).unwrap()
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::default();
    let messages = SharedBuffer::default();
    let writer = OutputWriter::with_writers(
        format,
        false,
        quiet,
        Box::new(out.clone()),
        Box::new(messages.clone()),
    );
    (writer, out, messages)
}

#[test]
fn test_document_human_formatting() {
    let formatted = OutputFormat::Human
        .format_document(&pets_document(), false)
        .unwrap();

    assert!(formatted.starts_with("=== Pets API ===\nManage pets\n"));
    assert!(formatted.contains("Base URL: https://api.example.com/"));
    assert!(formatted.contains("  pet: Pet\n"));
    assert!(formatted.contains("    name: string - Call name\n"));
    assert!(formatted.contains("=== Operations (2) ==="));
    assert!(formatted.contains("  GET /pets [instances] -> 200 OK\n"));
    assert!(formatted.contains("      List pets\n"));
    assert!(formatted.contains("      response: array\n"));
    assert!(formatted.contains("  PATCH /pets/{id} -> 0 \n"));
    assert!(formatted.contains("      request: Pet\n"));
}

#[test]
fn test_relative_base_href_is_shown() {
    let root = json!({"title": "Pets API", "href": "/v1"});
    let document = build(&HyperSchema::from_value(&root).unwrap(), &root).unwrap();

    let formatted = OutputFormat::Human.format_document(&document, false).unwrap();
    assert!(formatted.contains("Base URL: /v1 (relative, host example.com)\n"));
}

#[test]
fn test_document_machine_formats() {
    let document = pets_document();

    let compact = OutputFormat::Json.format_document(&document, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(value["title"], "Pets API");
    assert_eq!(value["operations"][0]["response"]["status_code"], 200);
    assert_eq!(value["properties"]["pet"]["ref_label"], "Pet");
    assert!(!compact.contains('\n'));

    let pretty = OutputFormat::JsonPretty.format_document(&document, false).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&pretty).unwrap(), value);

    let yaml = OutputFormat::Yaml.format_document(&document, false).unwrap();
    assert!(yaml.contains("title: Pets API"));
}

#[test]
fn test_messages_are_kept_off_the_data_stream() {
    let (mut output, out, messages) = writer(OutputFormat::Human, false);

    output.info("Loading schema").unwrap();
    output.writeln("payload").unwrap();
    output.success("Done").unwrap();

    assert_eq!(out.contents(), "payload\n");
    assert_eq!(messages.contents(), "INFO: Loading schema\nDone\n");
}

#[test]
fn test_quiet_and_machine_formats_suppress_messages() {
    let (mut quiet, _, quiet_messages) = writer(OutputFormat::Human, true);
    quiet.info("hidden").unwrap();
    quiet.success("hidden").unwrap();
    assert_eq!(quiet_messages.contents(), "");

    let (mut json, out, json_messages) = writer(OutputFormat::Json, false);
    json.info("hidden").unwrap();
    json.data(&json!({"ok": true})).unwrap();
    assert_eq!(json_messages.contents(), "");
    assert_eq!(out.contents(), "{\"ok\":true}\n");
}

#[test]
fn test_yaml_data_is_not_double_terminated() {
    let (mut output, out, _) = writer(OutputFormat::Yaml, false);
    output.data(&json!({"name": "Rex"})).unwrap();
    assert_eq!(out.contents(), "name: Rex\n");
}
