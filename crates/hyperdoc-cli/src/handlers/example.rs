//! Example command handler

use crate::cli::{ExampleArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use hyperdoc_core::{encode_example, synthesize, Resolver};
use hyperdoc_schemas::Schema;
use tracing::{debug, instrument};

use super::utils::load_schema;

/// Handle the example command
#[instrument(skip(config, output), fields(schema = %args.schema.display(), pointer = %args.pointer))]
pub fn handle_example(args: ExampleArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("example_command", &args.pointer);

    let loaded = load_schema(&args.schema)?;
    let node = loaded.select(&args.pointer)?;
    Schema::from_value(node).map_err(|e| {
        Error::other(format!("Node at '{}' is not a schema: {}", args.pointer, e))
    })?;

    // Resolve through a reference so the node itself is on the cycle stack
    let schema = Schema {
        reference: Some(format!("#{}", args.pointer.replace('%', "%25"))),
        ..Schema::default()
    };
    let resolved = Resolver::with_policy(&loaded.root, config.resolution.cycle_policy)
        .resolve(&schema)?;
    debug!(identity = resolved.identity(), "Resolved example schema");

    match output.format() {
        OutputFormat::Human => output.writeln(&encode_example(&resolved)?),
        _ => output.data(&synthesize(&resolved)?),
    }
}

#[cfg(test)]
mod tests {
    use super::super::utils::fixtures::{write_schema, PETS_YAML};
    use super::*;
    use crate::output::test_support::SharedBuffer;

    fn example(pointer: &str, format: OutputFormat) -> Result<String> {
        example_with(pointer, format, &Config::default())
    }

    fn example_with(pointer: &str, format: OutputFormat, config: &Config) -> Result<String> {
        let (_dir, schema) = write_schema("pets.yaml", PETS_YAML);
        let out = SharedBuffer::default();
        let mut output = OutputWriter::with_writers(
            format,
            false,
            false,
            Box::new(out.clone()),
            Box::new(std::io::sink()),
        );
        handle_example(
            ExampleArgs {
                schema,
                pointer: pointer.to_string(),
            },
            config,
            &mut output,
        )?;
        Ok(out.contents())
    }

    #[test]
    fn test_definition_example() {
        assert_eq!(
            example("/definitions/Pet", OutputFormat::Human).unwrap(),
            "{\n  \"age\": 0,\n  \"name\": \"Rex\"\n}\n"
        );
        assert_eq!(
            example("/definitions/Pet", OutputFormat::Json).unwrap(),
            "{\"age\":0,\"name\":\"Rex\"}\n"
        );
    }

    #[test]
    fn test_recursive_definition_is_stubbed() {
        assert_eq!(
            example("/definitions/Node", OutputFormat::Json).unwrap(),
            "{\"next\":{}}\n"
        );
    }

    #[test]
    fn test_recursive_definition_matches_built_document() {
        let (_dir, path) = write_schema("pets.yaml", PETS_YAML);
        let loaded = super::super::utils::load_schema(&path).unwrap();
        let root = &loaded.root;
        let built = hyperdoc_core::build(
            &hyperdoc_schemas::HyperSchema::from_value(&serde_json::json!({
                "definitions": root["definitions"].clone(),
                "links": [{"targetSchema": {"$ref": "#/definitions/Node"}}]
            }))
            .unwrap(),
            root,
        )
        .unwrap();

        assert_eq!(
            example("/definitions/Node", OutputFormat::Human).unwrap(),
            format!("{}\n", built.operations[0].response.body)
        );
    }

    #[test]
    fn test_recursive_definition_fails_under_fail_policy() {
        let mut config = Config::default();
        config.resolution.cycle_policy = hyperdoc_core::CyclePolicy::Fail;

        let err = example_with("/definitions/Node", OutputFormat::Json, &config).unwrap_err();
        assert!(err.to_string().contains("#/definitions/Node -> #/definitions/Node"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unknown_pointer() {
        let err = example("/definitions/Owner", OutputFormat::Human).unwrap_err();
        assert!(matches!(err, Error::Loader(_)));
    }

    #[test]
    fn test_root_without_type_has_no_example() {
        let err = example("", OutputFormat::Human).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
