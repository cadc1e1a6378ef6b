//! Generate command handler

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use hyperdoc_core::Generator;
use std::fs;
use tracing::{debug, info, instrument};

use super::utils::{build_document, load_schema};

/// Handle the generate command
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_generate(args: GenerateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("generate_command", &args.schema.display().to_string());
    output.info(&format!("Generating documentation for {}", args.schema.display()))?;

    let loaded = load_schema(&args.schema)?;
    let document = build_document(&loaded, config)?;

    let generator = match args.template.as_deref().or(config.template.as_deref()) {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(template = %path.display(), "Using custom template");
            Generator::from_template_file(path)?
        }
        None => {
            debug!("Using built-in Markdown template");
            Generator::new()?
        }
    };

    // Render fully before touching the output file
    let rendered = {
        let _render_timer = Timer::new("rendering");
        generator.render(&document)?
    };
    info!(bytes = rendered.len(), operations = document.operations.len(), "Rendered documentation");

    match &args.out {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output.success(&format!("✓ Wrote documentation to {}", path.display()))?;
        }
        None => output.write(&rendered)?,
    }

    Ok(())
}
