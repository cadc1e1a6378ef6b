//! Inspect command handler

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::instrument;

use super::utils::{build_document, load_schema};

/// Handle the inspect command
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("inspect_command", &args.schema.display().to_string());

    let loaded = load_schema(&args.schema)?;
    let document = build_document(&loaded, config)?;

    output.document(&document)
}
