//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use hyperdoc_core::{Builder, Document};
use hyperdoc_schemas::{HyperSchemaLoader, LoadedDocument};
use std::path::Path;
use tracing::debug;

/// Load a hyper-schema file
pub fn load_schema(path: &Path) -> Result<LoadedDocument> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let _timer = Timer::with_details("schema_loading", &path.display().to_string());
    let loaded = HyperSchemaLoader::new().load(path)?;
    debug!(
        format = ?loaded.format,
        links = loaded.hyper_schema.links.len(),
        "Schema loaded"
    );
    Ok(loaded)
}

/// Build the document of a loaded schema with the configured builder
pub fn build_document(loaded: &LoadedDocument, config: &Config) -> Result<Document> {
    let _timer = Timer::new("document_building");
    let builder = Builder::with_config(config.builder_config());
    Ok(builder.build_loaded(loaded)?)
}
