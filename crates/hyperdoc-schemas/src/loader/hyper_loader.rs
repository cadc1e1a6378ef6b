//! Hyper-schema loader: file → raw root document → [`HyperSchema`]
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

use crate::hyper::HyperSchema;
use crate::loader::{
    error::{LoaderError, LoaderResult},
    parser::{Format, SchemaParser},
    pointer,
};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A loaded source document.
///
/// `root` is the resolution namespace for every `$ref` in `hyper_schema`.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub format: Format,
    pub root: Value,
    pub hyper_schema: HyperSchema,
}

impl LoadedDocument {
    /// Look up a sub-document of the root by JSON pointer (`/definitions/Pet`)
    pub fn select(&self, json_pointer: &str) -> LoaderResult<&Value> {
        let reference = format!("#{}", json_pointer);
        pointer::validate_json_pointer(&reference, json_pointer)?;
        pointer::apply_json_pointer(&self.root, json_pointer, &reference)
    }
}

/// Loads hyper-schema documents from JSON or YAML files
#[derive(Debug, Default)]
pub struct HyperSchemaLoader {
    parser: SchemaParser,
}

impl HyperSchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a hyper-schema from a file; the extension selects the format
    pub fn load(&self, path: &Path) -> LoaderResult<LoadedDocument> {
        let (root, format) = self.parser.parse_file(path)?;
        self.from_root(root, format, path)
    }

    /// Load a hyper-schema from in-memory content
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<LoadedDocument> {
        let path = Path::new("<memory>");
        let root = self.parser.parse_content(content, format, path)?;
        self.from_root(root, format, path)
    }

    fn from_root(&self, root: Value, format: Format, path: &Path) -> LoaderResult<LoadedDocument> {
        self.parser.validate_basic_structure(&root, path)?;

        let hyper_schema = HyperSchema::from_value(&root)?;

        Ok(LoadedDocument {
            path: path.to_path_buf(),
            format,
            root,
            hyper_schema,
        })
    }
}
