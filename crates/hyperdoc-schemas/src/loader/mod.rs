//! Hyper-schema loading and same-document dereferencing
//!
//! - YAML and JSON parsing with format detection
//! - JSON pointer lookup for `$ref` resolution within the root document
//! - Basic structural checks on the root
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use hyperdoc_schemas::loader::HyperSchemaLoader;
//! use std::path::Path;
//!
//! let loader = HyperSchemaLoader::new();
//! let doc = loader.load(Path::new("api.yaml"))?;
//! println!("{} links", doc.hyper_schema.links.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod hyper_loader;
pub mod parser;
pub mod pointer;

pub use error::{LoaderError, LoaderResult};
pub use hyper_loader::{HyperSchemaLoader, LoadedDocument};
pub use parser::{Format, SchemaParser};
