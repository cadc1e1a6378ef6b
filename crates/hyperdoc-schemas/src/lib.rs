//! Hyperdoc Schemas - JSON Hyper-Schema model and loading
//!
//! This crate provides the schema representation the documentation engine
//! works on:
//! - **Schema**: a parsed schema node (types, properties, items, extensions)
//! - **HyperSchema**: the root schema with its ordered list of links
//! - **Loader**: JSON/YAML file loading and `$ref` dereferencing against the
//!   root document
//!
//! ## Quick Start
//!
//! ```rust
//! use hyperdoc_schemas::{HyperSchema, Schema};
//! use serde_json::json;
//!
//! let root = json!({
//!     "title": "Pets API",
//!     "definitions": {"Pet": {"type": "object"}},
//!     "links": [{"href": "/pets", "targetSchema": {"$ref": "#/definitions/Pet"}}]
//! });
//!
//! let hs = HyperSchema::from_value(&root).unwrap();
//! let target = hs.links[0].target_schema.as_ref().unwrap();
//! let pet = target.dereference(&root).unwrap();
//! assert!(pet.types.contains(hyperdoc_schemas::PrimitiveType::Object));
//! ```
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

pub mod hyper;
pub mod loader;
pub mod schema;

pub use hyper::{HyperSchema, Link};
pub use loader::{Format, HyperSchemaLoader, LoadedDocument, LoaderError, LoaderResult};
pub use schema::{ItemSpec, PrimitiveType, PrimitiveTypes, Schema};
