//! Hyperdoc Core - documentation engine for JSON Hyper-Schema
//!
//! This crate turns a loaded hyper-schema into a [`Document`]: a tree of
//! dereferenced schemas plus one [`Operation`] per link, each carrying a
//! synthesized request and response example.
//!
//! # Main Components
//!
//! - **Resolver**: dereferences `$ref`s and flattens schemas ([`resolve`])
//! - **Synthesizer**: type-directed example values ([`synthesize`])
//! - **Builder**: assembles the [`Document`] ([`Builder`])
//! - **Renderer**: Tera templates over a [`Document`] ([`Generator`])
//!
//! # Example
//!
//! ```no_run
//! use hyperdoc_core::{Builder, Generator};
//! use hyperdoc_schemas::HyperSchemaLoader;
//! use std::path::Path;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let loaded = HyperSchemaLoader::new().load(Path::new("api.json"))?;
//!     let document = Builder::new().build_loaded(&loaded)?;
//!     println!("{}", Generator::new()?.render(&document)?);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod render;
pub mod resolve;
pub mod synthesize;

pub use builder::{build, Builder, BuilderConfig, StatusCodes};
pub use document::{reason_phrase, Document, Operation, Request, Response};
pub use error::{Error, Result};
pub use render::Generator;
pub use resolve::{ref_label, resolve, CyclePolicy, ResolvedItems, ResolvedSchema, Resolver};
pub use synthesize::{encode_example, synthesize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
