//! Document builder
//!
//! Drives the resolver and the synthesizer over the root properties and
//! every link of a hyper-schema. The build is all-or-nothing: the first
//! failure aborts it and no partial [`Document`] is returned.

use crate::document::{
    collect_definitions, content_type_for, reason_phrase, Document, Operation, Request, Response,
};
use crate::error::{Error, Result};
use crate::resolve::{CyclePolicy, ResolvedSchema, Resolver};
use crate::synthesize::encode_example;
use hyperdoc_schemas::{HyperSchema, Link, LoadedDocument, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

/// Default response status per HTTP method.
///
/// Lookups are case-insensitive; unknown methods map to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCodes(BTreeMap<String, u16>);

impl Default for StatusCodes {
    fn default() -> Self {
        Self(
            [("GET", 200), ("POST", 201), ("PUT", 204), ("DELETE", 204)]
                .into_iter()
                .map(|(method, code)| (method.to_string(), code))
                .collect(),
        )
    }
}

impl StatusCodes {
    /// Add or replace the status of one method
    pub fn with_override(mut self, method: &str, status_code: u16) -> Self {
        self.0.insert(method.to_ascii_uppercase(), status_code);
        self
    }

    pub fn status_for(&self, method: &str) -> u16 {
        self.0
            .get(&method.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }
}

/// Builder settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub cycle_policy: CyclePolicy,
    pub status_codes: StatusCodes,
}

/// Builds [`Document`]s from hyper-schemas
#[derive(Debug, Clone, Default)]
pub struct Builder {
    config: BuilderConfig,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a document from a loaded source file
    pub fn build_loaded(&self, loaded: &LoadedDocument) -> Result<Document> {
        self.build(&loaded.hyper_schema, &loaded.root)
    }

    /// Build a document; `root` is the namespace every `$ref` resolves in
    pub fn build(&self, hyper_schema: &HyperSchema, root: &Value) -> Result<Document> {
        let start = Instant::now();
        let schema = &hyper_schema.schema;

        let href = hyper_schema.href().filter(|href| !href.is_empty());
        let url = href.map(base_url).transpose()?.flatten();

        let mut properties = BTreeMap::new();
        for (name, property) in &schema.properties {
            let Some(property) = property else { continue };
            properties.insert(name.clone(), self.resolve(property, root)?);
        }

        let operations = hyper_schema
            .links
            .iter()
            .map(|link| self.build_operation(link, root))
            .collect::<Result<Vec<_>>>()?;

        let definitions = collect_definitions(properties.values().chain(
            operations
                .iter()
                .flat_map(|op| op.schema.iter().chain(op.target_schema.iter())),
        ));

        info!(
            title = schema.title.as_deref().unwrap_or_default(),
            properties = properties.len(),
            operations = operations.len(),
            definitions = definitions.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built document"
        );

        Ok(Document {
            title: schema.title.clone(),
            description: schema.description.clone(),
            href: href.map(str::to_string),
            url,
            properties,
            required: schema.required.clone(),
            operations,
            definitions,
        })
    }

    fn resolve(&self, node: &Schema, root: &Value) -> Result<ResolvedSchema> {
        Resolver::with_policy(root, self.config.cycle_policy).resolve(node)
    }

    fn build_operation(&self, link: &Link, root: &Value) -> Result<Operation> {
        debug!(method = %link.method, href = %link.href, "Building operation");

        let schema = link
            .schema
            .as_ref()
            .map(|s| self.resolve(s, root))
            .transpose()?;
        let target_schema = link
            .target_schema
            .as_ref()
            .map(|s| self.resolve(s, root))
            .transpose()?;

        let request_body = body_for(schema.as_ref())?;
        let response_body = body_for(target_schema.as_ref())?;
        let status_code = self.config.status_codes.status_for(&link.method);

        Ok(Operation {
            method: link.method.clone(),
            href: link.href.clone(),
            rel: link.rel.clone(),
            title: link.title.clone(),
            media_type: link.media_type.clone(),
            enc_type: link.enc_type.clone(),
            description: link.description().to_string(),
            schema,
            target_schema,
            request: Request {
                content_type: content_type_for(&request_body),
                body: request_body,
            },
            response: Response {
                status_code,
                reason_phrase: reason_phrase(status_code).to_string(),
                content_type: content_type_for(&response_body),
                body: response_body,
            },
        })
    }
}

/// Parse the root `href`; a relative reference has no absolute base
fn base_url(href: &str) -> Result<Option<Url>> {
    match Url::parse(href) {
        Ok(url) => Ok(Some(url)),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            debug!(href = %href, "Base href is relative");
            Ok(None)
        }
        Err(source) => Err(Error::UrlParse {
            href: href.to_string(),
            source,
        }),
    }
}

fn body_for(schema: Option<&ResolvedSchema>) -> Result<String> {
    schema.map(encode_example).transpose().map(Option::unwrap_or_default)
}

/// Build a document with the default configuration
pub fn build(hyper_schema: &HyperSchema, root: &Value) -> Result<Document> {
    Builder::new().build(hyper_schema, root)
}
