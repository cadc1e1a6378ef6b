//! The documentation model handed to renderers

use crate::resolve::ResolvedSchema;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Host shown in rendered examples when the schema declares no base URL
pub const FALLBACK_HOST: &str = "example.com";

/// Content type of every synthesized body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Documentation for a whole hyper-schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Root `href` as written
    pub href: Option<String>,
    /// Base URL from the root `href`; `None` when absent or relative
    pub url: Option<Url>,
    /// Top-level properties by name
    pub properties: BTreeMap<String, ResolvedSchema>,
    /// Names of required top-level properties
    pub required: Vec<String>,
    /// One operation per link, in declaration order
    pub operations: Vec<Operation>,
    /// Every referenced schema by label, the targets of label links
    pub definitions: BTreeMap<String, ResolvedSchema>,
}

impl Document {
    /// Host of the base URL, or [`FALLBACK_HOST`]
    pub fn host(&self) -> &str {
        self.url
            .as_ref()
            .and_then(Url::host_str)
            .unwrap_or(FALLBACK_HOST)
    }
}

/// One documented link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub method: String,
    pub href: String,
    pub rel: String,
    pub title: Option<String>,
    pub media_type: Option<String>,
    pub enc_type: Option<String>,
    pub description: String,
    /// Resolved request body schema
    pub schema: Option<ResolvedSchema>,
    /// Resolved response body schema
    pub target_schema: Option<ResolvedSchema>,
    pub request: Request,
    pub response: Response,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Request {
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// 0 when the method has no default status
    pub status_code: u16,
    pub reason_phrase: String,
    pub content_type: String,
    pub body: String,
}

/// Gather every labelled schema reachable from `roots`.
///
/// A fully resolved occurrence replaces a recursive stub of the same label.
pub(crate) fn collect_definitions<'a>(
    roots: impl IntoIterator<Item = &'a ResolvedSchema>,
) -> BTreeMap<String, ResolvedSchema> {
    fn visit(schema: &ResolvedSchema, definitions: &mut BTreeMap<String, ResolvedSchema>) {
        if !schema.ref_label.is_empty() {
            let known = definitions
                .get(&schema.ref_label)
                .is_some_and(|existing| !existing.recursive || schema.recursive);
            if !known {
                definitions.insert(schema.ref_label.clone(), schema.clone());
            }
        }
        for child in schema.properties.values() {
            visit(child, definitions);
        }
        for item in schema.items.iter().flat_map(|items| &items.schemas) {
            visit(item, definitions);
        }
    }

    let mut definitions = BTreeMap::new();
    for schema in roots {
        visit(schema, &mut definitions);
    }
    definitions
}

/// Content type for a synthesized body: JSON when present, empty otherwise
pub(crate) fn content_type_for(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        JSON_CONTENT_TYPE.to_string()
    }
}

/// Canonical reason phrase of a status code; empty when unknown
pub fn reason_phrase(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}
