//! Hyper-schema root and link descriptions
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root-level extension key holding the API base URL
pub const HREF_KEY: &str = "href";

/// Link-level extension key holding a human description
pub const DESCRIPTION_KEY: &str = "description";

fn default_method() -> String {
    "GET".to_string()
}

/// One hypermedia link of a hyper-schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// URI template of the target resource
    #[serde(default)]
    pub href: String,

    /// Link relation
    #[serde(default)]
    pub rel: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP method; Hyper-Schema defaults it to `GET`
    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enc_type: Option<String>,

    /// Request body schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    /// Response body schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_schema: Option<Schema>,

    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Link {
    /// The `description` extension, or an empty string
    pub fn description(&self) -> &str {
        self.extras
            .get(DESCRIPTION_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// A hyper-schema: the root schema plus its declared links in order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HyperSchema {
    #[serde(flatten)]
    pub schema: Schema,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl HyperSchema {
    /// Extract a hyper-schema from the raw root document
    pub fn from_value(root: &Value) -> LoaderResult<Self> {
        let mut schema =
            Schema::from_value(root).map_err(|e| LoaderError::invalid_schema("#", e))?;

        let links = match schema.extras.remove("links") {
            Some(Value::Null) | None => Vec::new(),
            Some(raw) => serde_json::from_value::<Vec<Link>>(raw)
                .map_err(|e| LoaderError::invalid_schema("#/links", e))?,
        };

        Ok(Self { schema, links })
    }

    /// The root-level `href` extension, if any
    pub fn href(&self) -> Option<&str> {
        self.schema.extra_str(HREF_KEY)
    }
}
