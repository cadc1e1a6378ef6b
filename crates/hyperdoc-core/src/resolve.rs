//! Schema resolution
//!
//! Turns a raw [`Schema`] into a [`ResolvedSchema`]: the node is dereferenced
//! against the root document and its `properties` and `items` are resolved
//! eagerly, depth-first. Every occurrence of a reference is resolved on its
//! own; nothing is shared between occurrences.
//!
//! A reference that reappears on the current resolution path is handled by
//! the [`CyclePolicy`].

use crate::error::{Error, Result};
use hyperdoc_schemas::schema::EXAMPLE_KEY;
use hyperdoc_schemas::{PrimitiveType, PrimitiveTypes, Schema};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Pointer prefix stripped from references to build display labels
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// What to do when a reference is revisited on its own resolution path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Stop descending and keep a shallow node without properties or items
    #[default]
    Stub,
    /// Abort with [`Error::CyclicSchema`]
    Fail,
}

/// Resolved item schemas of an array node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItems {
    pub tuple_mode: bool,
    pub schemas: Vec<ResolvedSchema>,
}

/// A dereferenced, documentation-ready schema node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSchema {
    pub id: Option<String>,
    /// The node's own reference string, before dereferencing
    pub reference: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub types: PrimitiveTypes,
    pub required: Vec<String>,
    /// Author-supplied example, verbatim
    pub example: Option<Value>,
    /// `example` pre-serialized as compact JSON, empty when absent
    pub literal_example: String,
    /// Anchor-friendly label derived from `reference`
    pub ref_label: String,
    pub properties: BTreeMap<String, ResolvedSchema>,
    pub items: Option<ResolvedItems>,
    /// Set on nodes cut short by [`CyclePolicy::Stub`]
    pub recursive: bool,
    /// Remaining keywords of the dereferenced node (`format`, `enum`, ...)
    pub extras: Map<String, Value>,
}

impl ResolvedSchema {
    pub fn is_array(&self) -> bool {
        self.types.contains(PrimitiveType::Array)
    }

    pub fn is_object(&self) -> bool {
        self.types.contains(PrimitiveType::Object)
    }

    /// A human-readable identity for error messages
    pub fn identity(&self) -> &str {
        self.id
            .as_deref()
            .or(self.reference.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("<anonymous>")
    }

    /// Copy the scalar fields of `target`, leaving children empty
    fn shallow(source: &Schema, target: &Schema) -> Self {
        let reference = source.reference().map(str::to_string);
        let ref_label = reference.as_deref().map(ref_label).unwrap_or_default();
        let example = target.example().cloned();

        let mut extras = target.extras.clone();
        extras.remove(EXAMPLE_KEY);

        Self {
            id: target.id.clone(),
            reference,
            title: target.title.clone(),
            description: target.description.clone(),
            types: target.types.clone(),
            required: target.required.clone(),
            literal_example: example.as_ref().map(literal_example).unwrap_or_default(),
            example,
            ref_label,
            properties: BTreeMap::new(),
            items: None,
            recursive: false,
            extras,
        }
    }
}

/// Build the display label of a reference: `#/definitions/Widget` → `Widget`.
///
/// Percent-escapes in the fragment are decoded.
pub fn ref_label(reference: &str) -> String {
    let label = match reference.strip_prefix(DEFINITIONS_PREFIX) {
        Some(label) => label,
        None => reference.trim_start_matches('#').trim_start_matches('/'),
    };
    percent_decode_str(label).decode_utf8_lossy().into_owned()
}

/// Serialize an example for display; failures fall back to an empty string
fn literal_example(example: &Value) -> String {
    serde_json::to_string(example).unwrap_or_else(|e| {
        debug!(error = %e, "Dropping unserializable literal example");
        String::new()
    })
}

/// Resolves schema nodes against one root document
#[derive(Debug)]
pub struct Resolver<'a> {
    root: &'a Value,
    policy: CyclePolicy,
    /// References on the current resolution path
    stack: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self::with_policy(root, CyclePolicy::default())
    }

    pub fn with_policy(root: &'a Value, policy: CyclePolicy) -> Self {
        Self {
            root,
            policy,
            stack: Vec::new(),
        }
    }

    /// Resolve a node and everything below it
    pub fn resolve(&mut self, node: &Schema) -> Result<ResolvedSchema> {
        let reference = node.reference().map(str::to_string);

        if let Some(reference) = &reference {
            if let Some(start) = self.stack.iter().position(|r| r == reference) {
                return self.revisit(node, reference, start);
            }
            debug!(reference = %reference, depth = self.stack.len(), "Dereferencing schema");
        }

        let target = node
            .dereference(self.root)
            .map_err(|e| Error::resolution(reference.as_deref().unwrap_or("#"), e))?;

        if let Some(reference) = &reference {
            self.stack.push(reference.clone());
        }
        let resolved = self.resolve_children(node, &target);
        if reference.is_some() {
            self.stack.pop();
        }

        resolved
    }

    fn resolve_children(&mut self, source: &Schema, target: &Schema) -> Result<ResolvedSchema> {
        let mut dest = ResolvedSchema::shallow(source, target);

        if let Some(items) = &target.items {
            let schemas = items
                .schemas
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>>>()?;
            dest.items = Some(ResolvedItems {
                tuple_mode: items.tuple_mode,
                schemas,
            });
        }

        for (name, property) in &target.properties {
            let Some(property) = property else {
                trace!(property = %name, "Skipping null property");
                continue;
            };
            let resolved = self.resolve(property)?;
            dest.properties.insert(name.clone(), resolved);
        }

        Ok(dest)
    }

    fn revisit(&self, node: &Schema, reference: &str, start: usize) -> Result<ResolvedSchema> {
        let mut chain = self.stack[start..].to_vec();
        chain.push(reference.to_string());

        match self.policy {
            CyclePolicy::Fail => Err(Error::cyclic(&chain)),
            CyclePolicy::Stub => {
                debug!(chain = %chain.join(" -> "), "Stopping at recursive reference");
                let target = node
                    .dereference(self.root)
                    .map_err(|e| Error::resolution(reference, e))?;
                let mut stub = ResolvedSchema::shallow(node, &target);
                stub.recursive = true;
                Ok(stub)
            }
        }
    }
}

/// Resolve `node` against `root` with the default cycle policy
pub fn resolve(node: &Schema, root: &Value) -> Result<ResolvedSchema> {
    Resolver::new(root).resolve(node)
}
