//! Parsed JSON Schema nodes
//!
//! A [`Schema`] keeps the handful of keywords documentation needs and parks
//! everything else in [`Schema::extras`], where extension keys such as
//! `example` and `href` live.
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::pointer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Extension key holding an author-supplied example value
pub const EXAMPLE_KEY: &str = "example";

/// The primitive kinds a schema may declare in `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Null => "null",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Array => "array",
            PrimitiveType::Object => "object",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type set of a schema.
///
/// Accepts either a single type name or an array of names. Declaration order
/// is kept for display, duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TypesRepr", into = "Vec<PrimitiveType>")]
pub struct PrimitiveTypes(Vec<PrimitiveType>);

#[derive(Deserialize)]
#[serde(untagged)]
enum TypesRepr {
    One(PrimitiveType),
    Many(Vec<PrimitiveType>),
}

impl From<TypesRepr> for PrimitiveTypes {
    fn from(repr: TypesRepr) -> Self {
        match repr {
            TypesRepr::One(t) => Self(vec![t]),
            TypesRepr::Many(ts) => ts.into_iter().collect(),
        }
    }
}

impl From<PrimitiveTypes> for Vec<PrimitiveType> {
    fn from(types: PrimitiveTypes) -> Self {
        types.0
    }
}

impl FromIterator<PrimitiveType> for PrimitiveTypes {
    fn from_iter<I: IntoIterator<Item = PrimitiveType>>(iter: I) -> Self {
        let mut types = Self::default();
        for t in iter {
            types.insert(t);
        }
        types
    }
}

impl PrimitiveTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type unless it is already declared
    pub fn insert(&mut self, t: PrimitiveType) {
        if !self.contains(t) {
            self.0.push(t);
        }
    }

    pub fn contains(&self, t: PrimitiveType) -> bool {
        self.0.contains(&t)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = PrimitiveType> + '_ {
        self.0.iter().copied()
    }

    /// Join the type names with `sep`, e.g. `string|null`
    pub fn join(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(PrimitiveType::as_str)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Item specification of an array schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemsRepr", into = "ItemsRepr")]
pub struct ItemSpec {
    /// `true` when `items` was declared as an array of positional schemas
    pub tuple_mode: bool,
    pub schemas: Vec<Schema>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ItemsRepr {
    Tuple(Vec<Schema>),
    Single(Box<Schema>),
}

impl From<ItemsRepr> for ItemSpec {
    fn from(repr: ItemsRepr) -> Self {
        match repr {
            ItemsRepr::Tuple(schemas) => Self {
                tuple_mode: true,
                schemas,
            },
            ItemsRepr::Single(schema) => Self {
                tuple_mode: false,
                schemas: vec![*schema],
            },
        }
    }
}

impl From<ItemSpec> for ItemsRepr {
    fn from(spec: ItemSpec) -> Self {
        match (spec.tuple_mode, spec.schemas.into_iter().next()) {
            (false, Some(schema)) => ItemsRepr::Single(Box::new(schema)),
            (_, first) => ItemsRepr::Tuple(first.into_iter().collect()),
        }
    }
}

/// A parsed schema fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, alias = "$id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "PrimitiveTypes::is_empty")]
    pub types: PrimitiveTypes,

    /// Child schemas by name; a `null` entry is kept as an absent placeholder
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Option<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Schema {
    /// Extract a schema from a raw JSON value
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// The non-empty reference string, if this node is a `$ref`
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    /// The author-supplied example; an explicit `null` counts as absent
    pub fn example(&self) -> Option<&Value> {
        self.extras.get(EXAMPLE_KEY).filter(|v| !v.is_null())
    }

    /// A string-valued extension key
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(Value::as_str)
    }

    /// A human-readable identity for error messages
    pub fn identity(&self) -> &str {
        self.id
            .as_deref()
            .or_else(|| self.reference())
            .or(self.title.as_deref())
            .unwrap_or("<anonymous>")
    }

    /// Dereference this node against the root document.
    ///
    /// Nodes without a reference come back borrowed. Reference chains are
    /// followed until a node without `$ref` is reached; a chain that revisits
    /// one of its own references fails.
    pub fn dereference(&self, root: &Value) -> LoaderResult<Cow<'_, Schema>> {
        let mut current = Cow::Borrowed(self);
        let mut chain: Vec<String> = Vec::new();

        while let Some(reference) = current.reference().map(str::to_string) {
            if chain.contains(&reference) {
                chain.push(reference);
                return Err(LoaderError::circular_reference(&chain));
            }

            let target = pointer::lookup(root, &reference)?;
            if !target.is_object() {
                return Err(LoaderError::reference_error(
                    reference,
                    "Target is not a schema object",
                ));
            }

            let schema = Schema::from_value(target)
                .map_err(|e| LoaderError::invalid_schema(reference.clone(), e))?;
            chain.push(reference);
            current = Cow::Owned(schema);
        }

        Ok(current)
    }
}
