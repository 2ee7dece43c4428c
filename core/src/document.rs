#![deny(missing_docs)]

//! # Document Model
//!
//! Typed view over a bundled API description. These structs act as an
//! intermediate deserialization layer on top of `serde_json::Value`:
//! anything the renderer dumps verbatim (schemas, examples, component bodies)
//! stays a `Value`, everything it reads field-by-field gets a struct.
//!
//! Key order is preserved everywhere (`IndexMap`, `serde_json/preserve_order`)
//! because the page lists routes, methods, status codes and media types in
//! document order.
//!
//! Parameters, request bodies and responses that are `$ref`s into
//! `components` are replaced by their definitions before the typed view is
//! built, so a malformed shared definition fails the same way an inline one
//! does.

use crate::error::{AppError, AppResult};
use crate::ref_utils::{extract_ref_name, local_component, ref_of, REF_KEY};
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Keys of a Path Item Object that are not operations.
const PATH_ITEM_FIELDS: &[&str] = &["summary", "description", "servers", "parameters", REF_KEY];

/// Upper bound on `$ref` hops when following component aliases.
const MAX_REF_HOPS: usize = 16;

/// The root of a bundled API description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    /// Title, version and description.
    pub info: Info,
    /// Routes in document order.
    #[serde(default)]
    pub paths: Paths,
    /// Reusable definitions grouped by category.
    #[serde(default)]
    pub components: Components,
}

impl Document {
    /// Builds the typed view from a bundled tree.
    pub fn from_value(mut value: Value) -> AppResult<Self> {
        let Some(root) = value.as_object_mut() else {
            return Err(AppError::Document(
                "document root must be a mapping".to_string(),
            ));
        };

        let components = match root.get("components") {
            Some(raw) => Components::deserialize(raw).map_err(document_error)?,
            None => Components::default(),
        };
        if let Some(Value::Object(paths)) = root.get_mut("paths") {
            for (route, item) in paths.iter_mut() {
                if !route.starts_with("x-") {
                    components.inline_path_item(item)?;
                }
            }
        }

        serde_json::from_value(value).map_err(document_error)
    }
}

fn document_error(e: serde_json::Error) -> AppError {
    AppError::Document(e.to_string())
}

/// The Info Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
    /// API title. Numbers are accepted and stringified.
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: String,
    /// API version. Unquoted YAML versions (`1.0`) arrive as numbers.
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub version: Option<String>,
    /// Markdown description.
    #[serde(default)]
    pub description: Option<String>,
}

/// The Paths Object: route template to Path Item, `x-` extensions dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paths {
    /// Path items keyed by route, in document order.
    pub items: IndexMap<String, PathItem>,
}

impl Paths {
    /// Returns true when no routes are declared.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut items = IndexMap::new();

        for (route, value) in raw {
            if route.starts_with("x-") {
                continue;
            }
            let item = serde_json::from_value::<PathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", route, e))
            })?;
            items.insert(route, item);
        }

        Ok(Self { items })
    }
}

/// A Path Item: shared parameters plus one operation per method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    /// Parameters shared by every operation on this route.
    pub parameters: Vec<Parameter>,
    /// Operations keyed by method, as written in the document.
    pub operations: IndexMap<String, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = PathItem::default();

        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse path parameters: {}", e))
                })?;
                continue;
            }
            if key.starts_with("x-") || PATH_ITEM_FIELDS.contains(&key.as_str()) {
                continue;
            }
            if !value.is_object() {
                continue;
            }
            let operation = serde_json::from_value::<Operation>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
            })?;
            item.operations.insert(key, operation);
        }

        Ok(item)
    }
}

/// An Operation Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Operation {
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Markdown description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unique operation identifier.
    #[serde(default, rename = "operationId")]
    pub operation_id: Option<String>,
    /// Grouping tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// A Parameter Object (OpenAPI 3 or Swagger 2 flavoured).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Location: path, query, header or cookie.
    #[serde(default, rename = "in")]
    pub location: String,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Markdown description.
    #[serde(default)]
    pub description: Option<String>,
    /// OpenAPI 3 schema.
    #[serde(default)]
    pub schema: Option<Value>,
    /// Swagger 2 flat `type`.
    #[serde(default, rename = "type")]
    pub legacy_type: Option<Value>,
}

impl Parameter {
    /// The displayed type: `schema.type` first, then the flat `type`, else "".
    pub fn resolved_type(&self) -> String {
        self.schema
            .as_ref()
            .and_then(|schema| schema.get("type"))
            .and_then(type_label)
            .or_else(|| self.legacy_type.as_ref().and_then(type_label))
            .unwrap_or_default()
    }

    /// Identity used when an operation overrides a path-level parameter.
    pub fn key(&self) -> (&str, &str) {
        (self.name.as_str(), self.location.as_str())
    }
}

/// The component name a schema links to: the last segment of its `$ref`,
/// pointer-decoded. `None` for inline schemas.
pub fn schema_ref_target(schema: &Value) -> Option<String> {
    ref_of(schema).map(extract_ref_name)
}

fn type_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let names: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!names.is_empty()).then(|| names.join(" | "))
        }
        _ => None,
    }
}

/// A Request Body Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Markdown description.
    #[serde(default)]
    pub description: Option<String>,
    /// Media type to payload description.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A Response Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Plain description shown next to the status code.
    #[serde(default)]
    pub description: Option<String>,
    /// Media type to payload description.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A Media Type Object. Schema and examples are kept raw for dumping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// Payload schema, possibly `{"$ref": ...}`.
    #[serde(default)]
    pub schema: Option<Value>,
    /// A single example payload.
    #[serde(default)]
    pub example: Option<Value>,
    /// Named example payloads.
    #[serde(default)]
    pub examples: Option<IndexMap<String, Value>>,
}

/// The Components Object: category to name to raw definition.
///
/// Entries whose value is not a mapping (`x-` extensions and the like) are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    /// Definitions grouped by category, in document order.
    pub categories: IndexMap<String, IndexMap<String, Value>>,
}

impl Components {
    /// Returns true when no category is declared.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Looks up `#/components/{category}/{name}`.
    pub fn lookup(&self, reference: &str) -> Option<&Value> {
        let (category, name) = local_component(reference)?;
        self.categories.get(&category)?.get(&name)
    }

    /// Follows `reference` (and any alias chain behind it) to the first
    /// definition that is not itself a reference.
    pub fn dereference<'a>(&'a self, reference: &'a str) -> AppResult<&'a Value> {
        let mut current = reference;
        for _ in 0..MAX_REF_HOPS {
            let target = self.lookup(current).ok_or_else(|| {
                AppError::Document(format!("unresolved reference '{}'", current))
            })?;
            match ref_of(target) {
                Some(next) => current = next,
                None => return Ok(target),
            }
        }
        Err(AppError::Document(format!(
            "reference chain starting at '{}' is too long",
            reference
        )))
    }

    /// Replaces `node` by its definition when it is a `$ref`.
    fn inline(&self, node: &mut Value) -> AppResult<()> {
        let Some(reference) = ref_of(node).map(str::to_owned) else {
            return Ok(());
        };
        *node = self.dereference(&reference)?.clone();
        Ok(())
    }

    fn inline_each(&self, list: &mut Value) -> AppResult<()> {
        if let Value::Array(items) = list {
            for item in items {
                self.inline(item)?;
            }
        }
        Ok(())
    }

    /// Inlines referenced parameters, request bodies and responses of one
    /// path item.
    fn inline_path_item(&self, item: &mut Value) -> AppResult<()> {
        let Value::Object(item) = item else {
            return Ok(());
        };
        for (key, value) in item.iter_mut() {
            if key == "parameters" {
                self.inline_each(value)?;
            } else if !key.starts_with("x-") && !PATH_ITEM_FIELDS.contains(&key.as_str()) {
                if let Value::Object(operation) = value {
                    self.inline_operation(operation)?;
                }
            }
        }
        Ok(())
    }

    fn inline_operation(&self, operation: &mut Map<String, Value>) -> AppResult<()> {
        if let Some(parameters) = operation.get_mut("parameters") {
            self.inline_each(parameters)?;
        }
        if let Some(body) = operation.get_mut("requestBody") {
            self.inline(body)?;
        }
        if let Some(Value::Object(responses)) = operation.get_mut("responses") {
            for response in responses.values_mut() {
                self.inline(response)?;
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Components {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let categories = raw
            .into_iter()
            .filter_map(|(category, value)| match value {
                Value::Object(map) => Some((category, map.into_iter().collect())),
                _ => None,
            })
            .collect();
        Ok(Self { categories })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_scalar_string(deserializer)?.unwrap_or_default())
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| scalar_to_string(&v)))
}
