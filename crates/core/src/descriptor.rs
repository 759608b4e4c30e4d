//! Block descriptors as they arrive from the CMS.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::key::BlockKey;

/// Field carrying the block category.
pub const BLOCK_TYPE_FIELD: &str = "blockType";
/// Field carrying the variant within the category.
pub const BLOCK_NAME_FIELD: &str = "blockName";

/// A single content unit from the CMS.
///
/// Descriptors are built from arbitrary JSON and never fail to parse: shapes
/// that are neither strings nor objects become [`BlockDescriptor::Malformed`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlockDescriptor {
    /// Opaque pre-rendered prose or markup.
    Text(String),
    /// A JSON object with optional `blockType`/`blockName` and free-form payload.
    Structured(StructuredBlock),
    /// Any other JSON shape (null, number, bool, array).
    Malformed(Value),
}

/// A structured block, kept verbatim as its JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredBlock {
    fields: Map<String, Value>,
}

impl StructuredBlock {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Creates a block with the given type and optional name and no payload.
    pub fn typed(block_type: &str, block_name: Option<&str>) -> Self {
        let mut fields = Map::new();
        fields.insert(BLOCK_TYPE_FIELD.to_string(), Value::from(block_type));
        if let Some(name) = block_name {
            fields.insert(BLOCK_NAME_FIELD.to_string(), Value::from(name));
        }
        Self { fields }
    }

    /// Block category, when present as a non-empty string.
    pub fn block_type(&self) -> Option<&str> {
        self.non_empty_str(BLOCK_TYPE_FIELD)
    }

    /// Variant name, when present as a non-empty string.
    pub fn block_name(&self) -> Option<&str> {
        self.non_empty_str(BLOCK_NAME_FIELD)
    }

    /// All fields, including `blockType` and `blockName`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Mutable access to the fields.
    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    /// Returns a single field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns true when the field exists, whatever its value.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    /// Unwraps into the JSON object.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    fn non_empty_str(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl BlockDescriptor {
    /// Builds a descriptor from any JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => BlockDescriptor::Text(text),
            Value::Object(fields) => BlockDescriptor::Structured(StructuredBlock::new(fields)),
            other => BlockDescriptor::Malformed(other),
        }
    }

    /// Creates an opaque text descriptor.
    pub fn text(text: impl Into<String>) -> Self {
        BlockDescriptor::Text(text.into())
    }

    /// Creates a structured descriptor with a type and optional name.
    pub fn typed(block_type: &str, block_name: Option<&str>) -> Self {
        BlockDescriptor::Structured(StructuredBlock::typed(block_type, block_name))
    }

    /// Builds the descriptor that a registry key would match most specifically.
    ///
    /// Used for aliasing one key onto whatever another key resolves to.
    pub fn for_key(key: &BlockKey) -> Self {
        match key {
            BlockKey::Exact {
                block_type,
                block_name,
            } => Self::typed(block_type, Some(block_name)),
            BlockKey::Type(block_type) => Self::typed(block_type, None),
            BlockKey::Fallback => BlockDescriptor::Structured(StructuredBlock::default()),
        }
    }

    /// Block category, if this is a structured block that carries one.
    pub fn block_type(&self) -> Option<&str> {
        match self {
            BlockDescriptor::Structured(block) => block.block_type(),
            _ => None,
        }
    }

    /// Variant name, if this is a structured block that carries one.
    pub fn block_name(&self) -> Option<&str> {
        match self {
            BlockDescriptor::Structured(block) => block.block_name(),
            _ => None,
        }
    }

    /// Returns the structured block, if any.
    pub fn as_structured(&self) -> Option<&StructuredBlock> {
        match self {
            BlockDescriptor::Structured(block) => Some(block),
            _ => None,
        }
    }

    /// Returns the opaque text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockDescriptor::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true for opaque text descriptors.
    pub fn is_text(&self) -> bool {
        matches!(self, BlockDescriptor::Text(_))
    }

    /// Converts back into the JSON value the descriptor was built from.
    pub fn to_value(&self) -> Value {
        match self {
            BlockDescriptor::Text(text) => Value::String(text.clone()),
            BlockDescriptor::Structured(block) => Value::Object(block.fields.clone()),
            BlockDescriptor::Malformed(value) => value.clone(),
        }
    }
}

impl From<Value> for BlockDescriptor {
    fn from(value: Value) -> Self {
        BlockDescriptor::from_value(value)
    }
}

impl From<&str> for BlockDescriptor {
    fn from(text: &str) -> Self {
        BlockDescriptor::text(text)
    }
}

impl Serialize for BlockDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockDescriptor::Text(text) => serializer.serialize_str(text),
            BlockDescriptor::Structured(block) => block.fields.serialize(serializer),
            BlockDescriptor::Malformed(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BlockDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(BlockDescriptor::from_value)
    }
}
