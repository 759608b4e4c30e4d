//! Normalization of raw CMS documents into block descriptors.
//!
//! The renderer only understands `blockType` and `blockName`. Everything
//! CMS-specific (where the block list lives, the `componentName` spelling)
//! is handled here before descriptors reach the registry.

use serde_json::{Map, Value};

use crate::descriptor::{BLOCK_NAME_FIELD, BlockDescriptor};

/// Article fields that may hold the block list, in priority order.
pub const BLOCK_SOURCE_FIELDS: &[&str] = &["content", "sections", "layout", "blocks", "body"];

/// CMS spelling of the variant field.
pub const COMPONENT_NAME_FIELD: &str = "componentName";

/// Converts a raw block list into descriptors.
///
/// Falsy input yields nothing. A bare string is HTML body content rather than
/// a block list and also yields nothing. A single object becomes a one-block
/// list.
pub fn normalize_blocks(input: &Value) -> Vec<BlockDescriptor> {
    match input {
        Value::Null | Value::Bool(false) => Vec::new(),
        Value::Array(items) => items.iter().cloned().map(BlockDescriptor::from_value).collect(),
        Value::String(_) => Vec::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => Vec::new(),
        other => vec![BlockDescriptor::from_value(other.clone())],
    }
}

/// Returns the first present block source field of an article.
pub fn block_source(article: &Map<String, Value>) -> Option<&Value> {
    BLOCK_SOURCE_FIELDS
        .iter()
        .find_map(|field| article.get(*field).filter(|v| !v.is_null()))
}

/// Returns inline HTML body content of an article, if it has any.
pub fn html_content(article: &Map<String, Value>) -> Option<&str> {
    article
        .get("content")
        .and_then(Value::as_str)
        .or_else(|| article.get("body").and_then(Value::as_str))
}

/// Copies `componentName` onto `blockName` when the latter is missing.
///
/// Returns the descriptor unchanged when it already has a `blockName` field
/// (even an empty one) or carries no `componentName`.
pub fn apply_component_name(descriptor: BlockDescriptor) -> BlockDescriptor {
    match descriptor {
        BlockDescriptor::Structured(mut block)
            if !block.contains(BLOCK_NAME_FIELD) && block.contains(COMPONENT_NAME_FIELD) =>
        {
            if let Some(name) = block.get(COMPONENT_NAME_FIELD).cloned() {
                block.insert(BLOCK_NAME_FIELD, name);
            }
            BlockDescriptor::Structured(block)
        }
        other => other,
    }
}

/// Extracts render-ready descriptors from a raw article document.
pub fn normalize_article_blocks(article: &Map<String, Value>) -> Vec<BlockDescriptor> {
    let blocks = block_source(article)
        .map(normalize_blocks)
        .unwrap_or_default();
    log::debug!("normalized {} blocks from article", blocks.len());
    blocks.into_iter().map(apply_component_name).collect()
}
