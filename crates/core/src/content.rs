//! Text and image extraction from loosely-typed blocks.
//!
//! Used for article previews (cover images, summaries) and by components
//! that show prose from whichever field the CMS happened to fill in.

use lol_html::{RewriteStrSettings, element, rewrite_str};
use serde_json::Value;

use crate::descriptor::BlockDescriptor;

/// Keys checked for an image when scanning a block list.
const BLOCK_IMAGE_KEYS: &[&str] = &[
    "coverImage",
    "image",
    "media",
    "asset",
    "heroImage",
    "gallery",
    "thumbnail",
    "figure",
    "file",
];

/// Keys checked for an image on a single block.
const PRIMARY_IMAGE_KEYS: &[&str] = &["coverImage", "image", "media", "asset", "heroImage"];

/// Keys that may hold prose.
const TEXT_KEYS: &[&str] = &["content", "text", "body", "html", "richText"];

/// Returns a heading for the block: `heading`, `subheading`, `blockName`, then `title`.
pub fn block_heading(block: &BlockDescriptor) -> Option<&str> {
    let block = block.as_structured()?;
    ["heading", "subheading", "blockName", "title"]
        .iter()
        .find_map(|key| block.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()))
}

/// Collects the prose paragraphs of a block, trimmed and de-duplicated.
pub fn block_paragraphs(block: &BlockDescriptor) -> Vec<String> {
    let chunks = match block {
        BlockDescriptor::Text(text) => vec![text.clone()],
        BlockDescriptor::Structured(block) => TEXT_KEYS
            .iter()
            .filter_map(|key| block.get(key))
            .flat_map(gather_text_chunks)
            .collect(),
        BlockDescriptor::Malformed(_) => Vec::new(),
    };

    let mut seen = std::collections::HashSet::new();
    chunks
        .into_iter()
        .map(|chunk| chunk.trim().to_string())
        .filter(|chunk| !chunk.is_empty() && seen.insert(chunk.clone()))
        .collect()
}

/// Walks rich-text shaped JSON and returns its text chunks.
pub fn gather_text_chunks(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(gather_text_chunks).collect(),
        Value::Object(data) => {
            for key in ["html", "text", "content"] {
                if let Some(Value::String(s)) = data.get(key) {
                    return vec![s.clone()];
                }
            }
            if let Some(children @ Value::Array(_)) = data.get("children") {
                return gather_text_chunks(children);
            }
            for key in ["root", "value"] {
                if let Some(nested) = data.get(key).filter(|v| is_truthy(v)) {
                    return gather_text_chunks(nested);
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Returns the main image of a single block.
pub fn block_image(block: &BlockDescriptor) -> Option<String> {
    let block = block.as_structured()?;

    for key in PRIMARY_IMAGE_KEYS {
        match block.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Object(obj)) => {
                if let Some(url) = obj.get("url").and_then(Value::as_str) {
                    return Some(url.to_string());
                }
            }
            _ => {}
        }
    }

    let image_block = block
        .block_type()
        .is_some_and(|t| t.to_lowercase().contains("image"));
    if image_block {
        return block.get("url").and_then(Value::as_str).map(str::to_string);
    }
    None
}

/// Normalizes an image source.
///
/// Protocol-relative URLs gain `https:`; Next.js image optimizer URLs are
/// unwrapped to the original `url` query parameter.
pub fn normalize_image_src(src: &str) -> Option<String> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("//") {
        return Some(format!("https:{}", trimmed));
    }

    if trimmed.starts_with("/_next/image") {
        let Some((_, query)) = trimmed.split_once('?') else {
            return Some(trimmed.to_string());
        };
        let query = query.replace("&amp;", "&").replace("&AMP;", "&");
        let original = url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == "url")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
        if let Some(original) = original {
            return Some(original);
        }
    }

    Some(trimmed.to_string())
}

/// Returns the first `<img>` source in an HTML fragment.
pub fn extract_first_image_from_html(html: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    let mut found: Option<String> = None;
    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img", |el| {
                if found.is_none() {
                    found = el
                        .get_attribute("data-src")
                        .or_else(|| el.get_attribute("src"));
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );

    if let Err(err) = rewritten {
        log::debug!("could not scan HTML for images: {}", err);
        return None;
    }

    found.as_deref().and_then(normalize_image_src)
}

/// Returns the first image found in a block list, in document order.
///
/// Text blocks are scanned as inline HTML; structured blocks are checked for
/// image-like keys and then their nested `blocks` and `children`.
pub fn extract_image_from_blocks(blocks: &[BlockDescriptor]) -> Option<String> {
    for block in blocks {
        match block {
            BlockDescriptor::Text(text) => {
                if let Some(src) = extract_first_image_from_html(text) {
                    return Some(src);
                }
            }
            BlockDescriptor::Structured(structured) => {
                for key in BLOCK_IMAGE_KEYS {
                    let candidate = structured.get(key).and_then(url_like_value);
                    if let Some(src) = candidate.and_then(normalize_image_src) {
                        return Some(src);
                    }
                }
                for nested_key in ["blocks", "children"] {
                    if let Some(Value::Array(items)) = structured.get(nested_key) {
                        let nested: Vec<BlockDescriptor> = items
                            .iter()
                            .cloned()
                            .map(BlockDescriptor::from_value)
                            .collect();
                        if let Some(src) = extract_image_from_blocks(&nested) {
                            return Some(src);
                        }
                    }
                }
            }
            BlockDescriptor::Malformed(_) => {}
        }
    }
    None
}

fn url_like_value(candidate: &Value) -> Option<&str> {
    match candidate {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Object(record) => ["url", "src", "path"]
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
