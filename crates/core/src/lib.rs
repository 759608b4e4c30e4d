#![deny(missing_docs)]
//! blockkit core: block descriptors, registry keys, errors, and CMS normalization.

/// Text and image extraction helpers.
pub mod content;
/// Block descriptor model.
pub mod descriptor;
/// Core error types.
pub mod error;
/// Registry key model.
pub mod key;
/// CMS document normalization.
pub mod normalize;

pub use content::{
    block_heading, block_image, block_paragraphs, extract_first_image_from_html,
    extract_image_from_blocks, normalize_image_src,
};
pub use descriptor::{BLOCK_NAME_FIELD, BLOCK_TYPE_FIELD, BlockDescriptor, StructuredBlock};
pub use error::{BlockError, ConfigError};
pub use key::{BlockKey, KeyTier, WILDCARD};
pub use normalize::{
    apply_component_name, block_source, html_content, normalize_article_blocks, normalize_blocks,
};
