//! Diagnostic rendering for unmatched and failed blocks.

use blockkit_core::{BlockDescriptor, BlockError};
use std::sync::Arc;

use crate::component::{BlockComponent, BlockProps, ComponentRef};
use crate::html::HtmlWriter;
use crate::registry::FallbackMode;

/// Emitted when the fallback component itself fails.
pub const MINIMAL_FALLBACK: &str = r#"<div class="block-fallback" role="note"></div>"#;

/// Shown in place of a block whose component has not finished loading.
pub const LOADING_PLACEHOLDER: &str =
    r#"<div class="block-loading" aria-busy="true"><div class="block-loading__spinner"></div></div>"#;

/// The fallback used when the caller does not supply one.
///
/// Opaque text is shown as escaped prose in every mode. For other blocks,
/// development mode shows an "Unmatched block" marker, the `blockType` /
/// `blockName` that were present and the raw descriptor as pretty JSON;
/// production mode shows only an empty marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFallback {
    mode: FallbackMode,
}

impl DefaultFallback {
    /// Component name.
    pub const NAME: &'static str = "DefaultFallback";

    /// Creates the fallback for the given mode.
    pub fn new(mode: FallbackMode) -> Self {
        Self { mode }
    }

    /// Creates the fallback wrapped in a shared handle.
    pub fn shared(mode: FallbackMode) -> ComponentRef {
        Arc::new(Self::new(mode))
    }

    /// Rendering mode.
    pub fn mode(&self) -> FallbackMode {
        self.mode
    }

    fn render_development(&self, block: &BlockDescriptor) -> Result<String, BlockError> {
        let raw = serde_json::to_string_pretty(block)
            .map_err(|e| BlockError::render(Self::NAME, e.to_string()))?;

        let mut w = HtmlWriter::new();
        w.open("div", &[("class", "block-fallback"), ("role", "note")]);
        w.element("p", "block-fallback__title", Some("Unmatched block"));
        for (label, value) in [("blockType", block.block_type()), ("blockName", block.block_name())] {
            if let Some(value) = value {
                w.open_class("p", "block-fallback__field")
                    .raw("<strong>")
                    .text(label)
                    .raw(":</strong> ")
                    .text(value)
                    .close("p");
            }
        }
        w.open_class("details", "block-fallback__raw");
        w.raw("<summary>Raw block</summary>");
        w.raw("<pre>").text(&raw).raw("</pre>");
        w.close("details");
        w.close("div");
        Ok(w.finish())
    }

    fn render_production(&self, block: &BlockDescriptor) -> String {
        let mut attrs = vec![("class", "block-fallback"), ("role", "note")];
        if let Some(block_type) = block.block_type() {
            attrs.push(("data-block-type", block_type));
        }
        let mut w = HtmlWriter::new();
        w.open("div", &attrs).close("div");
        w.finish()
    }
}

impl BlockComponent for DefaultFallback {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, props: &BlockProps<'_>) -> Result<String, BlockError> {
        let block = props.block();
        if let Some(text) = block.as_text() {
            let mut w = HtmlWriter::new();
            w.open_class("div", "block-fallback block-fallback--text")
                .element("p", "block-fallback__text", Some(text))
                .close("div");
            return Ok(w.finish());
        }
        match self.mode {
            FallbackMode::Development => self.render_development(block),
            FallbackMode::Production => Ok(self.render_production(block)),
        }
    }
}
