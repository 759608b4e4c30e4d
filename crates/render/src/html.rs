//! Minimal HTML buffer used by built-in components and the fallback.

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

/// Append-only HTML buffer with escaping helpers.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    buf: String,
}

impl HtmlWriter {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(512),
        }
    }

    /// Writes markup without escaping.
    pub fn raw(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Writes text content with HTML escaping.
    pub fn text(&mut self, s: &str) -> &mut Self {
        encode_text_to_string(s, &mut self.buf);
        self
    }

    /// Opens a tag with attributes. Attributes with empty values are written
    /// as bare boolean attributes.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            if !value.is_empty() {
                self.buf.push_str("=\"");
                encode_double_quoted_attribute_to_string(value, &mut self.buf);
                self.buf.push('"');
            }
        }
        self.buf.push('>');
        self
    }

    /// Opens a tag with only a class attribute.
    pub fn open_class(&mut self, tag: &str, class: &str) -> &mut Self {
        self.open(tag, &[("class", class)])
    }

    /// Closes a tag.
    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Writes `<tag class="...">text</tag>`, or nothing when `text` is absent.
    pub fn element(&mut self, tag: &str, class: &str, text: Option<&str>) -> &mut Self {
        if let Some(text) = text {
            self.open_class(tag, class).text(text).close(tag);
        }
        self
    }

    /// Returns the accumulated HTML.
    pub fn finish(self) -> String {
        self.buf
    }
}
