//! Built-in block components.
//!
//! Every component treats all fields as optional. A list field that is
//! present but not a list is a render error.

pub mod contact;
pub mod cta;
pub mod faq;
pub mod features;
pub mod hero;
pub mod step;
pub mod testimonials;

use blockkit_core::BlockError;
use serde_json::Value;

use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Reads a list field, converting a shape error into a render error.
pub(crate) fn list<'a>(
    props: &BlockProps<'a>,
    component: &str,
    key: &str,
) -> Result<&'a [Value], BlockError> {
    props
        .list(key)
        .map_err(|message| BlockError::render(component, message))
}

/// Reads the first of several spellings of a list field that is set.
///
/// A `null` spelling counts as unset; none set reads as an empty list.
pub(crate) fn first_list<'a>(
    props: &BlockProps<'a>,
    component: &str,
    keys: &[&str],
) -> Result<&'a [Value], BlockError> {
    match keys
        .iter()
        .find(|key| props.get(key).is_some_and(|value| !value.is_null()))
    {
        Some(key) => list(props, component, key),
        None => Ok(&[]),
    }
}

/// Reads a non-empty string field of a list item.
pub(crate) fn item_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Writes the shared title / subtitle header of a section.
pub(crate) fn section_header(w: &mut HtmlWriter, props: &BlockProps<'_>, base: &str) {
    let title = props.str("title");
    let subtitle = props.str("subtitle");
    if title.is_none() && subtitle.is_none() {
        return;
    }
    w.open_class("header", &format!("{}__header", base));
    w.element("h2", &format!("{}__title", base), title);
    w.element("p", &format!("{}__subtitle", base), subtitle);
    w.close("header");
}
