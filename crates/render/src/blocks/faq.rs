//! Frequently asked questions in three layouts.

use blockkit_core::BlockError;
use serde_json::Value;

use super::{first_list, item_str, section_header};
use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Definition-list layout component name.
pub const BASIC: &str = "FaqBasic";
/// Collapsible layout component name.
pub const ACCORDION: &str = "FaqAccordion";
/// Plain two-column layout component name.
pub const SIMPLE: &str = "FaqSimple";

/// Spellings of the question list, in priority order.
const LIST_KEYS: &[&str] = &["faqs", "items"];

/// Renders `faqs` (or `items`) as a definition list.
pub fn render_basic(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let items = first_list(props, BASIC, LIST_KEYS)?;
    let mut w = HtmlWriter::new();
    w.open_class("section", "faq faq--basic");
    section_header(&mut w, props, "faq");
    w.open_class("dl", "faq__list");
    for (question, answer) in pairs(items) {
        w.element("dt", "faq__question", Some(question));
        w.element("dd", "faq__answer", answer);
    }
    w.close("dl");
    w.close("section");
    Ok(w.finish())
}

/// Renders `faqs` (or `items`) as `<details>` elements; the first one starts open.
pub fn render_accordion(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let items = first_list(props, ACCORDION, LIST_KEYS)?;
    let mut w = HtmlWriter::new();
    w.open_class("section", "faq faq--accordion");
    section_header(&mut w, props, "faq");
    w.open_class("div", "faq__list");
    for (i, (question, answer)) in pairs(items).enumerate() {
        if i == 0 {
            w.open("details", &[("class", "faq__item"), ("open", "")]);
        } else {
            w.open_class("details", "faq__item");
        }
        w.element("summary", "faq__question", Some(question));
        w.element("p", "faq__answer", answer);
        w.close("details");
    }
    w.close("div");
    w.close("section");
    Ok(w.finish())
}

/// Renders `faqs` (or `items`) as headed paragraphs.
pub fn render_simple(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let items = first_list(props, SIMPLE, LIST_KEYS)?;
    let mut w = HtmlWriter::new();
    w.open_class("section", "faq faq--simple");
    section_header(&mut w, props, "faq");
    for (question, answer) in pairs(items) {
        w.open_class("div", "faq__item");
        w.element("h3", "faq__question", Some(question));
        w.element("p", "faq__answer", answer);
        w.close("div");
    }
    w.close("section");
    Ok(w.finish())
}

/// Question / answer pairs; items without a question are skipped.
///
/// The answer falls back to `description`.
fn pairs(items: &[Value]) -> impl Iterator<Item = (&str, Option<&str>)> {
    items.iter().filter_map(|item| {
        let answer = item_str(item, "answer").or_else(|| item_str(item, "description"));
        item_str(item, "question").map(|question| (question, answer))
    })
}
