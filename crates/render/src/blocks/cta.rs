//! Call to action banner.

use blockkit_core::BlockError;

use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Component name.
pub const NAME: &str = "CallToAction";

/// Renders `title`, `subtitle` and a `buttonText` link to `buttonLink`.
pub fn render(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let mut w = HtmlWriter::new();
    w.open_class("section", "cta");
    w.element("h2", "cta__title", props.str("title"));
    w.element("p", "cta__subtitle", props.str("subtitle"));
    if let Some(text) = props.str("buttonText") {
        let href = props.str_or("buttonLink", "#");
        w.open("a", &[("class", "cta__button"), ("href", href)])
            .text(text)
            .close("a");
    }
    w.close("section");
    Ok(w.finish())
}
