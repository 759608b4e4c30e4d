//! Hero section with a background image grid.

use blockkit_core::{BlockError, normalize_image_src};

use super::{item_str, list};
use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Component name.
pub const NAME: &str = "Hero";

/// Renders `title`, `subtitle`, a `cta` button and up to four `images`.
pub fn render(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let images = list(props, NAME, "images")?;
    let mut w = HtmlWriter::new();

    w.open_class("section", "hero");
    if !images.is_empty() {
        w.open_class("div", "hero__media");
        for image in images.iter().take(4) {
            let Some(src) = item_str(image, "src").and_then(normalize_image_src) else {
                continue;
            };
            let alt = item_str(image, "alt").unwrap_or_default();
            w.open("img", &[("src", src.as_str()), ("alt", alt), ("loading", "lazy")]);
        }
        w.close("div");
    }

    w.open_class("div", "hero__content");
    w.element("h1", "hero__title", props.str("title"));
    w.element("p", "hero__subtitle", props.str("subtitle"));
    if let Some(cta) = props.str("cta") {
        w.open("a", &[("class", "btn btn-lg"), ("href", "#get-started")])
            .text(cta)
            .close("a");
    }
    w.close("div");
    w.close("section");

    Ok(w.finish())
}
