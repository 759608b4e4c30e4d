//! Feature showcases: cards, grid, and the "why choose us" layout.

use blockkit_core::BlockError;

use super::{first_list, item_str, list, section_header};
use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Card layout component name.
pub const CARDS: &str = "FeaturesCards";
/// Grid layout component name.
pub const GRID: &str = "FeaturesGrid";
/// "Why choose us" component name.
pub const WHY_CHOOSE: &str = "WhyChoose";

/// Renders `features` (or `items`) as a row of cards.
pub fn render_cards(props: &BlockProps<'_>) -> Result<String, BlockError> {
    render_layout(props, CARDS, "features features--cards", "ul", "li")
}

/// Renders `features` (or `items`) as a grid.
pub fn render_grid(props: &BlockProps<'_>) -> Result<String, BlockError> {
    render_layout(props, GRID, "features features--grid", "div", "article")
}

/// Renders `features` as a numbered comparison list with a theme.
pub fn render_why_choose(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let features = list(props, WHY_CHOOSE, "features")?;
    let theme = match props.str("theme") {
        Some("dark") => "dark",
        _ => "light",
    };

    let mut w = HtmlWriter::new();
    w.open("section", &[("class", "why-choose"), ("data-theme", theme)]);
    section_header(&mut w, props, "why-choose");
    w.element("p", "why-choose__description", props.str("description"));
    w.open_class("ol", "why-choose__list");
    for (i, feature) in features.iter().enumerate() {
        w.open_class("li", "why-choose__item");
        w.open_class("span", "why-choose__number")
            .text(&format!("{:02}", i + 1))
            .close("span");
        w.element("h3", "why-choose__item-title", item_str(feature, "title"));
        w.element("p", "why-choose__item-description", item_str(feature, "description"));
        w.close("li");
    }
    w.close("ol");
    w.close("section");
    Ok(w.finish())
}

fn render_layout(
    props: &BlockProps<'_>,
    component: &str,
    class: &str,
    container: &str,
    item_tag: &str,
) -> Result<String, BlockError> {
    let features = first_list(props, component, &["features", "items"])?;

    let mut w = HtmlWriter::new();
    w.open_class("section", class);
    section_header(&mut w, props, "features");
    w.element("p", "features__description", props.str("description"));
    w.open_class(container, "features__items");
    for feature in features {
        match item_str(feature, "iconType") {
            Some(icon) => w.open(item_tag, &[("class", "features__item"), ("data-icon", icon)]),
            None => w.open_class(item_tag, "features__item"),
        };
        w.element("h3", "features__item-title", item_str(feature, "title"));
        w.element("p", "features__item-description", item_str(feature, "description"));
        w.close(item_tag);
    }
    w.close(container);
    w.close("section");
    Ok(w.finish())
}
