//! Customer testimonials.

use blockkit_core::{BlockError, normalize_image_src};
use serde_json::Value;

use super::{item_str, list, section_header};
use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Component name.
pub const MARQUEE: &str = "TestimonialsMarquee";

const DEFAULT_AVATAR: &str = "/images/default-avatar.png";

/// Renders `testimonials` as quote cards with name, role, avatar and rating.
pub fn render_marquee(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let testimonials = list(props, MARQUEE, "testimonials")?;

    let mut w = HtmlWriter::new();
    w.open_class("section", "testimonials");
    section_header(&mut w, props, "testimonials");
    w.open_class("div", "testimonials__track");
    for testimonial in testimonials {
        let Some(content) = item_str(testimonial, "content") else {
            continue;
        };
        let name = item_str(testimonial, "name").unwrap_or("Anonymous");
        let avatar = item_str(testimonial, "avatar")
            .or_else(|| item_str(testimonial, "image"))
            .and_then(normalize_image_src)
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        w.open_class("figure", "testimonials__card");
        w.open_class("blockquote", "testimonials__quote")
            .text(content)
            .close("blockquote");
        if let Some(stars) = rating(testimonial) {
            let label = format!("{} out of 5", stars);
            w.open("p", &[("class", "testimonials__rating"), ("aria-label", label.as_str())])
                .text(&"★".repeat(stars))
                .close("p");
        }
        w.open_class("figcaption", "testimonials__author");
        w.open("img", &[("src", avatar.as_str()), ("alt", name), ("loading", "lazy")]);
        w.element("span", "testimonials__name", Some(name));
        w.element("span", "testimonials__role", item_str(testimonial, "role"));
        w.close("figcaption");
        w.close("figure");
    }
    w.close("div");
    w.close("section");
    Ok(w.finish())
}

/// Whole-star rating clamped to 0..=5.
fn rating(testimonial: &Value) -> Option<usize> {
    let value = testimonial.get("rating")?.as_f64()?;
    Some(value.round().clamp(0.0, 5.0) as usize)
}
