//! "How it works" step sequences.

use blockkit_core::BlockError;

use super::{item_str, list, section_header};
use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Numbered layout component name.
pub const HOW_IT_WORKS: &str = "HowItWorks";
/// Icon layout component name.
pub const HOW_IT_WORKS_V2: &str = "HowItWorksV2";

/// Renders `steps` as a numbered list.
pub fn render(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let steps = list(props, HOW_IT_WORKS, "steps")?;
    let mut w = HtmlWriter::new();
    w.open_class("section", "steps");
    section_header(&mut w, props, "steps");
    w.open_class("ol", "steps__list");
    for (i, step) in steps.iter().enumerate() {
        w.open_class("li", "steps__item");
        w.open_class("span", "steps__number")
            .text(&(i + 1).to_string())
            .close("span");
        w.element("h3", "steps__title", item_str(step, "title"));
        w.element("p", "steps__description", item_str(step, "description"));
        w.close("li");
    }
    w.close("ol");
    w.close("section");
    Ok(w.finish())
}

/// Renders `steps` as cards labelled with their `icon`.
pub fn render_v2(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let steps = list(props, HOW_IT_WORKS_V2, "steps")?;
    let mut w = HtmlWriter::new();
    w.open_class("section", "steps steps--v2");
    section_header(&mut w, props, "steps");
    w.open_class("ol", "steps__list");
    for step in steps {
        let icon = item_str(step, "icon").unwrap_or("circle");
        w.open("li", &[("class", "steps__item"), ("data-icon", icon)]);
        w.element("h3", "steps__title", item_str(step, "title"));
        w.element("p", "steps__description", item_str(step, "description"));
        w.close("li");
    }
    w.close("ol");
    w.close("section");
    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockkit_core::BlockDescriptor;
    use serde_json::json;

    #[test]
    fn test_numbered_steps() {
        let block = BlockDescriptor::from_value(json!({
            "steps": [{"title": "Sign up"}, {"title": "Create", "description": "Your first prompt"}],
        }));
        let html = render(&BlockProps::new(&block, 0)).unwrap();
        insta::assert_snapshot!(html, @r#"<section class="steps"><ol class="steps__list"><li class="steps__item"><span class="steps__number">1</span><h3 class="steps__title">Sign up</h3></li><li class="steps__item"><span class="steps__number">2</span><h3 class="steps__title">Create</h3><p class="steps__description">Your first prompt</p></li></ol></section>"#);
    }

    #[test]
    fn test_v2_default_icon() {
        let block = BlockDescriptor::from_value(json!({"steps": [{"title": "Go"}]}));
        let html = render_v2(&BlockProps::new(&block, 0)).unwrap();
        assert!(html.contains(r#"<li class="steps__item" data-icon="circle">"#));
    }
}
