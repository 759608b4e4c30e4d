//! Contact details.

use blockkit_core::BlockError;

use super::section_header;
use crate::component::BlockProps;
use crate::html::HtmlWriter;

/// Component name.
pub const NAME: &str = "Contact";

/// Renders `email`, `phone` and `address` as links inside an `<address>`.
pub fn render(props: &BlockProps<'_>) -> Result<String, BlockError> {
    let mut w = HtmlWriter::new();
    w.open_class("section", "contact");
    section_header(&mut w, props, "contact");
    w.open_class("address", "contact__details");
    if let Some(email) = props.str("email") {
        let href = format!("mailto:{}", email);
        w.open("a", &[("class", "contact__email"), ("href", href.as_str())])
            .text(email)
            .close("a");
    }
    if let Some(phone) = props.str("phone") {
        let digits: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        let href = format!("tel:{}", digits);
        w.open("a", &[("class", "contact__phone"), ("href", href.as_str())])
            .text(phone)
            .close("a");
    }
    w.element("p", "contact__address", props.str("address"));
    w.close("address");
    w.close("section");
    Ok(w.finish())
}
