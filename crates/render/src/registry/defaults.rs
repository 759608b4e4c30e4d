//! Built-in component table.

use blockkit_core::BlockError;
use std::sync::Arc;

use crate::blocks::{contact, cta, faq, features, hero, step, testimonials};
use crate::component::{BlockProps, ComponentRef, component_fn};
use crate::lazy::LazyComponent;

type RenderFn = fn(&BlockProps<'_>) -> Result<String, BlockError>;

fn lazy(name: &'static str, render: RenderFn) -> ComponentRef {
    LazyComponent::shared(name, move || Ok(component_fn(name, render)))
}

/// Returns the built-in `key → component` pairs.
///
/// Every CMS spelling of a block shares one lazily constructed component.
/// There is no wildcard entry. The singular `feature` spellings come from
/// the default aliases instead.
pub fn default_components() -> Vec<(&'static str, ComponentRef)> {
    let hero = lazy(hero::NAME, hero::render);
    let features_cards = lazy(features::CARDS, features::render_cards);
    let features_grid = lazy(features::GRID, features::render_grid);
    let why_choose = lazy(features::WHY_CHOOSE, features::render_why_choose);
    let faq_basic = lazy(faq::BASIC, faq::render_basic);
    let faq_accordion = lazy(faq::ACCORDION, faq::render_accordion);
    let faq_simple = lazy(faq::SIMPLE, faq::render_simple);
    let marquee = lazy(testimonials::MARQUEE, testimonials::render_marquee);
    let steps = lazy(step::HOW_IT_WORKS, step::render);
    let steps_v2 = lazy(step::HOW_IT_WORKS_V2, step::render_v2);
    let call_to_action = lazy(cta::NAME, cta::render);
    let contact = lazy(contact::NAME, contact::render);

    vec![
        ("hero:01", Arc::clone(&hero)),
        ("hero", hero),
        ("features:cards", Arc::clone(&features_cards)),
        ("features:grid", features_grid),
        ("features:why-choose", why_choose),
        ("features", features_cards),
        ("faq:accordion", Arc::clone(&faq_accordion)),
        ("faq:simple", Arc::clone(&faq_simple)),
        ("faq:minimal", faq_simple),
        ("faq", faq_accordion),
        ("faq:01", faq_basic),
        ("testimonials:marquee", Arc::clone(&marquee)),
        ("testimonials", Arc::clone(&marquee)),
        ("testimonial:01", Arc::clone(&marquee)),
        ("testimonial", marquee),
        ("step:how-it-works", Arc::clone(&steps)),
        ("step:how-it-works-v2", Arc::clone(&steps_v2)),
        ("step", Arc::clone(&steps)),
        ("step:01", steps),
        ("step:02", steps_v2),
        ("cta:default", Arc::clone(&call_to_action)),
        ("cta", Arc::clone(&call_to_action)),
        ("call-to-action:01", Arc::clone(&call_to_action)),
        ("call-to-action", call_to_action),
        ("contact:default", Arc::clone(&contact)),
        ("contact", contact),
    ]
}
