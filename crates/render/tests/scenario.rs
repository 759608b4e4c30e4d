use blockkit_core::normalize_article_blocks;
use blockkit_render::{
    BlockDescriptor, BlockError, BlockRegistry, BlockRenderer, ComponentRef, FallbackReason,
    MatchKind, RegistryConfig, RenderOptions, RenderOutcome, component_fn,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn named(name: &'static str) -> ComponentRef {
    component_fn(name, move |_| Ok(name.to_string()))
}

#[test]
fn registry_scenario() {
    let mut registry = BlockRegistry::new();
    registry.register("hero:01", named("HeroA"));
    registry.register("hero", named("HeroB"));
    registry.register("*", named("Fallback"));

    let cases = [
        (json!({"blockType": "hero", "blockName": "01"}), "HeroA", MatchKind::Exact),
        (json!({"blockType": "hero", "blockName": "99"}), "HeroB", MatchKind::Type),
        (json!({"blockType": "unknown"}), "Fallback", MatchKind::Fallback),
        (json!("plain text"), "Fallback", MatchKind::Fallback),
    ];
    for (value, component, kind) in cases {
        let result = registry.match_block(&BlockDescriptor::from_value(value));
        assert_eq!(result.kind, kind);
        assert_eq!(result.component.unwrap().name(), component);
    }

    registry.clear();
    let result = registry.match_block(&BlockDescriptor::typed("hero", Some("01")));
    assert_eq!(result.kind, MatchKind::None);
    assert!(result.component.is_none());
}

#[test]
fn one_failing_block_does_not_affect_siblings() {
    let mut registry = BlockRegistry::new();
    registry.register("text", named("Text"));
    registry.register(
        "bomb",
        component_fn("Bomb", |props| {
            Err(BlockError::render("Bomb", format!("exploded at {}", props.index())))
        }),
    );

    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let options = RenderOptions::new().on_block_error(move |_, block, index| {
        sink.lock().unwrap().push((index, block.block_type().map(str::to_string)));
    });

    let blocks: Vec<_> = (0..7)
        .map(|i| BlockDescriptor::typed(if i == 4 { "bomb" } else { "text" }, None))
        .collect();
    let outcomes = BlockRenderer::new(&registry).render_all(&blocks, &options);

    assert_eq!(outcomes.len(), 7);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.index(), i);
        assert_eq!(outcome.is_fallback(), i == 4);
    }
    assert_eq!(
        outcomes[4].reason(),
        Some(&FallbackReason::RenderFailed(
            "component `Bomb` failed to render: exploded at 4".to_string()
        ))
    );
    assert_eq!(*calls.lock().unwrap(), vec![(4, Some("bomb".to_string()))]);
}

#[test]
fn parallel_order_survives_uneven_latency() {
    let mut registry = BlockRegistry::new();
    registry.register(
        "slow",
        component_fn("Slow", |props| {
            let delay = props.number("delay").unwrap_or(0.0) as u64;
            thread::sleep(Duration::from_millis(delay));
            Ok(format!("#{}", props.index()))
        }),
    );

    let blocks: Vec<_> = (0..12)
        .map(|i| BlockDescriptor::from_value(json!({"blockType": "slow", "delay": (12 - i) * 3})))
        .collect();
    let outcomes = BlockRenderer::new(&registry).render_all_parallel(&blocks, &RenderOptions::new());

    let html: Vec<_> = outcomes.iter().map(RenderOutcome::html).collect();
    let expected: Vec<_> = (0..12).map(|i| format!("#{}", i)).collect();
    assert_eq!(html, expected);
}

#[test]
fn lazy_defaults_load_once_across_threads() {
    let registry = BlockRegistry::with_defaults();
    let renderer = BlockRenderer::new(&registry);
    let blocks: Vec<_> = (0..32)
        .map(|_| BlockDescriptor::from_value(json!({"blockType": "cta", "title": "Go"})))
        .collect();

    let outcomes = renderer.render_all_parallel(&blocks, &RenderOptions::new());
    assert!(outcomes.iter().all(RenderOutcome::is_rendered));
    assert!(registry.resolve(&blocks[0]).unwrap().is_ready());
}

#[test]
fn cms_article_renders_end_to_end() {
    let article = json!({
        "title": "Landing",
        "layout": [
            {"blockType": "hero", "blockName": "01", "title": "Prompts"},
            {"blockType": "feature", "componentName": "01", "features": [{"title": "Fast"}]},
            {"blockType": "pricing"},
            "<p>inline copy</p>",
        ],
    });
    let blocks = normalize_article_blocks(article.as_object().unwrap());
    assert_eq!(blocks.len(), 4);

    let registry = BlockRegistry::with_defaults();
    let outcomes = BlockRenderer::new(&registry).render_all(&blocks, &RenderOptions::new());

    assert!(outcomes[0].html().contains(r#"<h1 class="hero__title">Prompts</h1>"#));
    assert!(outcomes[1].html().contains("features--cards"));
    assert_eq!(outcomes[2].reason(), Some(&FallbackReason::Unmatched));
    assert_eq!(outcomes[3].reason(), Some(&FallbackReason::Unmatched));
    assert!(outcomes[3].html().contains("&lt;p&gt;inline copy&lt;/p&gt;"));
}

#[test]
fn config_aliases_apply_before_rendering() {
    let config = RegistryConfig::from_yaml_str(
        "debug: true\nfallbackMode: production\naliases:\n  - key: \"banner\"\n    target: \"hero:01\"\n",
    )
    .unwrap();
    let mut registry = BlockRegistry::with_defaults();
    assert_eq!(registry.apply_config(&config), 1);
    assert!(registry.is_debug());

    let options = RenderOptions::from_config(&config);
    let renderer = BlockRenderer::new(&registry);
    let outcomes = renderer.render_all(
        &[
            BlockDescriptor::from_value(json!({"blockType": "banner", "title": "Hi"})),
            BlockDescriptor::typed("nope", None),
        ],
        &options,
    );
    assert!(outcomes[0].html().contains("hero__title"));
    assert_eq!(
        outcomes[1].html(),
        r#"<div class="block-fallback" role="note" data-block-type="nope"></div>"#
    );
}

#[test]
fn hook_counts_each_failure_once() {
    let mut registry = BlockRegistry::new();
    registry.register("*", component_fn("Always", |_| panic!("no")));
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let options = RenderOptions::new().on_block_error(move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let blocks = vec![BlockDescriptor::text("a"), BlockDescriptor::typed("b", None)];
    let outcomes = BlockRenderer::new(&registry).render_all(&blocks, &options);
    assert!(outcomes.iter().all(RenderOutcome::is_fallback));
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
