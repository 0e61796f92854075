//! Tests for content-type dispatch and per-platform rendering.
mod common;
use common::*;
use serde_json::{Value, json};
use skillgraph::prelude::*;
use skillgraph::render::RenderMethod;

fn render(
    platform: Option<&str>,
    messages: &[Message],
) -> std::result::Result<Value, ConversionError> {
    let registry = PlatformRegistry::default();
    let renderer = OutputRenderer::new(platform.and_then(|p| registry.get(p)));
    let refs: Vec<&Message> = messages.iter().collect();
    let rendered = renderer.render_walk(&refs)?;
    Ok(serde_json::to_value(&rendered.output).unwrap())
}

fn buttons_message(id: &str) -> Message {
    message(
        id,
        "button",
        json!({
            "text": "Pick one",
            "buttons": [
                { "title": "Red", "payload": "red", "type": "web_url" },
                { "title": "Blue", "payload": "blue" },
            ],
        }),
    )
}

#[test]
fn test_content_kind_dispatch_table() {
    let cases = [
        ("api", None),
        ("jump", None),
        ("delay", Some(RenderMethod::Pause)),
        ("button", Some(RenderMethod::Option)),
        ("quick_replies", Some(RenderMethod::Option)),
        ("image", Some(RenderMethod::Image)),
        ("generic", Some(RenderMethod::Image)),
        ("carousel", Some(RenderMethod::Image)),
        ("text", Some(RenderMethod::Text)),
        ("webhook", Some(RenderMethod::Text)),
    ];
    for (content_type, expected) in cases {
        assert_eq!(
            ContentKind::parse(content_type).method(),
            expected,
            "content type '{}'",
            content_type
        );
    }
    assert_eq!(
        ContentKind::parse("webhook"),
        ContentKind::Unsupported("webhook".to_string())
    );
}

#[test]
fn test_text_on_unsupported_platform_is_generic_only() {
    let registry = PlatformRegistry::default();
    assert!(!registry.supports("alexa"));

    let output = render(Some("alexa"), &[text_message("m", "hi")]).expect("Failed to render");

    assert_eq!(output, json!({ "generic": [{ "values": [{ "text": "hi" }] }] }));
}

#[test]
fn test_unknown_content_type_is_coerced_to_text_with_warning() {
    let renderer = OutputRenderer::new(None);
    let odd = message("m-odd", "unknown_type", json!({ "foo": "bar" }));

    let rendered = renderer.render_walk(&[&odd]).expect("Failed to render");

    assert_eq!(
        rendered.output.generic,
        Some(vec![json!({ "values": [{ "text": "{\"foo\":\"bar\"}" }] })])
    );
    assert_eq!(
        rendered.warnings,
        vec![ConversionWarning::UnsupportedContentType {
            message_id: "m-odd".to_string(),
            content_type: "unknown_type".to_string(),
        }]
    );
}

#[test]
fn test_unknown_content_type_uses_slack_text_shape() {
    let odd = message("m-odd", "weird", json!({ "foo": 1 }));

    let output = render(Some("slack"), &[odd]).expect("Failed to render");

    assert_eq!(
        output,
        json!({
            "slack": [{ "text": "{\"foo\":1}", "attachments": [] }],
            "generic": [{ "values": [{ "text": "{\"foo\":1}" }] }],
        })
    );
}

#[test]
fn test_unknown_content_type_uses_facebook_text_shape() {
    let odd = message("m-odd", "weird", json!({ "foo": 1 }));

    let output = render(Some("facebook"), &[odd]).expect("Failed to render");

    assert_eq!(
        output["facebook"],
        json!([{ "template_type": "generic", "elements": [{ "title": "{\"foo\":1}" }] }])
    );
}

#[test]
fn test_control_flow_messages_render_nothing() {
    let output = render(
        Some("slack"),
        &[
            message("m-api", "api", json!({ "url": "https://example.com" })),
            message("m-jump", "jump", json!({ "selectedResult": { "value": "x" } })),
        ],
    )
    .expect("Failed to render");

    assert_eq!(output, json!({ "slack": [], "generic": [] }));
}

#[test]
fn test_generic_option_from_buttons_and_quick_replies() {
    let quick = message(
        "m-quick",
        "quick_replies",
        json!({ "text": "Sure?", "quick_replies": [{ "title": "Yes", "payload": "yes" }] }),
    );

    let output = render(None, &[buttons_message("m-buttons"), quick]).expect("Failed to render");

    assert_eq!(
        output["generic"],
        json!([
            {
                "title": "Pick one",
                "options": [
                    { "label": "Red", "value": { "input": { "text": "red" } } },
                    { "label": "Blue", "value": { "input": { "text": "blue" } } },
                ],
            },
            {
                "title": "Sure?",
                "options": [{ "label": "Yes", "value": { "input": { "text": "yes" } } }],
            },
        ])
    );
}

#[test]
fn test_option_without_choices_is_malformed() {
    let broken = message("m-broken", "button", json!({ "text": "Pick one" }));

    let result = render(None, &[broken]);

    match result {
        Err(ConversionError::MalformedPayload { message_id, .. }) => {
            assert_eq!(message_id, "m-broken")
        }
        other => panic!("Expected MalformedPayload error, got {:?}", other),
    }
}

#[test]
fn test_facebook_wraps_text_and_buttons_in_templates() {
    let output = render(
        Some("facebook"),
        &[text_message("m-text", "Hello"), buttons_message("m-buttons")],
    )
    .expect("Failed to render");

    assert_eq!(
        output["facebook"],
        json!([
            { "template_type": "generic", "elements": [{ "title": "Hello" }] },
            {
                "template_type": "button",
                "text": "Pick one",
                "buttons": [
                    { "type": "web_url", "url": "red", "title": "Red", "webview_height_ratio": "full" },
                    { "type": "postback", "url": "blue", "title": "Blue", "webview_height_ratio": "full" },
                ],
            },
        ])
    );
    assert_eq!(output["generic"].as_array().unwrap().len(), 2);
}

#[test]
fn test_slack_text_carries_attachments() {
    let with_attachments = message(
        "m",
        "text",
        json!({ "text": "See below", "attachments": [{ "text": "details" }] }),
    );

    let output = render(Some("slack"), &[with_attachments]).expect("Failed to render");

    assert_eq!(
        output["slack"],
        json!([{ "text": "See below", "attachments": [{ "text": "details" }] }])
    );
}

#[test]
fn test_image_and_pause_fragments() {
    let card = message(
        "m-card",
        "generic",
        json!({
            "elements": [
                { "title": "First", "image_url": "https://example.com/1.png", "subtitle": "one" },
                { "title": "Second", "image_url": "https://example.com/2.png" },
            ],
        }),
    );
    let single = message(
        "m-image",
        "image",
        json!({ "title": "Solo", "image_url": "https://example.com/solo.png" }),
    );
    let delay = message("m-delay", "delay", json!({ "time": 1500 }));

    let output = render(None, &[card, single, delay]).expect("Failed to render");

    assert_eq!(
        output["generic"],
        json!([
            { "title": "First", "source": "https://example.com/1.png", "description": "one" },
            { "title": "Solo", "source": "https://example.com/solo.png", "description": "" },
            { "time": 1500, "typing": true },
        ])
    );
}

struct ShoutingPlatform;

impl PlatformRenderer for ShoutingPlatform {
    fn platform(&self) -> &str {
        "shout"
    }

    fn text(&self, message: &Message) -> std::result::Result<Value, ConversionError> {
        let text = message.payload["text"].as_str().unwrap_or_default();
        Ok(json!({ "text": text.to_uppercase() }))
    }
}

#[test]
fn test_custom_platform_overrides_only_what_it_defines() {
    let mut registry = PlatformRegistry::empty();
    registry.register(Box::new(ShoutingPlatform));
    let renderer = OutputRenderer::new(registry.get("shout"));
    let messages = [text_message("m", "quiet"), message("d", "delay", json!({}))];
    let refs: Vec<&Message> = messages.iter().collect();

    let rendered = renderer.render_walk(&refs).expect("Failed to render");
    let output = serde_json::to_value(&rendered.output).unwrap();

    assert_eq!(
        output["shout"],
        json!([{ "text": "QUIET" }, { "time": 0, "typing": true }])
    );
}

#[test]
fn test_platform_alias_routes_to_builtin_renderer() {
    let mut registry = PlatformRegistry::empty();
    assert!(registry.alias("messenger", "facebook"));
    assert!(!registry.alias("pager", "pager"));

    let renderer = OutputRenderer::new(registry.get("messenger"));
    assert_eq!(renderer.platform_name(), Some("facebook"));
}
