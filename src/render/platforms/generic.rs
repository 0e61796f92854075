use super::PlatformRenderer;
use crate::error::ConversionError;
use crate::project::Message;
use serde_json::{Value, json};

/// The platform-neutral renderer. It is also the fallback for any platform
/// without a dedicated implementation.
pub struct GenericPlatform;

impl PlatformRenderer for GenericPlatform {
    fn platform(&self) -> &str {
        "generic"
    }
}

pub fn text(message: &Message) -> Result<Value, ConversionError> {
    Ok(json!({ "values": [{ "text": str_field(&message.payload, "text") }] }))
}

/// A text message carrying the stringified payload of `message`. Content
/// types nothing else knows how to render are rendered through this copy.
pub fn coerce_to_text(message: &Message) -> Message {
    Message {
        message_type: "text".to_string(),
        payload: json!({ "text": message.payload.to_string() }),
        ..message.clone()
    }
}

pub fn option(message: &Message) -> Result<Value, ConversionError> {
    let options: Vec<Value> = choices(message)?
        .iter()
        .map(|choice| {
            json!({
                "label": str_field(choice, "title"),
                "value": { "input": { "text": str_field(choice, "payload") } },
            })
        })
        .collect();
    Ok(json!({
        "title": str_field(&message.payload, "text"),
        "options": options,
    }))
}

pub fn image(message: &Message) -> Result<Value, ConversionError> {
    let element = first_element(&message.payload);
    Ok(json!({
        "title": str_field(element, "title"),
        "source": str_field(element, "image_url"),
        "description": str_field(element, "subtitle"),
    }))
}

pub fn pause(message: &Message) -> Result<Value, ConversionError> {
    let time = message
        .payload
        .get("time")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    Ok(json!({ "time": time, "typing": true }))
}

/// The button list of an option message: `buttons` if present, otherwise
/// `quick_replies`. A message with neither is malformed.
pub(crate) fn choices(message: &Message) -> Result<&Vec<Value>, ConversionError> {
    ["buttons", "quick_replies"]
        .iter()
        .find_map(|key| message.payload.get(*key).and_then(Value::as_array))
        .ok_or_else(|| ConversionError::MalformedPayload {
            message_id: message.message_id.clone(),
            reason: format!(
                "'{}' message has neither 'buttons' nor 'quick_replies'",
                message.message_type
            ),
        })
}

/// The first card of a carousel, or the payload itself for a single image.
pub(crate) fn first_element(payload: &Value) -> &Value {
    payload
        .get("elements")
        .and_then(Value::as_array)
        .and_then(|elements| elements.first())
        .unwrap_or(payload)
}

/// Reads a field as a string. Non-string scalars are stringified; missing
/// fields become an empty string.
pub(crate) fn str_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
