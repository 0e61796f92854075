use super::PlatformRenderer;
use super::generic::{choices, first_element, str_field};
use crate::error::ConversionError;
use crate::project::Message;
use serde_json::{Value, json};

pub struct SlackPlatform;

impl PlatformRenderer for SlackPlatform {
    fn platform(&self) -> &str {
        "slack"
    }

    fn text(&self, message: &Message) -> Result<Value, ConversionError> {
        let attachments = message
            .payload
            .get("attachments")
            .cloned()
            .unwrap_or_else(|| json!([]));
        Ok(json!({
            "text": str_field(&message.payload, "text"),
            "attachments": attachments,
        }))
    }

    fn option(&self, message: &Message) -> Result<Value, ConversionError> {
        let text = str_field(&message.payload, "text");
        let actions: Vec<Value> = choices(message)?
            .iter()
            .map(|choice| {
                json!({
                    "name": str_field(choice, "title"),
                    "text": str_field(choice, "title"),
                    "type": "button",
                    "value": str_field(choice, "payload"),
                })
            })
            .collect();
        Ok(json!({
            "text": text,
            "attachments": [{
                "fallback": text,
                "callback_id": message.message_id,
                "actions": actions,
            }],
        }))
    }

    fn image(&self, message: &Message) -> Result<Value, ConversionError> {
        let element = first_element(&message.payload);
        Ok(json!({
            "text": str_field(&message.payload, "text"),
            "attachments": [{
                "title": str_field(element, "title"),
                "image_url": str_field(element, "image_url"),
            }],
        }))
    }
}
