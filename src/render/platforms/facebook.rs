use super::PlatformRenderer;
use super::generic::{choices, first_element, str_field};
use crate::error::ConversionError;
use crate::project::Message;
use serde_json::{Value, json};

const TEMPLATE_GENERIC: &str = "generic";
const TEMPLATE_BUTTON: &str = "button";

pub struct FacebookPlatform;

impl PlatformRenderer for FacebookPlatform {
    fn platform(&self) -> &str {
        "facebook"
    }

    fn text(&self, message: &Message) -> Result<Value, ConversionError> {
        Ok(json!({
            "template_type": TEMPLATE_GENERIC,
            "elements": [{ "title": str_field(&message.payload, "text") }],
        }))
    }

    fn option(&self, message: &Message) -> Result<Value, ConversionError> {
        let buttons: Vec<Value> = choices(message)?
            .iter()
            .map(|choice| {
                let kind = match str_field(choice, "type") {
                    kind if kind.is_empty() => "postback".to_string(),
                    kind => kind,
                };
                json!({
                    "type": kind,
                    "url": str_field(choice, "payload"),
                    "title": str_field(choice, "title"),
                    "webview_height_ratio": "full",
                })
            })
            .collect();
        Ok(json!({
            "template_type": TEMPLATE_BUTTON,
            "text": str_field(&message.payload, "text"),
            "buttons": buttons,
        }))
    }

    fn image(&self, message: &Message) -> Result<Value, ConversionError> {
        let element = first_element(&message.payload);
        Ok(json!({
            "template_type": TEMPLATE_GENERIC,
            "elements": [{
                "title": str_field(element, "title"),
                "image_url": str_field(element, "image_url"),
                "subtitle": str_field(element, "subtitle"),
            }],
        }))
    }
}
