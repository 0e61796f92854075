//! Renders messages into the dialog node `output` object.

pub mod platforms;

use crate::dialog::{NodeOutput, PlatformOutput};
use crate::error::{ConversionError, ConversionWarning};
use crate::project::Message;
use platforms::{GenericPlatform, PlatformRenderer};
use serde_json::Value;
use tracing::warn;

/// The content types a message can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Api,
    Jump,
    Delay,
    Button,
    QuickReplies,
    Image,
    /// A single card.
    Generic,
    Carousel,
    Text,
    Unsupported(String),
}

impl ContentKind {
    pub fn parse(content_type: &str) -> Self {
        match content_type {
            "api" => ContentKind::Api,
            "jump" => ContentKind::Jump,
            "delay" => ContentKind::Delay,
            "button" => ContentKind::Button,
            "quick_replies" => ContentKind::QuickReplies,
            "image" => ContentKind::Image,
            "generic" => ContentKind::Generic,
            "carousel" => ContentKind::Carousel,
            "text" => ContentKind::Text,
            other => ContentKind::Unsupported(other.to_string()),
        }
    }

    /// The render method for this kind. `None` marks control-flow-only
    /// content that produces no fragment.
    pub fn method(&self) -> Option<RenderMethod> {
        match self {
            ContentKind::Api | ContentKind::Jump => None,
            ContentKind::Delay => Some(RenderMethod::Pause),
            ContentKind::Button | ContentKind::QuickReplies => Some(RenderMethod::Option),
            ContentKind::Image | ContentKind::Generic | ContentKind::Carousel => {
                Some(RenderMethod::Image)
            }
            ContentKind::Text | ContentKind::Unsupported(_) => Some(RenderMethod::Text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMethod {
    Text,
    Option,
    Image,
    Pause,
}

/// The fragments of a single message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedMessage {
    pub generic: Option<Value>,
    pub platform: Option<Value>,
    pub warning: Option<ConversionWarning>,
}

/// The combined output of a run of messages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedWalk {
    pub output: NodeOutput,
    pub warnings: Vec<ConversionWarning>,
}

/// Renders messages for one target platform.
pub struct OutputRenderer<'r> {
    platform: Option<&'r dyn PlatformRenderer>,
}

impl<'r> OutputRenderer<'r> {
    /// `platform` is the renderer of a supported platform, or `None` to render
    /// generic fragments only.
    pub fn new(platform: Option<&'r dyn PlatformRenderer>) -> Self {
        Self { platform }
    }

    pub fn platform_name(&self) -> Option<&str> {
        self.platform.map(|p| p.platform())
    }

    /// Renders one message. An unsupported content type falls back to the
    /// text rule of each renderer, applied to the stringified payload, and is
    /// reported in the returned warning.
    pub fn render_message(&self, message: &Message) -> Result<RenderedMessage, ConversionError> {
        let kind = ContentKind::parse(&message.message_type);
        let Some(method) = kind.method() else {
            return Ok(RenderedMessage::default());
        };

        let (warning, coerced) = match kind {
            ContentKind::Unsupported(content_type) => {
                let warning = ConversionWarning::UnsupportedContentType {
                    message_id: message.message_id.clone(),
                    content_type,
                };
                warn!("{}", warning);
                (Some(warning), Some(platforms::generic::coerce_to_text(message)))
            }
            _ => (None, None),
        };
        let message = coerced.as_ref().unwrap_or(message);

        let generic = dispatch(&GenericPlatform, method, message)?;
        let platform = self
            .platform
            .map(|renderer| dispatch(renderer, method, message))
            .transpose()?;
        Ok(RenderedMessage {
            generic: Some(generic),
            platform,
            warning,
        })
    }

    /// Renders every message of a walk and concatenates the fragments in
    /// traversal order.
    pub fn render_walk(&self, messages: &[&Message]) -> Result<RenderedWalk, ConversionError> {
        let mut generic = Vec::new();
        let mut platform = Vec::new();
        let mut warnings = Vec::new();

        for message in messages {
            let rendered = self.render_message(message)?;
            generic.extend(rendered.generic);
            platform.extend(rendered.platform);
            warnings.extend(rendered.warning);
        }

        let output = NodeOutput {
            platform: self.platform.map(|renderer| PlatformOutput {
                name: renderer.platform().to_string(),
                fragments: platform,
            }),
            generic: Some(generic),
            text: None,
        };
        Ok(RenderedWalk { output, warnings })
    }
}

fn dispatch(
    renderer: &dyn PlatformRenderer,
    method: RenderMethod,
    message: &Message,
) -> Result<Value, ConversionError> {
    match method {
        RenderMethod::Text => renderer.text(message),
        RenderMethod::Option => renderer.option(message),
        RenderMethod::Image => renderer.image(message),
        RenderMethod::Pause => renderer.pause(message),
    }
}
