use crate::error::ConversionError;
use crate::project::Message;
use ahash::AHashMap;
use serde_json::Value;

pub mod facebook;
pub mod generic;
pub mod slack;

pub use facebook::FacebookPlatform;
pub use generic::GenericPlatform;
pub use slack::SlackPlatform;

/// Renders messages into one platform's response fragments.
///
/// Every method defaults to the platform-neutral rendering, so an
/// implementation only overrides what its platform does differently.
pub trait PlatformRenderer: Send + Sync {
    /// The platform id, also used as the key of the rendered fragments.
    fn platform(&self) -> &str;

    fn text(&self, message: &Message) -> Result<Value, ConversionError> {
        generic::text(message)
    }

    fn option(&self, message: &Message) -> Result<Value, ConversionError> {
        generic::option(message)
    }

    fn image(&self, message: &Message) -> Result<Value, ConversionError> {
        generic::image(message)
    }

    fn pause(&self, message: &Message) -> Result<Value, ConversionError> {
        generic::pause(message)
    }
}

/// Platform id → renderer. Platforms missing from the registry only receive
/// generic output.
pub struct PlatformRegistry {
    renderers: AHashMap<String, Box<dyn PlatformRenderer>>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        let mut renderers = AHashMap::new();
        register_default_platforms(&mut renderers);
        Self { renderers }
    }
}

impl PlatformRegistry {
    /// An empty registry: every platform gets generic output only.
    pub fn empty() -> Self {
        Self {
            renderers: AHashMap::new(),
        }
    }

    pub fn register(&mut self, renderer: Box<dyn PlatformRenderer>) {
        self.renderers
            .insert(renderer.platform().to_string(), renderer);
    }

    /// Routes `platform_id` to one of the built-in renderers. Returns false if
    /// `builtin` names no built-in platform.
    pub fn alias(&mut self, platform_id: &str, builtin: &str) -> bool {
        match create_platform_by_name(builtin) {
            Some(renderer) => {
                self.renderers.insert(platform_id.to_string(), renderer);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, platform_id: &str) -> Option<&dyn PlatformRenderer> {
        self.renderers.get(platform_id).map(|r| r.as_ref())
    }

    pub fn supports(&self, platform_id: &str) -> bool {
        self.renderers.contains_key(platform_id)
    }
}

/// Defines the built-in platforms, their registration and their creation by name.
macro_rules! define_platforms {
    ( $( ($struct_name:ident, $platform:expr) ),* $(,)? ) => {
        fn register_default_platforms(registry: &mut AHashMap<String, Box<dyn PlatformRenderer>>) {
            $( registry.insert($platform.to_string(), Box::new($struct_name)); )*
        }

        fn create_platform_by_name(name: &str) -> Option<Box<dyn PlatformRenderer>> {
            match name {
                $( $platform => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_platforms! {
    (SlackPlatform, "slack"),
    (FacebookPlatform, "facebook"),
}
