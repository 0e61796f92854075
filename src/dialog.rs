//! Output model: the target platform's hierarchical dialog nodes.

use serde::de::{DeserializeOwned, Deserializer, Error};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Condition used when no intent of a segment resolves.
pub const ANYTHING_ELSE: &str = "anything_else";
/// Condition of the node the conversation starts in.
pub const WELCOME: &str = "welcome";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogNodeType {
    Standard,
    /// A standard node that owns slot-filling children.
    Frame,
    Slot,
    EventHandler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    Input,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    JumpTo,
    SkipUserInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Body,
    UserInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStep {
    pub behavior: Behavior,
    pub selector: Selector,
    pub dialog_node: String,
}

/// The prompt a focus handler emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptText {
    pub values: Vec<String>,
    pub selection_policy: SelectionPolicy,
}

/// Fragments rendered for one platform, keyed by the platform id on output.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOutput {
    pub name: String,
    pub fragments: Vec<Value>,
}

/// A node's `output` object.
///
/// Serialized as `{<platform>: [...], "generic": [...], "text": {...}}` with
/// absent parts omitted, so slot nodes serialize as `{}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOutput {
    pub platform: Option<PlatformOutput>,
    pub generic: Option<Vec<Value>>,
    pub text: Option<PromptText>,
}

impl NodeOutput {
    pub fn prompt(text: &str) -> Self {
        Self {
            text: Some(PromptText {
                values: vec![text.to_string()],
                selection_policy: SelectionPolicy::Sequential,
            }),
            ..Self::default()
        }
    }
}

impl Serialize for NodeOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(platform) = &self.platform {
            map.serialize_entry(&platform.name, &platform.fragments)?;
        }
        if let Some(generic) = &self.generic {
            map.serialize_entry("generic", generic)?;
        }
        if let Some(text) = &self.text {
            map.serialize_entry("text", text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NodeOutput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut output = NodeOutput::default();
        for (key, value) in Map::<String, Value>::deserialize(deserializer)? {
            match key.as_str() {
                "generic" => output.generic = Some(from_value::<_, D::Error>(value)?),
                "text" => output.text = Some(from_value::<_, D::Error>(value)?),
                _ => {
                    output.platform = Some(PlatformOutput {
                        fragments: from_value::<_, D::Error>(value)?,
                        name: key,
                    })
                }
            }
        }
        Ok(output)
    }
}

fn from_value<T: DeserializeOwned, E: Error>(value: Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(E::custom)
}

/// One entry of the generated dialog tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogNode {
    #[serde(rename = "type")]
    pub node_type: DialogNodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub output: NodeOutput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<NextStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_sibling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    pub dialog_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<EventName>,
}

impl DialogNode {
    /// A node of the given type with every optional field unset.
    pub fn new(node_type: DialogNodeType, dialog_node: impl Into<String>) -> Self {
        Self {
            node_type,
            title: None,
            output: NodeOutput::default(),
            parent: None,
            next_step: None,
            previous_sibling: None,
            conditions: None,
            dialog_node: dialog_node.into(),
            context: None,
            variable: None,
            event_name: None,
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(
            self.node_type,
            DialogNodeType::Standard | DialogNodeType::Frame
        )
    }
}
