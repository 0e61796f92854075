use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A timestamp wrapper as exported by the design tool (`{"date": "..."}`).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Timestamp {
    #[serde(default)]
    pub date: Option<String>,
}

/// The project record: name, target platform and timestamps.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

/// A reference to a variable inside an utterance.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UtteranceVariable {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_index: Option<usize>,
    /// Entity id the variable is typed with, if any.
    #[serde(default)]
    pub entity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Utterance {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub variables: Vec<UtteranceVariable>,
}

/// A required piece of information an intent collects before proceeding.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SlotDefinition {
    #[serde(default)]
    pub id: Option<String>,
    pub variable_id: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Intent {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub utterances: Vec<Utterance>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default)]
    pub slots: Vec<SlotDefinition>,
}

/// Synonyms arrive either as a list or as one comma-separated string.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Synonyms {
    List(Vec<String>),
    Joined(String),
}

impl Default for Synonyms {
    fn default() -> Self {
        Synonyms::List(Vec::new())
    }
}

impl Synonyms {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Synonyms::List(items) => items.clone(),
            Synonyms::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntityValue {
    pub value: String,
    #[serde(default)]
    pub synonyms: Synonyms,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Entity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub data: Vec<EntityValue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_value: Value,
}

/// The intent an edge is labeled with.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct IncidentIntent {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

/// The action carried by an edge; its payload names an intent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EdgeAction {
    #[serde(default)]
    pub payload: Option<Value>,
}

/// An outgoing edge from one message to the next.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NextMessage {
    pub message_id: String,
    #[serde(default, deserialize_with = "object_or_none")]
    pub intent: Option<IncidentIntent>,
    #[serde(default, deserialize_with = "object_or_none")]
    pub action: Option<EdgeAction>,
    #[serde(default)]
    pub conditional: Value,
}

impl NextMessage {
    /// The id of the intent on this edge, if the edge carries one.
    pub fn intent_id(&self) -> Option<&str> {
        self.intent
            .as_ref()
            .map(|intent| intent.value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// The intent name carried in the edge's action payload, if any.
    pub fn action_intent_name(&self) -> Option<&str> {
        self.action
            .as_ref()
            .and_then(|action| action.payload.as_ref())
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Whether following this edge requires the user to trigger an intent.
    pub fn is_intent_labeled(&self) -> bool {
        self.intent_id().is_some() || self.action_intent_name().is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PreviousMessage {
    pub message_id: String,
}

/// A node of the design tool's flow graph.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Message {
    pub message_id: String,
    #[serde(default)]
    pub message_type: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub previous_message_ids: Vec<PreviousMessage>,
    #[serde(default)]
    pub next_message_ids: Vec<NextMessage>,
}

impl Message {
    /// The display name configured on the block in the design tool.
    pub fn node_name(&self) -> Option<&str> {
        self.payload
            .get("nodeName")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// The message graph plus the ordered list of root message ids.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Board {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub root_messages: Vec<String>,
}

/// The export tool wraps the board in a `{"board": {...}}` envelope; both
/// shapes are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum BoardEnvelope {
    Wrapped { board: Board },
    Flat(Board),
}

impl From<BoardEnvelope> for Board {
    fn from(envelope: BoardEnvelope) -> Self {
        match envelope {
            BoardEnvelope::Wrapped { board } => board,
            BoardEnvelope::Flat(board) => board,
        }
    }
}

/// Deserializes a JSON object into `T` and maps everything else (the export
/// tool uses `""` and `null` for "absent") to `None`.
fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_object() {
        serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}
