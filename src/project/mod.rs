//! The design-tool project as it is handed over by the fetch collaborator.

mod definition;

pub use definition::*;

use crate::error::ConversionError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Everything one conversion run reads: intents, entities, variables, the
/// message board and the project record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectData {
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default, deserialize_with = "unwrap_board")]
    pub board: Board,
    #[serde(default)]
    pub project: ProjectRecord,
}

impl ProjectData {
    /// Parses a project export from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    /// Loads a project export from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConversionError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn message(&self, message_id: &str) -> Option<&Message> {
        self.board
            .messages
            .iter()
            .find(|m| m.message_id == message_id)
    }
}

fn unwrap_board<'de, D>(deserializer: D) -> Result<Board, D::Error>
where
    D: Deserializer<'de>,
{
    BoardEnvelope::deserialize(deserializer).map(Board::from)
}
