//! The importable skill document and its storage on disk.

mod document;

pub use document::*;

use crate::assembler::Assembly;
use crate::dialog::DialogNode;
use crate::error::StorageError;
use crate::ids::IdGenerator;
use crate::options::ExportOptions;
use crate::project::ProjectData;
use crate::text::to_dash_case;
use document::{IntentFlattener, flatten_entity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// The document handed to the target platform's import tool. Field order is
/// part of the import format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDocument {
    pub name: String,
    pub intents: Vec<SkillIntent>,
    pub entities: Vec<SkillEntity>,
    pub language: String,
    pub metadata: Metadata,
    pub skill_id: String,
    pub description: String,
    pub dialog_nodes: Vec<DialogNode>,
    pub workspace_id: String,
    pub counterexamples: Vec<Value>,
    pub system_settings: SystemSettings,
    pub learning_opt_out: bool,
    pub status: String,
}

/// Where a document was written and how large it is.
#[derive(Debug, Clone)]
pub struct SavedDocument {
    pub path: PathBuf,
    pub bytes: u64,
}

impl SkillDocument {
    pub fn build(
        project: &ProjectData,
        assembly: Assembly,
        options: &ExportOptions,
        ids: &mut dyn IdGenerator,
    ) -> Self {
        let flattener = IntentFlattener::new(&project.entities);
        let mut intents: Vec<SkillIntent> =
            project.intents.iter().map(|i| flattener.flatten(i)).collect();
        if let Some(welcome) = &assembly.welcome_intent {
            let welcome = flattener.flatten(welcome);
            if !intents.iter().any(|i| i.intent == welcome.intent) {
                intents.push(welcome);
            }
        }

        Self {
            name: project.project.name.clone(),
            intents,
            entities: project.entities.iter().map(flatten_entity).collect(),
            language: options.language.clone(),
            metadata: Metadata::default(),
            skill_id: ids.next_token(),
            description: options.description.clone(),
            dialog_nodes: assembly.nodes,
            workspace_id: ids.next_token(),
            counterexamples: Vec::new(),
            system_settings: SystemSettings::default(),
            learning_opt_out: false,
            status: "Available".to_string(),
        }
    }

    /// `<dash-cased name>.json`, or `skill.json` for an unnamed project.
    pub fn file_name(&self) -> String {
        match to_dash_case(&self.name) {
            name if name.is_empty() => "skill.json".to_string(),
            name => format!("{}.json", name),
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, StorageError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the document into `directory`, creating it if needed.
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<SavedDocument, StorageError> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|source| StorageError::Io {
            path: directory.display().to_string(),
            source,
        })?;

        let path = directory.join(self.file_name());
        let json = self.to_json()?;
        fs::write(&path, &json).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(SavedDocument {
            path,
            bytes: json.len() as u64,
        })
    }

    /// Reads a document written by [`SkillDocument::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
