use crate::project::{Entity, Intent, Utterance};
use crate::text::{parse_var, to_dash_case};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub const API_MAJOR_VERSION: &str = "v1";
pub const API_MINOR_VERSION: &str = "2018-09-20";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub entity: String,
    pub location: [usize; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillIntent {
    pub intent: String,
    pub description: String,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntityValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntity {
    pub entity: String,
    pub values: Vec<SkillEntityValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major_version: String,
    pub minor_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub api_version: ApiVersion,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            api_version: ApiVersion {
                major_version: API_MAJOR_VERSION.to_string(),
                minor_version: API_MINOR_VERSION.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooling {
    pub store_generic_responses: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub spelling_auto_correct: bool,
    pub tooling: Tooling,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            spelling_auto_correct: true,
            tooling: Tooling {
                store_generic_responses: true,
            },
        }
    }
}

/// Flattens design-tool intents, resolving utterance variables to entity
/// mentions.
pub(super) struct IntentFlattener<'a> {
    entity_names: AHashMap<&'a str, &'a str>,
}

impl<'a> IntentFlattener<'a> {
    pub(super) fn new(entities: &'a [Entity]) -> Self {
        let entity_names = entities
            .iter()
            .filter_map(|entity| Some((entity.id.as_deref()?, entity.name.as_str())))
            .collect();
        Self { entity_names }
    }

    pub(super) fn flatten(&self, intent: &Intent) -> SkillIntent {
        SkillIntent {
            intent: to_dash_case(&intent.name),
            description: String::new(),
            examples: intent
                .utterances
                .iter()
                .map(|utterance| self.example(utterance))
                .collect(),
        }
    }

    fn example(&self, utterance: &Utterance) -> Example {
        let text = if utterance.text.is_empty() {
            "_".to_string()
        } else {
            utterance.text.clone()
        };
        let mentions = utterance
            .variables
            .iter()
            .filter_map(|variable| {
                let start = variable.start_index?;
                let entity = variable
                    .entity
                    .as_deref()
                    .and_then(|id| self.entity_names.get(id))
                    .map(|name| to_dash_case(name))
                    .unwrap_or_else(|| parse_var(&variable.name));
                let end = start.checked_add(variable.name.chars().count())?;
                (!entity.is_empty() && end <= text.chars().count()).then_some(Mention {
                    entity,
                    location: [start, end],
                })
            })
            .collect();
        Example { text, mentions }
    }
}

pub(super) fn flatten_entity(entity: &Entity) -> SkillEntity {
    SkillEntity {
        entity: to_dash_case(&entity.name),
        values: entity
            .data
            .iter()
            .map(|value| SkillEntityValue {
                value_type: "synonyms".to_string(),
                value: value.value.clone(),
                synonyms: value.synonyms.to_vec(),
            })
            .collect(),
    }
}
