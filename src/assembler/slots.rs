use super::variables::VariableResolver;
use crate::dialog::{DialogNode, DialogNodeType, EventName, NodeOutput};
use crate::error::ConversionWarning;
use crate::ids::IdGenerator;
use crate::project::Intent;
use ahash::AHashMap;
use serde_json::{Map, Value};
use tracing::warn;

/// Synthesizes the slot → input handler → prompt handler triples that make
/// the target platform collect an intent's required variable.
pub struct SlotExpander<'a> {
    intents: &'a AHashMap<&'a str, &'a Intent>,
    variables: &'a VariableResolver<'a>,
}

impl<'a> SlotExpander<'a> {
    pub fn new(
        intents: &'a AHashMap<&'a str, &'a Intent>,
        variables: &'a VariableResolver<'a>,
    ) -> Self {
        Self { intents, variables }
    }

    /// Expands the first required slot of every intent in `intent_ids` into a
    /// triple parented at `parent_id`. Intents without required slots, and
    /// slots whose variable is unknown, contribute nothing.
    ///
    /// Only the first required slot of an intent is expanded.
    pub fn expand(
        &self,
        intent_ids: &[String],
        parent_id: &str,
        ids: &mut dyn IdGenerator,
        warnings: &mut Vec<ConversionWarning>,
    ) -> Vec<DialogNode> {
        let mut nodes = Vec::new();
        let mut previous_slot: Option<String> = None;

        for intent in intent_ids
            .iter()
            .filter_map(|id| self.intents.get(id.as_str()))
        {
            let Some(slot) = intent.slots.iter().find(|slot| slot.is_required) else {
                continue;
            };
            let Some(name) = self.variables.context_name(&slot.variable_id) else {
                let warning = ConversionWarning::UnresolvedVariable {
                    intent: intent.name.clone(),
                    variable_id: slot.variable_id.clone(),
                };
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            };

            let slot_id = ids.next_id("slot");
            let input_id = ids.next_id("handler");
            let prompt_id = ids.next_id("handler");

            let mut slot_node = DialogNode::new(DialogNodeType::Slot, slot_id.clone());
            slot_node.parent = Some(parent_id.to_string());
            slot_node.previous_sibling = previous_slot.replace(slot_id.clone());
            slot_node.variable = Some(format!("${}", name));

            let mut context = Map::new();
            context.insert(name.clone(), Value::String(format!("${}", name)));
            let mut input_handler = DialogNode::new(DialogNodeType::EventHandler, input_id.clone());
            input_handler.parent = Some(slot_id);
            input_handler.conditions = Some(format!("@{}", name));
            input_handler.context = Some(context);
            input_handler.event_name = Some(EventName::Input);

            let mut prompt_handler = DialogNode::new(DialogNodeType::EventHandler, prompt_id);
            prompt_handler.parent = Some(input_id);
            prompt_handler.output = NodeOutput::prompt(&slot.prompt);
            prompt_handler.event_name = Some(EventName::Focus);

            nodes.extend([slot_node, input_handler, prompt_handler]);
        }

        nodes
    }
}
