//! The dialog node assembler: the second pass, turning a [`Segmentation`]
//! into the flat, ordered list of linked dialog nodes.

use crate::dialog::{ANYTHING_ELSE, Behavior, DialogNode, DialogNodeType, NextStep, Selector, WELCOME};
use crate::error::{ConversionError, ConversionWarning};
use crate::ids::{IdGenerator, RandomIds};
use crate::project::{Intent, Message, ProjectData, Utterance};
use crate::render::platforms::{PlatformRegistry, PlatformRenderer};
use crate::render::{ContentKind, OutputRenderer};
use crate::segment::{MessageGraph, Segment, Segmentation, Segmenter, WELCOME_INTENT_ID};
use crate::text::{parse_var, to_dash_case};
use ahash::AHashMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

mod builder;
pub mod slots;
pub mod variables;

use builder::TreeBuilder;
use slots::SlotExpander;
use variables::VariableResolver;

/// The result of an assembly run.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub nodes: Vec<DialogNode>,
    pub warnings: Vec<ConversionWarning>,
    /// The synthesized welcome intent, present when the board starts without
    /// user input.
    pub welcome_intent: Option<Intent>,
}

pub struct Assembler<'a> {
    project: &'a ProjectData,
    registry: PlatformRegistry,
    platform: String,
    ids: Box<dyn IdGenerator>,
}

pub struct AssemblerBuilder<'a> {
    project: &'a ProjectData,
    registry: PlatformRegistry,
    platform: Option<String>,
    ids: Option<Box<dyn IdGenerator>>,
}

impl<'a> AssemblerBuilder<'a> {
    pub fn new(project: &'a ProjectData) -> Self {
        Self {
            project,
            registry: PlatformRegistry::default(),
            platform: None,
            ids: None,
        }
    }

    /// Renders for `platform` instead of the project's configured platform.
    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    /// Routes a platform id to one of the built-in renderers.
    pub fn with_platform_mapping(mut self, platform_id: &str, builtin: &str) -> Self {
        self.registry.alias(platform_id, builtin);
        self
    }

    pub fn with_platform_renderer(mut self, renderer: Box<dyn PlatformRenderer>) -> Self {
        self.registry.register(renderer);
        self
    }

    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> Assembler<'a> {
        Assembler {
            project: self.project,
            registry: self.registry,
            platform: self
                .platform
                .unwrap_or_else(|| self.project.project.platform.clone()),
            ids: self.ids.unwrap_or_else(|| Box::new(RandomIds)),
        }
    }
}

impl<'a> Assembler<'a> {
    pub fn builder(project: &'a ProjectData) -> AssemblerBuilder<'a> {
        AssemblerBuilder::new(project)
    }

    /// Segments the board, then emits one standard node per segment, each
    /// preceded by the slot-filling nodes its intents require.
    pub fn assemble(mut self) -> Result<Assembly, ConversionError> {
        let project = self.project;
        let segmenter = Segmenter::new(project);
        let segmentation = segmenter.segmentize()?;
        let graph = segmenter.graph();

        let intents: AHashMap<&str, &Intent> = project
            .intents
            .iter()
            .map(|intent| (intent.id.as_str(), intent))
            .collect();
        let variables = VariableResolver::new(&project.variables);
        let expander = SlotExpander::new(&intents, &variables);
        let renderer = OutputRenderer::new(self.registry.get(&self.platform));
        if renderer.platform_name().is_none() {
            debug!(platform = %self.platform, "no platform renderer, emitting generic output only");
        }

        let mut tree = TreeBuilder::default();
        let mut warnings = segmentation.warnings.clone();

        for segment in segmentation.iter() {
            let node_id = node_id(&segment.anchor_id);
            let messages: Vec<&Message> = segment
                .walk
                .iter()
                .filter_map(|id| graph.get(id))
                .collect();

            let conditions = resolve_condition(segment, &intents, &mut warnings);
            let parent = tree.parent_of(&segment.anchor_id);
            let previous_sibling = tree.claim_sibling(parent.as_deref(), &node_id);

            let slots = expander.expand(
                &segment.intent_ids,
                &node_id,
                self.ids.as_mut(),
                &mut warnings,
            );

            let rendered = renderer.render_walk(&messages)?;
            warnings.extend(rendered.warnings);

            let mut node = DialogNode::new(
                if slots.is_empty() {
                    DialogNodeType::Standard
                } else {
                    DialogNodeType::Frame
                },
                node_id.clone(),
            );
            node.title = Some(title(segment, graph, &node_id));
            node.output = rendered.output;
            node.parent = parent;
            node.previous_sibling = previous_sibling;
            node.conditions = Some(conditions);
            node.next_step = jump_step(&messages, &segmentation);
            node.context = context(&messages);

            debug!(
                node = %node_id,
                slots = slots.len() / 3,
                messages = messages.len(),
                "assembled segment"
            );

            tree.push_slots(slots);
            let targets = messages
                .iter()
                .flat_map(|m| m.next_message_ids.iter())
                .map(|next| next.message_id.as_str())
                .filter(|target| *target != segment.anchor_id);
            tree.push_standard(node, targets);
        }

        Ok(Assembly {
            nodes: tree.finish(),
            warnings,
            welcome_intent: segmentation.welcome().map(|_| welcome_intent()),
        })
    }
}

pub fn node_id(message_id: &str) -> String {
    format!("node_{}", message_id)
}

/// The pseudo intent behind the synthetic welcome segment.
pub fn welcome_intent() -> Intent {
    Intent {
        id: WELCOME_INTENT_ID.to_string(),
        name: WELCOME.to_string(),
        utterances: ["hi", "hello"]
            .into_iter()
            .map(|text| Utterance {
                text: text.to_string(),
                variables: Vec::new(),
            })
            .collect(),
        ..Intent::default()
    }
}

/// `#<name>` of the first intent that resolves; `welcome` for the synthetic
/// welcome intent; `anything_else` when none resolves.
fn resolve_condition(
    segment: &Segment,
    intents: &AHashMap<&str, &Intent>,
    warnings: &mut Vec<ConversionWarning>,
) -> String {
    let resolved = segment.intent_ids.iter().find_map(|id| {
        if id == WELCOME_INTENT_ID {
            Some(WELCOME.to_string())
        } else {
            intents
                .get(id.as_str())
                .map(|intent| format!("#{}", to_dash_case(&intent.name)))
        }
    });

    resolved.unwrap_or_else(|| {
        let fallback = if segment.is_welcome {
            WELCOME
        } else {
            ANYTHING_ELSE
        };
        let warning = ConversionWarning::UnresolvedIntent {
            anchor_id: segment.anchor_id.clone(),
            fallback: fallback.to_string(),
        };
        warn!("{}", warning);
        warnings.push(warning);
        fallback.to_string()
    })
}

fn title(segment: &Segment, graph: &MessageGraph<'_>, node_id: &str) -> String {
    match graph.get(&segment.anchor_id).and_then(Message::node_name) {
        Some(name) => to_dash_case(name),
        None if segment.is_welcome => WELCOME.to_string(),
        None => node_id.to_string(),
    }
}

/// A `jump_to` step for the first jump block of the walk whose target opens
/// a segment.
fn jump_step(messages: &[&Message], segmentation: &Segmentation) -> Option<NextStep> {
    messages
        .iter()
        .filter(|m| ContentKind::parse(&m.message_type) == ContentKind::Jump)
        .filter_map(|m| {
            m.payload
                .pointer("/selectedResult/value")
                .and_then(Value::as_str)
        })
        .find(|target| segmentation.contains(target))
        .map(|target| NextStep {
            behavior: Behavior::JumpTo,
            selector: Selector::Body,
            dialog_node: node_id(target),
        })
}

/// Context variables declared on the walk's messages, keyed by variable name.
fn context(messages: &[&Message]) -> Option<Map<String, Value>> {
    let context: Map<String, Value> = messages
        .iter()
        .filter_map(|m| m.payload.get("context").and_then(Value::as_array))
        .flatten()
        .filter_map(|entry| {
            let name = parse_var(entry.get("name")?.as_str()?);
            let value = entry
                .get("default_value")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            (!name.is_empty()).then_some((name, value))
        })
        .collect();
    (!context.is_empty()).then_some(context)
}
