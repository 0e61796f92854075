//! Partitions the message board into segments bounded by intent transitions.
//!
//! Segmentation is the first of two passes: it is a pure function of the
//! project and produces an immutable [`Segmentation`] that the assembler
//! walks afterwards.

mod graph;

pub use graph::{MessageGraph, Walk};

use crate::error::{ConversionError, ConversionWarning};
use crate::project::{NextMessage, ProjectData};
use crate::text::to_dash_case;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Intent id reserved for the synthesized welcome intent.
pub const WELCOME_INTENT_ID: &str = "__welcome__";

/// A maximal run of messages connected by plain edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// The first message after the intent transition (or the root message).
    pub anchor_id: String,
    /// Ids of the intents whose edges lead into the anchor, in discovery order.
    pub intent_ids: Vec<String>,
    /// Message ids of the anchor's bounded walk, anchor first.
    pub walk: Vec<String>,
    /// True for the synthetic segment opened by a root message that starts
    /// without user input.
    pub is_welcome: bool,
}

/// Anchor message id → segment, iterated in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    segments: Vec<Segment>,
    index: AHashMap<String, usize>,
    pub warnings: Vec<ConversionWarning>,
}

impl Segmentation {
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn get(&self, anchor_id: &str) -> Option<&Segment> {
        self.index.get(anchor_id).map(|&i| &self.segments[i])
    }

    pub fn contains(&self, anchor_id: &str) -> bool {
        self.index.contains_key(anchor_id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn welcome(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.is_welcome)
    }

    /// Records that `intent_id` leads into `anchor_id`. Returns true when the
    /// anchor was not known before.
    fn link(&mut self, anchor_id: &str, intent_id: String, is_welcome: bool) -> bool {
        if let Some(&i) = self.index.get(anchor_id) {
            let segment = &mut self.segments[i];
            if !segment.intent_ids.contains(&intent_id) {
                segment.intent_ids.push(intent_id);
            }
            return false;
        }
        self.index
            .insert(anchor_id.to_string(), self.segments.len());
        self.segments.push(Segment {
            anchor_id: anchor_id.to_string(),
            intent_ids: vec![intent_id],
            walk: Vec::new(),
            is_welcome,
        });
        true
    }

    fn warn(&mut self, warning: ConversionWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn set_walk(&mut self, anchor_id: &str, walk: Vec<String>) {
        if let Some(&i) = self.index.get(anchor_id) {
            self.segments[i].walk = walk;
        }
    }
}

/// Builds a [`Segmentation`] from a project's board.
pub struct Segmenter<'a> {
    project: &'a ProjectData,
    graph: MessageGraph<'a>,
    intents_by_name: AHashMap<String, &'a str>,
}

impl<'a> Segmenter<'a> {
    pub fn new(project: &'a ProjectData) -> Self {
        let intents_by_name = project
            .intents
            .iter()
            .map(|intent| (to_dash_case(&intent.name), intent.id.as_str()))
            .collect();
        Self {
            project,
            graph: MessageGraph::new(&project.board),
            intents_by_name,
        }
    }

    pub fn graph(&self) -> &MessageGraph<'a> {
        &self.graph
    }

    /// Discovers every segment breadth-first, starting from the board's root
    /// messages in their listed order.
    pub fn segmentize(&self) -> Result<Segmentation, ConversionError> {
        let mut segmentation = Segmentation::default();
        let mut queue: VecDeque<String> = VecDeque::new();
        // (root, message) pairs reached from a root that opens no segment.
        let mut root_followers: Vec<(String, String)> = Vec::new();

        for root_id in &self.project.board.root_messages {
            let Some(root) = self.graph.get(root_id) else {
                segmentation.warn(ConversionWarning::MissingRoot(root_id.clone()));
                continue;
            };

            let starts_without_input = root
                .next_message_ids
                .first()
                .is_none_or(|next| !next.is_intent_labeled());

            if starts_without_input {
                if segmentation.link(root_id, WELCOME_INTENT_ID.to_string(), true) {
                    queue.push_back(root_id.clone());
                }
            } else {
                // The root opens no segment itself; its plain followers are
                // reported below unless another segment covers them.
                let walk = self.graph.walk_to_boundary(root_id)?;
                self.link_intent_edges(&walk, &mut segmentation, &mut queue);
                root_followers.extend(
                    walk.messages
                        .iter()
                        .skip(1)
                        .map(|m| (root_id.clone(), m.message_id.clone())),
                );
            }
        }

        while let Some(anchor_id) = queue.pop_front() {
            let walk = self.graph.walk_to_boundary(&anchor_id)?;
            self.link_intent_edges(&walk, &mut segmentation, &mut queue);
            segmentation.set_walk(&anchor_id, walk.ids());
        }

        let covered: AHashSet<&str> = segmentation
            .iter()
            .flat_map(|segment| segment.walk.iter().map(String::as_str))
            .collect();
        let dropped: Vec<ConversionWarning> = root_followers
            .into_iter()
            .filter(|(_, message_id)| !covered.contains(message_id.as_str()))
            .map(|(root_id, message_id)| ConversionWarning::UnanchoredMessage {
                root_id,
                message_id,
            })
            .collect();
        for warning in dropped {
            segmentation.warn(warning);
        }

        debug!(
            segments = segmentation.len(),
            messages = self.graph.len(),
            "segmented board"
        );
        Ok(segmentation)
    }

    fn link_intent_edges(
        &self,
        walk: &Walk<'a>,
        segmentation: &mut Segmentation,
        queue: &mut VecDeque<String>,
    ) {
        for (from, to) in &walk.missing {
            segmentation.warn(ConversionWarning::MissingMessage {
                from: from.clone(),
                to: to.clone(),
            });
        }

        for (message, next) in walk.intent_edges() {
            if self.graph.get(&next.message_id).is_none() {
                segmentation.warn(ConversionWarning::MissingMessage {
                    from: message.message_id.clone(),
                    to: next.message_id.clone(),
                });
                continue;
            }
            let intent_id = self.edge_intent(next);
            if segmentation.link(&next.message_id, intent_id, false) {
                queue.push_back(next.message_id.clone());
            }
        }
    }

    /// The intent id an edge is labeled with. Edges that only carry an action
    /// payload are matched by intent name; an unknown name is kept verbatim.
    fn edge_intent(&self, next: &NextMessage) -> String {
        if let Some(id) = next.intent_id() {
            return id.to_string();
        }
        let name = next.action_intent_name().unwrap_or_default();
        self.intents_by_name
            .get(&to_dash_case(name))
            .map(|id| id.to_string())
            .unwrap_or_else(|| name.to_string())
    }
}
