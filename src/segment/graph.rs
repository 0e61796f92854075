use crate::error::ConversionError;
use crate::project::{Board, Message, NextMessage};
use ahash::{AHashMap, AHashSet};

/// Id-indexed, read-only view over a board's messages.
pub struct MessageGraph<'a> {
    messages: AHashMap<&'a str, &'a Message>,
}

/// The messages reachable from a start message without crossing an intent
/// boundary, in depth-first pre-order.
#[derive(Debug, Clone, Default)]
pub struct Walk<'a> {
    pub messages: Vec<&'a Message>,
    /// `(from, to)` pairs of plain edges whose target is not on the board.
    pub missing: Vec<(String, String)>,
}

impl<'a> Walk<'a> {
    /// Intent-labeled edges leaving the walk, in traversal order.
    pub fn intent_edges(&self) -> impl Iterator<Item = (&'a Message, &'a NextMessage)> + '_ {
        self.messages.iter().flat_map(|&message: &&'a Message| {
            message
                .next_message_ids
                .iter()
                .filter(|next| next.is_intent_labeled())
                .map(move |next| (message, next))
        })
    }

    pub fn ids(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.message_id.clone()).collect()
    }
}

impl<'a> MessageGraph<'a> {
    pub fn new(board: &'a Board) -> Self {
        let messages = board
            .messages
            .iter()
            .map(|message| (message.message_id.as_str(), message))
            .collect();
        Self { messages }
    }

    pub fn get(&self, message_id: &str) -> Option<&'a Message> {
        self.messages.get(message_id).copied()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Follows plain (non-intent) edges from `start` until every branch ends at
    /// an intent boundary or a message without successors.
    ///
    /// A message is visited at most once; a plain edge that leads back onto the
    /// current path fails with [`ConversionError::CycleDetected`]. An unknown
    /// start id yields an empty walk.
    pub fn walk_to_boundary(&self, start: &str) -> Result<Walk<'a>, ConversionError> {
        let mut walk = Walk::default();
        if let Some(message) = self.get(start) {
            let mut visited = AHashSet::new();
            let mut on_path = AHashSet::new();
            self.visit(message, &mut walk, &mut visited, &mut on_path)?;
        }
        Ok(walk)
    }

    fn visit(
        &self,
        message: &'a Message,
        walk: &mut Walk<'a>,
        visited: &mut AHashSet<&'a str>,
        on_path: &mut AHashSet<&'a str>,
    ) -> Result<(), ConversionError> {
        let id = message.message_id.as_str();
        visited.insert(id);
        on_path.insert(id);
        walk.messages.push(message);

        for next in message.next_message_ids.iter().filter(|n| !n.is_intent_labeled()) {
            let target = next.message_id.as_str();
            if on_path.contains(target) {
                return Err(ConversionError::CycleDetected {
                    message_id: target.to_string(),
                });
            }
            if visited.contains(target) {
                continue;
            }
            match self.get(target) {
                Some(successor) => self.visit(successor, walk, visited, on_path)?,
                None => walk.missing.push((id.to_string(), target.to_string())),
            }
        }

        on_path.remove(id);
        Ok(())
    }
}
