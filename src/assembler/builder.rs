use crate::dialog::DialogNode;
use ahash::AHashMap;

/// Accumulates the flat node list and the indexes needed to link nodes as
/// they are emitted.
#[derive(Default)]
pub(super) struct TreeBuilder {
    nodes: Vec<DialogNode>,
    /// parent node id (`None` for top level) → last standard child emitted.
    last_child: AHashMap<Option<String>, String>,
    /// message id → node id of the first emitted segment with an edge into it.
    reached_by: AHashMap<String, String>,
}

impl TreeBuilder {
    /// The node of the earliest emitted segment whose walk leads into
    /// `anchor_id`, if any.
    pub(super) fn parent_of(&self, anchor_id: &str) -> Option<String> {
        self.reached_by.get(anchor_id).cloned()
    }

    /// Claims `node_id` as the newest child of `parent` and returns the child
    /// it follows. Siblings are chained in emission order.
    pub(super) fn claim_sibling(&mut self, parent: Option<&str>, node_id: &str) -> Option<String> {
        self.last_child
            .insert(parent.map(str::to_string), node_id.to_string())
    }

    /// Appends slot-filling nodes. They precede the standard node they belong to.
    pub(super) fn push_slots(&mut self, slots: Vec<DialogNode>) {
        self.nodes.extend(slots);
    }

    /// Appends a standard node and records every message its walk leads into.
    pub(super) fn push_standard<'t>(
        &mut self,
        node: DialogNode,
        targets: impl IntoIterator<Item = &'t str>,
    ) {
        for target in targets {
            self.reached_by
                .entry(target.to_string())
                .or_insert_with(|| node.dialog_node.clone());
        }
        self.nodes.push(node);
    }

    pub(super) fn finish(self) -> Vec<DialogNode> {
        self.nodes
    }
}
