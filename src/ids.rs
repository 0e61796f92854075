use uuid::Uuid;

/// Produces the unique tokens used for slot/handler node ids and for the
/// document-level `skill_id`/`workspace_id`.
pub trait IdGenerator {
    /// Returns a fresh token. Tokens from one generator never repeat.
    fn next_token(&mut self) -> String;

    /// Returns `<prefix>_<token>`.
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next_token())
    }
}

/// Random v4 UUIDs in their hyphen-less form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_token(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// A monotonically growing counter. Two runs seeded with the same start value
/// hand out the same sequence of ids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_token(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}
