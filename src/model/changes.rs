/// Lines added and removed during the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeChanges {
    pub added: u64,
    pub removed: u64,
}

impl CodeChanges {
    pub fn new(added: u64, removed: u64) -> Self {
        Self { added, removed }
    }

    pub fn has_added(&self) -> bool {
        self.added > 0
    }

    pub fn has_removed(&self) -> bool {
        self.removed > 0
    }
}
