/// Classes under construction along the current argument chain
///
/// Scoped to one chain: entries are pushed on the way down and popped on
/// the way back up, so siblings never see each other.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstructionStack {
    frames: Vec<String>,
}

impl ConstructionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack that already holds `class_name`, forbidding its construction
    pub fn seeded(class_name: impl Into<String>) -> Self {
        Self {
            frames: vec![class_name.into()],
        }
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.frames.iter().any(|f| f == class_name)
    }

    /// `false` (and no push) if the class is already on the stack
    pub fn push(&mut self, class_name: &str) -> bool {
        if self.contains(class_name) {
            return false;
        }
        self.frames.push(class_name.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
