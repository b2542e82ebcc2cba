use crate::domain::model::{Project, ProjectCollection};

/// Wrapping cursor over a collection whose length it does not control.
///
/// The controller only knows the length it was last told about through
/// [`reconcile`](Self::reconcile). While that length is zero the cursor is
/// inactive: [`position`](Self::position) is `None` and navigation is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselController {
    cursor: usize,
    len: usize,
}

impl CarouselController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % self.len;
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + self.len - 1) % self.len;
    }

    /// Adopt a new collection length, pulling the cursor back to 0 if it
    /// would point past the end.
    pub fn reconcile(&mut self, new_len: usize) {
        if self.len != new_len {
            tracing::debug!("carousel length {} -> {}", self.len, new_len);
        }
        self.len = new_len;
        if self.cursor >= new_len {
            self.cursor = 0;
        }
    }

    pub fn sync(&mut self, collection: &ProjectCollection) {
        self.reconcile(collection.len());
    }

    pub fn position(&self) -> Option<usize> {
        (self.len > 0).then_some(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The active project, or `None` while nothing is loaded.
    pub fn current<'a>(&self, collection: &'a ProjectCollection) -> Option<&'a Project> {
        self.position().and_then(|index| collection.get(index))
    }
}
