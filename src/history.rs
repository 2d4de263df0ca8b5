use std::collections::VecDeque;

use crate::roller::Composition;

/// Recent compositions, newest first, capped at a fixed window.
#[derive(Debug, Clone)]
pub struct History {
    window: usize,
    entries: VecDeque<Composition>,
}

impl History {
    pub fn new(window: usize) -> Self {
        History {
            window,
            entries: VecDeque::with_capacity(window),
        }
    }

    /// Add `comp` as the newest entry, evicting the oldest past the window.
    pub fn push(&mut self, comp: Composition) {
        self.entries.push_front(comp);
        self.entries.truncate(self.window);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Composition> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Composition> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
