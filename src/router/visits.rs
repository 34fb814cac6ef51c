use crate::pages::Page;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitToken {
    pub page: Page,
    generation: u64,
}

/// Binds each page load to the navigation that started it. Starting a new
/// visit or navigating away supersedes every earlier token.
#[derive(Debug, Clone, Default)]
pub struct VisitTracker {
    generation: Arc<AtomicU64>,
}

impl VisitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, page: Page) -> VisitToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        VisitToken { page, generation }
    }

    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: &VisitToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.generation
    }
}
