//! "Load more" pagination over the current filter results

use crate::catalog::GameRecord;

/// Tracks how many of the filtered results have been handed to the view
#[derive(Debug, Clone)]
pub struct Paginator {
    results: Vec<GameRecord>,
    rendered: usize,
    batch_size: usize,
}

impl Paginator {
    pub fn new(batch_size: usize) -> Self {
        Self {
            results: Vec::new(),
            rendered: 0,
            batch_size: batch_size.max(1),
        }
    }

    /// Swap in a new result set and start over from the first record
    pub fn replace(&mut self, results: Vec<GameRecord>) {
        self.results = results;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.rendered = 0;
    }

    /// Next slice of at most `batch_size` records; empty once exhausted
    pub fn next_batch(&mut self) -> &[GameRecord] {
        let start = self.rendered.min(self.results.len());
        let end = (start + self.batch_size).min(self.results.len());
        self.rendered = end;
        &self.results[start..end]
    }

    pub fn remaining(&self) -> usize {
        self.results.len().saturating_sub(self.rendered)
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    /// Size of the batch the next `next_batch` call would return
    pub fn next_batch_len(&self) -> usize {
        self.remaining().min(self.batch_size)
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn results(&self) -> &[GameRecord] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
