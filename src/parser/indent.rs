//! Per-line indentation measurement
//!
//! Feeds the classifier's bracket-nesting display: the indent level of the
//! line an opening bracket sits on is what gets pushed onto the level
//! stack. Presentation metadata only; match and rollback behavior never
//! depend on it.

/// Computes indent levels from a line's leading whitespace: a tab counts
/// for the configured tab size, any other whitespace character for one.
#[derive(Debug, Clone, Copy)]
pub struct IndentTracker {
    tab_size: usize,
}

impl IndentTracker {
    pub fn new(tab_size: usize) -> Self {
        IndentTracker { tab_size }
    }

    pub fn measure(&self, leading: &str) -> usize {
        leading
            .chars()
            .map(|c| if c == '\t' { self.tab_size } else { 1 })
            .sum()
    }
}
