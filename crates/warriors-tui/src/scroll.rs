//! Keeps the newest message in view.
//!
//! The anchor is notified after every history change and then glides the
//! message list toward the bottom over the next few ticks. Manual scrolling
//! detaches it until the next change.

use tracing::trace;
use warriors_engine::{HistoryObserver, MessageStore};

/// Lines scrolled per arrow key or mouse wheel tick.
pub const SCROLL_STEP: usize = 3;

/// Scroll position of the message list.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnchor {
    /// First visible line.
    offset: usize,
    /// Total rendered lines, as of the last render.
    content_height: usize,
    /// Visible lines, as of the last render.
    viewport_height: usize,
    /// Whether the view glides to the bottom on each tick.
    following: bool,
    /// Number of scroll-to-bottom requests received.
    requests: u64,
}

impl ScrollAnchor {
    /// Create an anchor at the top with nothing to show.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    /// How many times the anchor was asked to reveal the last message.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Whether the last line is visible.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Record the rendered extent of the list. Called by the renderer.
    pub fn set_extent(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Advance the smooth scroll by one step.
    ///
    /// Covers half of the remaining distance (at least one line). Returns
    /// whether the offset moved.
    pub fn tick(&mut self) -> bool {
        if !self.following {
            return false;
        }
        let target = self.max_offset();
        if self.offset >= target {
            return false;
        }
        let step = (target - self.offset).div_ceil(2).max(1);
        self.offset += step;
        trace!(offset = self.offset, target, "scroll anchor step");
        true
    }

    /// Jump straight to the bottom and keep following.
    pub fn jump_to_bottom(&mut self) {
        self.following = true;
        self.offset = self.max_offset();
    }

    /// Jump to the first line. Stops following.
    pub fn jump_to_top(&mut self) {
        self.following = false;
        self.offset = 0;
    }

    /// Scroll up. Stops following.
    pub fn scroll_up(&mut self, lines: usize) {
        self.following = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Scroll down. Reaching the bottom resumes following.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
        if self.at_bottom() {
            self.following = true;
        }
    }

    /// Scroll up by one viewport.
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    /// Scroll down by one viewport.
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }
}

impl HistoryObserver for ScrollAnchor {
    fn history_changed(&mut self, history: &MessageStore) {
        if history.is_empty() {
            return;
        }
        self.following = true;
        self.requests += 1;
        trace!(
            history_len = history.len(),
            requests = self.requests,
            "scroll to latest message requested"
        );
    }
}
