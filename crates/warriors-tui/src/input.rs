//! Draft editing and the submit key.
//!
//! The draft text itself lives in the engine's conversation; the controller
//! only tracks the cursor and turns key presses into draft replacements.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use warriors_engine::ChatSession;

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter without Shift: the caller should submit.
    Submit,
    /// The draft or cursor changed.
    Edited,
    /// Nothing happened.
    Ignored,
}

/// Cursor state for the single-line draft field.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    /// Cursor position (character index).
    cursor: usize,
}

impl InputController {
    /// Create a controller with the cursor at the start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position clamped to the draft, in characters.
    pub fn cursor(&self, draft: &str) -> usize {
        self.cursor.min(draft.chars().count())
    }

    /// Replace the draft and move the cursor to its end.
    pub fn set_draft(&mut self, session: &mut ChatSession, text: impl Into<String>) {
        session.set_draft(text);
        self.cursor = session.conversation().draft().chars().count();
    }

    pub fn is_submittable(&self, session: &ChatSession) -> bool {
        session.is_submittable()
    }

    /// Handle a key press.
    ///
    /// Enter without Shift asks for submission and never inserts a newline.
    /// Every other key edits the draft, unless a response is pending, in
    /// which case the field is disabled.
    pub fn on_key(&mut self, key: KeyEvent, session: &mut ChatSession) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Ignored;
        }

        if key.code == KeyCode::Enter {
            return if key.modifiers.contains(KeyModifiers::SHIFT) {
                KeyOutcome::Ignored
            } else {
                KeyOutcome::Submit
            };
        }

        if session.is_pending() {
            return KeyOutcome::Ignored;
        }

        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return KeyOutcome::Ignored;
        }

        let draft = session.conversation().draft();
        let len = draft.chars().count();
        let cursor = self.cursor(draft);

        match key.code {
            KeyCode::Char(ch) => self.insert_str(session, &ch.to_string()),
            KeyCode::Backspace if cursor > 0 => {
                let mut chars: Vec<char> = draft.chars().collect();
                chars.remove(cursor - 1);
                session.set_draft(chars.into_iter().collect::<String>());
                self.cursor = cursor - 1;
                KeyOutcome::Edited
            }
            KeyCode::Delete if cursor < len => {
                let mut chars: Vec<char> = draft.chars().collect();
                chars.remove(cursor);
                session.set_draft(chars.into_iter().collect::<String>());
                self.cursor = cursor;
                KeyOutcome::Edited
            }
            KeyCode::Left if cursor > 0 => {
                self.cursor = cursor - 1;
                KeyOutcome::Edited
            }
            KeyCode::Right if cursor < len => {
                self.cursor = cursor + 1;
                KeyOutcome::Edited
            }
            KeyCode::Home if cursor > 0 => {
                self.cursor = 0;
                KeyOutcome::Edited
            }
            KeyCode::End if cursor < len => {
                self.cursor = len;
                KeyOutcome::Edited
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Insert pasted text at the cursor.
    ///
    /// Control characters, newlines included, become spaces since the field
    /// is single-line.
    pub fn paste(&mut self, text: &str, session: &mut ChatSession) -> KeyOutcome {
        if session.is_pending() {
            return KeyOutcome::Ignored;
        }
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        self.insert_str(session, &cleaned)
    }

    fn insert_str(&mut self, session: &mut ChatSession, text: &str) -> KeyOutcome {
        let conversation = session.conversation();
        let draft = conversation.draft();
        let len = draft.chars().count();
        let room = conversation.max_draft_chars().saturating_sub(len);
        let inserted: String = text.chars().take(room).collect();
        if inserted.is_empty() {
            return KeyOutcome::Ignored;
        }

        let cursor = self.cursor(draft);
        let at = draft
            .char_indices()
            .nth(cursor)
            .map_or(draft.len(), |(i, _)| i);
        let mut next = String::with_capacity(draft.len() + inserted.len());
        next.push_str(&draft[..at]);
        next.push_str(&inserted);
        next.push_str(&draft[at..]);

        self.cursor = cursor + inserted.chars().count();
        session.set_draft(next);
        KeyOutcome::Edited
    }
}
