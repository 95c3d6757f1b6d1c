//! Word wrapping for message bubbles.

use std::borrow::Cow;

/// Wrap `text` to at most `width` cells per line.
///
/// Always returns at least one line, so an empty message still renders as
/// an (empty) bubble. Words longer than `width` are broken.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let lines: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(Cow::into_owned)
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
