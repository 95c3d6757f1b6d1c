//! Text layout utilities.
//!
//! - [`wrap_text`] - Word wrapping for message bubbles
//! - [`visual_width`], [`tail_to_width`] - Unicode-aware width helpers

mod width;
mod wrap;

pub use width::{tail_to_width, visual_width};
pub use wrap::wrap_text;
