//! Shared utility functions.
//!
//! - `html`: entity decoding and tag stripping for title text

mod html;

pub use html::{decode_entities, strip_tags};
