//! Knowledge module - encyclopedia search hits reduced to plain text.

mod snippet;

pub use snippet::{strip_html, SearchHit, Snippet};
