// Utils module - Utility functions

pub mod search;
pub mod slug;

pub use search::{like_pattern, search_text};
pub use slug::{slug_candidate, slugify};
