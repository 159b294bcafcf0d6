//! Error types for the vidctl protocol layer.

mod inject;
mod page;

pub use inject::*;
pub use page::*;
