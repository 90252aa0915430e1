/*!
 * ctxdump - Flatten a directory into a single plain-text prompt context
 *
 * This library renders a directory as an ASCII tree followed by the text of
 * every file in tree order, for use as context for Large Language Models.
 */

pub mod config;
pub mod context;
pub mod error;
pub mod render;
pub mod report;
pub mod rules;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::Config;
pub use context::generate;
pub use error::{CtxError, Result};
pub use render::ContentRenderer;
pub use report::{Reporter, ScanReport};
pub use rules::IgnoreRules;
pub use tree::TreeBuilder;
pub use types::{ContentBlock, ContentBody, DirEntry, EntryKind, FileReadList, FileRef};
pub use writer::ContextWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
