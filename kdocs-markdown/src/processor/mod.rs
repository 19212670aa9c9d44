//! Markdown rendering.
//!
//! - [`core`]: the [`MarkdownProcessor`] pipeline (comrak conversion and the
//!   full document pipeline)
//! - [`postprocess`]: DOM transformations applied to comrak's output
//! - [`process`]: panic-safe wrappers
//! - [`types`]: options and the processor type
pub mod core;
pub mod postprocess;
pub mod process;
pub mod types;

pub use process::process_safe;
pub use types::{MarkdownOptions, MarkdownProcessor};
