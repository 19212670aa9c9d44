pub mod assets;
pub mod date;
pub mod git;
pub mod output;

// Re-export commonly used utilities
pub use assets::copy_assets;
pub use date::{format_last_modified, resolve_time_zone};
pub use git::last_commit_time;
pub use output::{page_output_path, write_output};
