//! Expose the kdocs build for integration tests. The binary is the supported
//! interface; this API may change without notice.
pub mod build;
pub mod cli;
#[cfg(feature = "serve")]
pub mod serve;
