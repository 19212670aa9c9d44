pub mod config;
pub mod error;
pub mod meta;
pub mod overrides;
pub mod templates;

pub use config::Config;
pub use error::ConfigError;
pub use meta::MetaConfig;
