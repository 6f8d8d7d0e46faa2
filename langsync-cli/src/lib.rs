//! CLI library for testing purposes

pub mod config;
pub mod validation;

pub use config::{FileConfig, ProviderKind, ResolvedConfig};
