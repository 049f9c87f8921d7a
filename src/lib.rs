pub mod build_runner;
pub mod bundle;
pub mod cleaner;
pub mod clipboard;
pub mod collector;
pub mod config;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod pipeline;
pub mod process;
pub mod reporting;
pub mod trie;
pub mod utils;

pub use config::ForgeConfig;
pub use errors::ForgeError;
pub use pipeline::{Forge, ForgeOptions, PipelineReport};
