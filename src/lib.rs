pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, LocalStorage};

pub use adapters::ScryfallClient;
pub use core::convert::convert_deck_text;
pub use core::detector::detect;
pub use core::engine::{DeckEngine, RunSummary};
pub use core::parser::parse;
pub use core::pipeline::{DeckPipeline, PipelineOptions};
pub use core::validator::DeckValidator;
pub use utils::error::{DeckError, Result};
