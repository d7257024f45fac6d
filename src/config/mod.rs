pub mod cli;
pub mod toml_config;

pub use cli::LocalStorage;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::adapters::scryfall::{
        DEFAULT_API_ENDPOINT, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECONDS,
        DEFAULT_USER_AGENT,
    };
    use crate::core::validator::DEFAULT_FORMAT;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_chunk_size, validate_format_name, validate_path, validate_range, validate_url,
        Validate, MAX_LOOKUP_CHUNK_SIZE,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "deck-validator")]
    #[command(about = "Convert decklist exports to JSON and check them against Scryfall")]
    pub struct CliConfig {
        /// Decklist file (MTGO, MTG Arena, Moxfield or plain text export)
        #[arg(short, long)]
        pub input: String,

        /// Format to validate against; inferred from the deck when omitted
        #[arg(short, long)]
        pub format: Option<String>,

        /// Force the source format (mtga, moxfield, mtgo, unknown, ...) instead of detecting it
        #[arg(long)]
        pub source: Option<String>,

        /// Only convert the decklist, skip card lookups
        #[arg(long)]
        pub convert_only: bool,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, default_value = "deck_report.json")]
        pub report_name: String,

        #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
        pub api_endpoint: String,

        #[arg(long, default_value_t = MAX_LOOKUP_CHUNK_SIZE)]
        pub chunk_size: usize,

        #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
        pub concurrent_requests: usize,

        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
        pub timeout_seconds: u64,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        pub user_agent: String,

        #[arg(long, default_value = DEFAULT_FORMAT)]
        pub default_format: String,

        /// Count the commanders zone towards deck size and legality checks
        #[arg(long)]
        pub include_commanders: bool,

        /// TOML file that replaces the lookup, validation and output settings above
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn chunk_size(&self) -> usize {
            self.chunk_size
        }

        fn concurrent_requests(&self) -> usize {
            self.concurrent_requests
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds
        }

        fn user_agent(&self) -> &str {
            &self.user_agent
        }

        fn default_format(&self) -> &str {
            &self.default_format
        }

        fn include_commanders(&self) -> bool {
            self.include_commanders
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_path("output_path", &self.output_path)?;
            validate_path("report_name", &self.report_name)?;
            validate_url("api_endpoint", &self.api_endpoint)?;
            validate_chunk_size("chunk_size", self.chunk_size)?;
            validate_range("concurrent_requests", self.concurrent_requests, 1, 10)?;
            validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
            validate_format_name("default_format", &self.default_format)?;
            if let Some(format) = &self.format {
                validate_format_name("format", format)?;
            }
            Ok(())
        }
    }

}
