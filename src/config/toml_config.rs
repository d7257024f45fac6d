use crate::adapters::scryfall::{
    DEFAULT_API_ENDPOINT, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};
use crate::core::validator::DEFAULT_FORMAT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DeckError, Result};
use crate::utils::validation::{
    validate_chunk_size, validate_format_name, validate_path, validate_range, validate_url,
    Validate, MAX_LOOKUP_CHUNK_SIZE,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub scryfall: ScryfallConfig,
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub description: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "deck-validator".to_string(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScryfallConfig {
    pub endpoint: String,
    pub chunk_size: usize,
    pub concurrent_requests: usize,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            chunk_size: MAX_LOOKUP_CHUNK_SIZE,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub default_format: String,
    pub include_commanders: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_FORMAT.to_string(),
            include_commanders: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub report_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
            report_name: "deck_report.json".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` with environment values.
    /// Unset variables are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| DeckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn report_name(&self) -> &str {
        &self.output.report_name
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.scryfall.endpoint
    }

    fn chunk_size(&self) -> usize {
        self.scryfall.chunk_size
    }

    fn concurrent_requests(&self) -> usize {
        self.scryfall.concurrent_requests
    }

    fn timeout_seconds(&self) -> u64 {
        self.scryfall.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        &self.scryfall.user_agent
    }

    fn default_format(&self) -> &str {
        &self.validation.default_format
    }

    fn include_commanders(&self) -> bool {
        self.validation.include_commanders
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("scryfall.endpoint", &self.scryfall.endpoint)?;
        validate_chunk_size("scryfall.chunk_size", self.scryfall.chunk_size)?;
        validate_range(
            "scryfall.concurrent_requests",
            self.scryfall.concurrent_requests,
            1,
            10,
        )?;
        validate_range("scryfall.timeout_seconds", self.scryfall.timeout_seconds, 1, 300)?;
        validate_format_name("validation.default_format", &self.validation.default_format)?;
        validate_path("output.path", &self.output.path)?;
        validate_path("output.report_name", &self.output.report_name)?;
        Ok(())
    }
}
