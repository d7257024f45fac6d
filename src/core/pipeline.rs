use crate::core::convert::{convert_deck_text_as, normalize_line_endings};
use crate::core::validator::DeckValidator;
use crate::domain::format::SourceFormat;
use crate::domain::model::{DeckReport, ValidationRequest};
use crate::domain::ports::{CardLookup, Pipeline, Storage};
use crate::utils::error::{DeckError, Result};
use crate::utils::validation::validate_deck_text;

/// Where the deck comes from and what to do with it.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input_path: String,
    pub output_path: String,
    pub report_name: String,
    pub source: Option<SourceFormat>,
    pub format: Option<String>,
    pub convert_only: bool,
}

/// Reads a decklist from storage, converts (and optionally validates) it,
/// and writes the JSON report back to storage.
pub struct DeckPipeline<S: Storage, L: CardLookup> {
    storage: S,
    validator: DeckValidator<L>,
    options: PipelineOptions,
}

impl<S: Storage, L: CardLookup> DeckPipeline<S, L> {
    pub fn new(storage: S, validator: DeckValidator<L>, options: PipelineOptions) -> Self {
        let validator = validator.with_source(options.source.clone());
        Self {
            storage,
            validator,
            options,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, L: CardLookup> Pipeline for DeckPipeline<S, L> {
    async fn extract(&self) -> Result<ValidationRequest> {
        tracing::debug!("Reading decklist from {}", self.options.input_path);
        let bytes = self.storage.read_file(&self.options.input_path).await?;

        let deck_text = String::from_utf8(bytes)
            .map_err(|_| DeckError::bad_request("Deck text must be valid UTF-8"))?;

        Ok(ValidationRequest {
            deck_text,
            format: self.options.format.clone(),
        })
    }

    async fn transform(&self, request: ValidationRequest) -> Result<DeckReport> {
        if self.options.convert_only {
            validate_deck_text(&request.deck_text)?;
            let deck_text = normalize_line_endings(&request.deck_text);
            let deck = convert_deck_text_as(
                &deck_text,
                self.options.source.clone(),
                request.format.as_deref(),
            );
            return Ok(DeckReport::Converted(deck));
        }

        let response = self.validator.validate_deck_text(&request).await?;
        Ok(DeckReport::Validated(response))
    }

    async fn load(&self, report: &DeckReport) -> Result<String> {
        let output_path = format!("{}/{}", self.options.output_path, self.options.report_name);
        let json = serde_json::to_vec_pretty(report)?;

        tracing::debug!("Writing report ({} bytes) to {}", json.len(), output_path);
        self.storage.write_file(&output_path, &json).await?;

        Ok(output_path)
    }
}
