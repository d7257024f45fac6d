use crate::core::convert::{convert_deck_text_as, normalize_line_endings};
use crate::core::rules::{transform_decklist, validate_card_data, validate_decklist};
use crate::domain::format::SourceFormat;
use crate::domain::model::{ValidationRequest, ValidationResponse, ValidationResult};
use crate::domain::ports::{CardLookup, ConfigProvider};
use crate::utils::error::{DeckError, Result};
use crate::utils::validation::{validate_card_total, validate_deck_text};

pub const DEFAULT_FORMAT: &str = "commander";

/// Converts decklists and checks them against the card database and deck rules.
pub struct DeckValidator<L: CardLookup> {
    lookup: L,
    default_format: String,
    include_commanders: bool,
    source: Option<SourceFormat>,
}

impl<L: CardLookup> DeckValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            default_format: DEFAULT_FORMAT.to_string(),
            include_commanders: false,
            source: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(lookup: L, config: &C) -> Self {
        Self {
            lookup,
            default_format: config.default_format().to_string(),
            include_commanders: config.include_commanders(),
            source: None,
        }
    }

    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// Count the commanders zone towards the validated card list.
    pub fn with_include_commanders(mut self, include: bool) -> Self {
        self.include_commanders = include;
        self
    }

    /// Parse every request as `source` instead of detecting the format.
    pub fn with_source(mut self, source: Option<SourceFormat>) -> Self {
        self.source = source;
        self
    }

    /// Looks up `cards` and applies card and deck rules for `format`.
    pub async fn validate_deck(&self, cards: &[String], format: &str) -> Result<ValidationResult> {
        let names = transform_decklist(cards);

        tracing::debug!("Looking up {} card names", names.len());
        let card_data = self.lookup.fetch_card_data(&names).await?;

        let card_validation = validate_card_data(&card_data, format);
        let deck_validation = validate_decklist(cards, format);

        let errors = card_validation
            .errors
            .into_iter()
            .flatten()
            .chain(deck_validation.errors.into_iter().flatten())
            .collect();

        Ok(ValidationResult::from_errors(errors))
    }

    /// Full request flow: reject empty text, convert, flatten, validate.
    ///
    /// Anything other than a bad request is reported as an internal error.
    pub async fn validate_deck_text(&self, request: &ValidationRequest) -> Result<ValidationResponse> {
        validate_deck_text(&request.deck_text)?;

        self.convert_and_validate(request).await.map_err(|e| {
            if e.is_bad_request() {
                e
            } else {
                tracing::error!("Error converting and validating decklist: {}", e);
                DeckError::internal(e.to_string())
            }
        })
    }

    async fn convert_and_validate(&self, request: &ValidationRequest) -> Result<ValidationResponse> {
        let override_format = request
            .format
            .as_deref()
            .map(str::trim)
            .filter(|format| !format.is_empty());

        let deck_text = normalize_line_endings(&request.deck_text);
        let deck = convert_deck_text_as(&deck_text, self.source.clone(), override_format);

        validate_card_total(deck.total_quantity(self.include_commanders))?;
        let cards = deck.card_names(self.include_commanders);
        let format = override_format
            .or(deck.format.as_deref())
            .unwrap_or(&self.default_format)
            .to_string();

        tracing::info!(
            "Validating {} cards from {} deck as {}",
            cards.len(),
            deck.metadata.source,
            format
        );

        let result = self.validate_deck(&cards, &format).await?;
        if !result.valid {
            tracing::info!("Deck failed validation with {} errors", result.error_list().len());
        }

        Ok(ValidationResponse {
            valid: result.valid,
            deck: deck.zones(),
            errors: result.errors,
        })
    }
}
