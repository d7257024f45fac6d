use crate::utils::error::{DeckError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Largest number of identifiers the Scryfall collection endpoint accepts per request.
pub const MAX_LOOKUP_CHUNK_SIZE: usize = 75;

/// Upper bound on physical cards sent to the card lookup.
pub const MAX_DECK_CARDS: u64 = 10_000;

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> DeckError {
    DeckError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_chunk_size(field_name: &str, value: usize) -> Result<()> {
    validate_range(field_name, value, 1, MAX_LOOKUP_CHUNK_SIZE)
}

/// Deck format names are used as legality keys, so they must be a single lowercase-able word.
pub fn validate_format_name(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Format cannot be empty or whitespace-only",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            field_name,
            value,
            "Format may only contain letters, digits and underscores",
        ));
    }
    Ok(())
}

/// Request-level check; an empty deck is the caller's fault, not a config problem.
pub fn validate_deck_text(deck_text: &str) -> Result<()> {
    if deck_text.trim().is_empty() {
        return Err(DeckError::bad_request(
            "Deck text is required and must not be empty",
        ));
    }
    Ok(())
}

pub fn validate_card_total(total: u64) -> Result<()> {
    if total > MAX_DECK_CARDS {
        return Err(DeckError::bad_request(format!(
            "Deck contains {} cards; at most {} can be validated",
            total, MAX_DECK_CARDS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("scryfall.endpoint", "https://api.scryfall.com").is_ok());
        assert!(validate_url("scryfall.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("scryfall.endpoint", "").is_err());
        assert!(validate_url("scryfall.endpoint", "not a url").is_err());
        assert!(validate_url("scryfall.endpoint", "ftp://api.scryfall.com").is_err());
    }

    #[test]
    fn test_validate_chunk_size() {
        assert!(validate_chunk_size("scryfall.chunk_size", 75).is_ok());
        assert!(validate_chunk_size("scryfall.chunk_size", 1).is_ok());
        assert!(validate_chunk_size("scryfall.chunk_size", 0).is_err());
        assert!(validate_chunk_size("scryfall.chunk_size", 76).is_err());
    }

    #[test]
    fn test_validate_format_name() {
        assert!(validate_format_name("format", "commander").is_ok());
        assert!(validate_format_name("format", "Pauper").is_ok());
        assert!(validate_format_name("format", "  ").is_err());
        assert!(validate_format_name("format", "legacy; drop").is_err());
    }

    #[test]
    fn test_validate_card_total() {
        assert!(validate_card_total(100).is_ok());
        assert!(validate_card_total(MAX_DECK_CARDS).is_ok());
        assert!(validate_card_total(MAX_DECK_CARDS + 1).unwrap_err().is_bad_request());
    }

    #[test]
    fn test_validate_deck_text_is_bad_request() {
        let err = validate_deck_text(" \n\t ").unwrap_err();
        assert!(err.is_bad_request());
        assert!(validate_deck_text("1 Sol Ring").is_ok());
    }
}
