//! Entry points from raw text to a [`Deck`].

use crate::core::{detector, parser};
use crate::domain::format::SourceFormat;
use crate::domain::model::Deck;

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Detects the source format and parses the deck.
pub fn convert_deck_text(deck_text: &str) -> Deck {
    convert_deck_text_as(deck_text, None, None)
}

/// Like [`convert_deck_text`], but a forced `source` skips detection and an
/// `explicit_format` skips deck-format inference.
pub fn convert_deck_text_as(
    deck_text: &str,
    source: Option<SourceFormat>,
    explicit_format: Option<&str>,
) -> Deck {
    let source = source.unwrap_or_else(|| detector::detect(deck_text));
    let deck = parser::parse_with_format(deck_text, &source, explicit_format);

    tracing::debug!(
        "Converted {} deck: {} mainboard, {} sideboard, {} commander entries",
        deck.metadata.source,
        deck.mainboard.len(),
        deck.sideboard.len(),
        deck.commanders.len()
    );
    deck
}
