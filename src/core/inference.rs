use crate::domain::format::DeckFormat;

/// Guesses the play format from deck shape. Checks run in a fixed order and
/// the first hit wins; downstream deck-size rules key off the result.
pub fn infer_deck_format(has_commanders: bool, card_count: u32) -> DeckFormat {
    if has_commanders {
        return DeckFormat::Commander;
    }

    match card_count {
        100 => DeckFormat::Commander,
        60..=63 => DeckFormat::Standard,
        40..=45 => DeckFormat::Limited,
        98 | 99 => DeckFormat::Commander,
        _ => DeckFormat::Unknown,
    }
}
