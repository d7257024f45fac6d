//! Legality and deck-construction rules over looked-up card data.

use crate::domain::model::{CardLookupResult, ValidationError, ValidationErrorType, ValidationResult};

pub const COMMANDER_DECK_SIZE: usize = 100;

/// Trims every card name before lookup.
pub fn transform_decklist(card_names: &[String]) -> Vec<String> {
    card_names.iter().map(|name| name.trim().to_string()).collect()
}

/// Reports every card the database did not find, then every found card that
/// is not `legal` in `format`.
pub fn validate_card_data(results: &[CardLookupResult], format: &str) -> ValidationResult {
    let not_found = results
        .iter()
        .filter(|result| !result.found)
        .map(|result| ValidationError {
            card_name: result.card_name.clone(),
            error_type: ValidationErrorType::NotFound,
            message: format!(
                "Card \"{}\" not found in Scryfall database",
                result.card_name
            ),
        });

    let illegal = results
        .iter()
        .filter(|result| result.found)
        .filter_map(|result| result.data.as_ref())
        .filter(|card| !card.is_legal_in(format))
        .map(|card| ValidationError {
            card_name: card.name.clone(),
            error_type: ValidationErrorType::FormatViolation,
            message: format!("Card \"{}\" is not legal in {} format", card.name, format),
        });

    ValidationResult::from_errors(not_found.chain(illegal).collect())
}

/// Deck-level rules that depend only on the flattened name list.
pub fn validate_decklist(card_names: &[String], format: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if format.eq_ignore_ascii_case("commander") && card_names.len() != COMMANDER_DECK_SIZE {
        errors.push(ValidationError {
            card_name: String::new(),
            error_type: ValidationErrorType::DeckViolation,
            message: format!(
                "Commander decks must contain exactly {} cards, found {}",
                COMMANDER_DECK_SIZE,
                card_names.len()
            ),
        });
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ScryfallCard;
    use std::collections::HashMap;

    fn card(name: &str, legalities: &[(&str, &str)]) -> ScryfallCard {
        ScryfallCard {
            id: format!("id-{}", name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            legalities: legalities
                .iter()
                .map(|(format, status)| (format.to_string(), status.to_string()))
                .collect::<HashMap<_, _>>(),
            set: None,
            collector_number: None,
        }
    }

    fn names(count: usize) -> Vec<String> {
        vec!["Relentless Rats".to_string(); count]
    }

    #[test]
    fn test_transform_decklist_trims() {
        let trimmed = transform_decklist(&["  Sol Ring ".to_string(), "Island".to_string()]);
        assert_eq!(trimmed, vec!["Sol Ring", "Island"]);
    }

    #[test]
    fn test_not_found_then_format_violations() {
        let results = vec![
            CardLookupResult::found(card("Mana Crypt", &[("commander", "banned")])),
            CardLookupResult::not_found("Blightning Bolt"),
            CardLookupResult::found(card("Sol Ring", &[("commander", "legal")])),
        ];

        let result = validate_card_data(&results, "commander");

        assert!(!result.valid);
        let errors = result.error_list();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].error_type, ValidationErrorType::NotFound);
        assert_eq!(
            errors[0].message,
            "Card \"Blightning Bolt\" not found in Scryfall database"
        );
        assert_eq!(errors[1].error_type, ValidationErrorType::FormatViolation);
        assert_eq!(errors[1].card_name, "Mana Crypt");
        assert_eq!(
            errors[1].message,
            "Card \"Mana Crypt\" is not legal in commander format"
        );
    }

    #[test]
    fn test_missing_legality_entry_is_a_violation() {
        let results = vec![CardLookupResult::found(card("Sol Ring", &[("commander", "legal")]))];
        let result = validate_card_data(&results, "Oathbreaker");

        assert_eq!(result.error_list().len(), 1);
        assert_eq!(
            result.error_list()[0].message,
            "Card \"Sol Ring\" is not legal in Oathbreaker format"
        );
    }

    #[test]
    fn test_all_legal_is_valid() {
        let results = vec![CardLookupResult::found(card("Island", &[("standard", "legal")]))];
        let result = validate_card_data(&results, "STANDARD");
        assert!(result.valid);
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_commander_needs_exactly_one_hundred() {
        assert!(validate_decklist(&names(100), "commander").valid);

        for count in [99, 101] {
            let result = validate_decklist(&names(count), "Commander");
            let errors = result.error_list();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].error_type, ValidationErrorType::DeckViolation);
            assert_eq!(errors[0].card_name, "");
            assert!(errors[0].message.ends_with(&format!("found {}", count)));
        }
    }

    #[test]
    fn test_other_formats_have_no_size_rule() {
        assert!(validate_decklist(&names(7), "standard").valid);
        assert!(validate_decklist(&[], "unknown").valid);
    }
}
