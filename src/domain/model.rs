use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed decklist line.
///
/// `set`, `collector_number` and `is_foil` are left out of the JSON entirely
/// when the line did not carry them; `is_foil` is only ever `Some(true)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    pub quantity: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_foil: Option<bool>,
}

impl CardEntry {
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            set: None,
            collector_number: None,
            is_foil: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckMetadata {
    pub source: String,
    pub card_count: u32,
    /// Number of mainboard entries (lines), not distinct card names.
    pub unique_card_count: u32,
    pub sideboard_count: u32,
    pub parse_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub mainboard: Vec<CardEntry>,
    pub sideboard: Vec<CardEntry>,
    pub commanders: Vec<CardEntry>,
    pub metadata: DeckMetadata,
}

impl Deck {
    fn validated_entries(&self, include_commanders: bool) -> impl Iterator<Item = &CardEntry> {
        let commanders: &[CardEntry] = if include_commanders {
            &self.commanders
        } else {
            &[]
        };

        self.mainboard
            .iter()
            .chain(self.sideboard.iter())
            .chain(commanders.iter())
    }

    /// Number of physical cards `card_names` would produce.
    pub fn total_quantity(&self, include_commanders: bool) -> u64 {
        self.validated_entries(include_commanders)
            .map(|card| u64::from(card.quantity))
            .sum()
    }

    /// Flattens the deck into one name per physical card, mainboard first,
    /// then sideboard, then (optionally) commanders.
    pub fn card_names(&self, include_commanders: bool) -> Vec<String> {
        self.validated_entries(include_commanders)
            .flat_map(|card| std::iter::repeat(card.name.clone()).take(card.quantity as usize))
            .collect()
    }

    pub fn zones(&self) -> DeckZones {
        DeckZones {
            mainboard: self.mainboard.clone(),
            sideboard: self.sideboard.clone(),
            commanders: if self.commanders.is_empty() {
                None
            } else {
                Some(self.commanders.clone())
            },
        }
    }
}

/// The zone collections echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckZones {
    pub mainboard: Vec<CardEntry>,
    pub sideboard: Vec<CardEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commanders: Option<Vec<CardEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorType {
    NotFound,
    FormatViolation,
    DeckViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub card_name: String,
    pub error_type: ValidationErrorType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self {
                valid: true,
                errors: None,
            }
        } else {
            Self {
                valid: false,
                errors: Some(errors),
            }
        }
    }

    pub fn error_list(&self) -> &[ValidationError] {
        self.errors.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub deck_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub deck: DeckZones,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,
}

/// Card record returned by the card database. Only the fields the
/// validator reads are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub legalities: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
}

impl ScryfallCard {
    pub fn is_legal_in(&self, format: &str) -> bool {
        self.legalities
            .get(&format.to_lowercase())
            .is_some_and(|status| status == "legal")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLookupResult {
    pub card_name: String,
    pub found: bool,
    pub data: Option<ScryfallCard>,
}

impl CardLookupResult {
    pub fn found(card: ScryfallCard) -> Self {
        Self {
            card_name: card.name.clone(),
            found: true,
            data: Some(card),
        }
    }

    pub fn not_found(card_name: impl Into<String>) -> Self {
        Self {
            card_name: card_name.into(),
            found: false,
            data: None,
        }
    }
}

/// What the pipeline writes out: a converted deck, or a full validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeckReport {
    Converted(Deck),
    Validated(ValidationResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck() -> Deck {
        Deck {
            name: None,
            format: None,
            mainboard: vec![CardEntry::new(4, "Lightning Bolt"), CardEntry::new(2, "Mountain")],
            sideboard: vec![CardEntry::new(3, "Abrade")],
            commanders: vec![CardEntry::new(1, "Krenko, Mob Boss")],
            metadata: DeckMetadata {
                source: "mtgo".to_string(),
                card_count: 6,
                unique_card_count: 2,
                sideboard_count: 3,
                parse_date: Utc::now(),
            },
        }
    }

    #[test]
    fn test_card_names_expands_quantities() {
        let deck = sample_deck();
        let names = deck.card_names(false);

        assert_eq!(names.len(), 9);
        assert!(names[..4].iter().all(|name| name == "Lightning Bolt"));
        assert_eq!(names[8], "Abrade");
    }

    #[test]
    fn test_card_names_can_include_commanders() {
        let names = sample_deck().card_names(true);
        assert_eq!(names.len(), 10);
        assert_eq!(names.last().unwrap(), "Krenko, Mob Boss");
    }

    #[test]
    fn test_total_quantity_matches_card_names() {
        let deck = sample_deck();
        assert_eq!(deck.total_quantity(false), deck.card_names(false).len() as u64);
        assert_eq!(deck.total_quantity(true), 10);
    }

    #[test]
    fn test_total_quantity_does_not_overflow() {
        let mut deck = sample_deck();
        deck.mainboard.push(CardEntry::new(u32::MAX, "Island"));
        deck.sideboard.push(CardEntry::new(u32::MAX, "Swamp"));

        assert_eq!(deck.total_quantity(false), 2 * u64::from(u32::MAX) + 9);
    }

    #[test]
    fn test_card_entry_omits_absent_fields() {
        let json = serde_json::to_value(CardEntry::new(1, "Sol Ring")).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": 1, "name": "Sol Ring"}));
    }

    #[test]
    fn test_valid_result_omits_errors() {
        let json = serde_json::to_value(ValidationResult::from_errors(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({"valid": true}));
    }

    #[test]
    fn test_validation_error_wire_names() {
        let error = ValidationError {
            card_name: String::new(),
            error_type: ValidationErrorType::DeckViolation,
            message: "Commander decks must contain exactly 100 cards, found 99".to_string(),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["errorType"], "DECK_VIOLATION");
        assert_eq!(json["cardName"], "");
    }

    #[test]
    fn test_legality_lookup_is_case_insensitive_on_format() {
        let card = ScryfallCard {
            id: "e2d1f479".to_string(),
            name: "Sol Ring".to_string(),
            legalities: HashMap::from([
                ("commander".to_string(), "legal".to_string()),
                ("modern".to_string(), "not_legal".to_string()),
            ]),
            set: None,
            collector_number: None,
        };

        assert!(card.is_legal_in("Commander"));
        assert!(!card.is_legal_in("modern"));
        assert!(!card.is_legal_in("pauper"));
    }
}
