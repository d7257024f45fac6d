use deck_validator::domain::model::{DeckReport, ValidationErrorType, ValidationRequest};
use deck_validator::{
    DeckEngine, DeckPipeline, DeckValidator, LocalStorage, PipelineOptions, ScryfallClient,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn scryfall_card(name: &str, commander: &str) -> serde_json::Value {
    serde_json::json!({
        "object": "card",
        "id": format!("id-{}", name.to_lowercase().replace(' ', "-")),
        "name": name,
        "legalities": {"commander": commander, "standard": "not_legal"}
    })
}

fn commander_deck(mountains: u32) -> String {
    format!("1 Sol Ring\n{} Mountain\n", mountains)
}

fn options(convert_only: bool) -> PipelineOptions {
    PipelineOptions {
        input_path: "deck.txt".to_string(),
        output_path: "reports".to_string(),
        report_name: "deck_report.json".to_string(),
        source: None,
        format: None,
        convert_only,
    }
}

#[tokio::test]
async fn test_hundred_card_commander_deck_is_valid() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().to_string_lossy().into_owned();
    std::fs::write(temp_dir.path().join("deck.txt"), commander_deck(99)).unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/cards/collection");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "object": "list",
                "not_found": [],
                "data": [scryfall_card("Sol Ring", "legal"), scryfall_card("Mountain", "legal")]
            }));
    });

    let lookup = ScryfallClient::new(server.base_url()).unwrap();
    let pipeline = DeckPipeline::new(
        LocalStorage::new(base),
        DeckValidator::new(lookup),
        options(false),
    );

    let summary = DeckEngine::new(pipeline).run().await.unwrap();

    // 100 names in chunks of 75
    api_mock.assert_hits(2);
    match &summary.report {
        DeckReport::Validated(response) => {
            assert!(response.valid, "{:?}", response.errors);
            assert!(response.errors.is_none());
        }
        other => panic!("expected validation response, got {:?}", other),
    }

    let written = std::fs::read(temp_dir.path().join("reports/deck_report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&written).unwrap();
    assert_eq!(json["valid"], true);
    assert!(json.get("errors").is_none());
    assert_eq!(json["deck"]["mainboard"][1]["name"], "Mountain");
}

#[tokio::test]
async fn test_ninety_nine_cards_gives_one_deck_violation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cards/collection");
        then.status(200).json_body(serde_json::json!({
            "not_found": [],
            "data": [scryfall_card("Sol Ring", "legal"), scryfall_card("Mountain", "legal")]
        }));
    });

    let validator = DeckValidator::new(ScryfallClient::new(server.base_url()).unwrap())
        .with_default_format("commander");
    let response = validator
        .validate_deck_text(&ValidationRequest {
            deck_text: commander_deck(98),
            format: Some("commander".to_string()),
        })
        .await
        .unwrap();

    assert!(!response.valid);
    let errors = response.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, ValidationErrorType::DeckViolation);
    assert_eq!(errors[0].card_name, "");
    assert_eq!(
        errors[0].message,
        "Commander decks must contain exactly 100 cards, found 99"
    );
}

#[tokio::test]
async fn test_illegal_and_missing_cards_are_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cards/collection");
        then.status(200).json_body(serde_json::json!({
            "not_found": [{"name": "Blightning Bolt"}],
            "data": [scryfall_card("Mana Crypt", "banned")]
        }));
    });

    let validator = DeckValidator::new(ScryfallClient::new(server.base_url()).unwrap());
    let response = validator
        .validate_deck_text(&ValidationRequest {
            deck_text: "1 Mana Crypt\n1 Blightning Bolt\n".to_string(),
            format: Some("Commander".to_string()),
        })
        .await
        .unwrap();

    let errors = response.errors.unwrap();
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Card \"Blightning Bolt\" not found in Scryfall database",
            "Card \"Mana Crypt\" is not legal in Commander format",
            "Commander decks must contain exactly 100 cards, found 2",
        ]
    );
}

#[tokio::test]
async fn test_unavailable_database_marks_cards_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cards/collection");
        then.status(503);
    });

    let validator = DeckValidator::new(ScryfallClient::new(server.base_url()).unwrap());
    let response = validator
        .validate_deck_text(&ValidationRequest {
            deck_text: "2 Lightning Bolt".to_string(),
            format: Some("standard".to_string()),
        })
        .await
        .unwrap();

    assert!(!response.valid);
    let errors = response.errors.unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| e.error_type == ValidationErrorType::NotFound));
}

#[tokio::test]
async fn test_blank_deck_text_is_bad_request() {
    let validator = DeckValidator::new(ScryfallClient::new("http://127.0.0.1:9").unwrap());

    let err = validator
        .validate_deck_text(&ValidationRequest {
            deck_text: " \n\t\n".to_string(),
            format: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(
        err.user_friendly_message(),
        "Deck text is required and must not be empty"
    );
}

#[test]
fn test_convert_only_run_writes_deck_without_lookups() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().to_string_lossy().into_owned();
    std::fs::write(temp_dir.path().join("deck.txt"), "4 Island\r\n4 Swamp\r\n").unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/cards/collection");
        then.status(200).json_body(serde_json::json!({"data": []}));
    });

    let pipeline = DeckPipeline::new(
        LocalStorage::new(base),
        DeckValidator::new(ScryfallClient::new(server.base_url()).unwrap()),
        options(true),
    );
    let summary = tokio_test::block_on(DeckEngine::new(pipeline).run()).unwrap();

    api_mock.assert_hits(0);
    assert_eq!(summary.output_path, "reports/deck_report.json");

    let written = std::fs::read(temp_dir.path().join("reports/deck_report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&written).unwrap();
    assert_eq!(json["metadata"]["source"], "mtgo");
    assert_eq!(json["metadata"]["cardCount"], 8);
    assert_eq!(json["mainboard"][1]["name"], "Swamp");
}
