//! Format sniffing for raw decklist text.
//!
//! Rules are evaluated top to bottom and the first one that matches wins.
//! Detection never fails: text that matches nothing is `unknown`.

use crate::domain::format::SourceFormat;
use regex::Regex;
use std::sync::LazyLock;

/// Share of non-blank lines that must look like `quantity name` for mtgo.
const MTGO_LINE_RATIO: f64 = 0.7;

const MOXFIELD_MARKERS: [&str; 3] = ["*CMDR*", "*F*", "SIDEBOARD:"];

static MOXFIELD_PRINTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\s+.+?\s+\([A-Z0-9]{3,4}\)\s+[0-9]+[a-z]?s?")
        .expect("moxfield printing pattern compiles")
});

static QUANTITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\s+[^0-9]").expect("quantity line pattern compiles")
});

type DetectionRule = fn(&str) -> bool;

fn looks_like_mtga(content: &str) -> bool {
    content.contains("About") && content.contains("Name") && content.contains("Deck")
}

fn looks_like_moxfield(content: &str) -> bool {
    MOXFIELD_PRINTING.is_match(content)
        || MOXFIELD_MARKERS.iter().any(|marker| content.contains(marker))
}

fn looks_like_mtgo(content: &str) -> bool {
    let lines: Vec<&str> = content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let quantity_lines = lines
        .iter()
        .filter(|line| QUANTITY_LINE.is_match(line))
        .count();

    quantity_lines as f64 > lines.len() as f64 * MTGO_LINE_RATIO
}

/// Classifies `content` into the tool that most likely exported it.
pub fn detect(content: &str) -> SourceFormat {
    let rules: [(DetectionRule, SourceFormat); 3] = [
        (looks_like_mtga, SourceFormat::Mtga),
        (looks_like_moxfield, SourceFormat::Moxfield),
        (looks_like_mtgo, SourceFormat::Mtgo),
    ];

    let detected = rules
        .into_iter()
        .find(|(rule, _)| rule(content))
        .map(|(_, format)| format)
        .unwrap_or(SourceFormat::Unknown);

    tracing::debug!("Detected decklist source format: {}", detected);
    detected
}
