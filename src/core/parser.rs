//! Line parser and deck assembler.
//!
//! Each line is classified by [`step`], which takes the current
//! [`ParseState`] and returns the next one together with a [`LineAction`].
//! [`parse`] folds the whole text through `step` and accumulates the
//! resulting entries into zones. Lines that do not parse are dropped.

use crate::core::inference::infer_deck_format;
use crate::domain::format::SourceFormat;
use crate::domain::model::{CardEntry, Deck, DeckMetadata};
use chrono::Utc;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Lines that switch the rest of the list into the sideboard.
pub const SIDEBOARD_MARKERS: [&str; 9] = [
    "SIDEBOARD:",
    "Sideboard",
    "SIDEBOARD",
    "sideboard",
    "SB:",
    "sb:",
    "//Sideboard",
    "// Sideboard",
    "// SIDEBOARD",
];

static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x20-\x7E\s_]").expect("printable filter compiles"));

static QUANTITY_AND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s+(.+?)$").expect("quantity pattern compiles"));

static BARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z].+?)$").expect("bare name pattern compiles"));

static MOXFIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]+)\s+(.+?)(?:\s+\(([A-Z0-9]{3,4})\))?(?:\s+([0-9]+[a-z]?s?))?(\s+\*F\*)?$",
    )
    .expect("moxfield line pattern compiles")
});

// Name runs up to the first '(' instead of matching lazily. Every line this
// accepts is already accepted by MOXFIELD_LINE, so it is a fallback only.
static MOXFIELD_LINE_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]+)\s+([^(]+)(?:\s+\(([A-Z0-9]{3,4})\))?(?:\s+([0-9]+[a-z]?s?))?(\s+\*F\*)?$",
    )
    .expect("loose moxfield line pattern compiles")
});

static FACE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*//\s*").expect("face separator pattern compiles"));

static DECK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Name\s+(.*?)(?:\n|$)").expect("deck name pattern compiles"));

/// Section state carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Once set, stays set for the rest of the text.
    pub in_sideboard: bool,
    pub in_about_section: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Mainboard,
    Sideboard,
    Commanders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Blank line, section marker, header, or metadata.
    Skip,
    Card { zone: Zone, entry: CardEntry },
    /// A candidate card line that matched no pattern.
    Unparsed,
}

fn is_sideboard_marker(trimmed: &str) -> bool {
    SIDEBOARD_MARKERS.contains(&trimmed)
}

fn contains_sideboard_marker(line: &str) -> bool {
    SIDEBOARD_MARKERS.iter().any(|marker| line.contains(marker))
}

fn is_commander_line(line: &str, has_commander: bool) -> bool {
    line.contains("*CMDR*")
        || (line.contains("*F*") && !has_commander)
        || line.to_lowercase().contains("commander:")
}

/// Classifies one line. `has_commander` tells whether a commander has
/// already been recorded, which changes how a `*F*` line is read.
pub fn step(
    state: ParseState,
    line: &str,
    source: &SourceFormat,
    has_commander: bool,
) -> (ParseState, LineAction) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return (state, LineAction::Skip);
    }

    if is_sideboard_marker(trimmed) {
        let next = ParseState {
            in_sideboard: true,
            ..state
        };
        return (next, LineAction::Skip);
    }

    if trimmed == "Deck" {
        let next = ParseState {
            in_about_section: false,
            ..state
        };
        return (next, LineAction::Skip);
    }

    if *source == SourceFormat::Unknown && contains_sideboard_marker(line) {
        let next = ParseState {
            in_sideboard: true,
            ..state
        };
        return (next, LineAction::Skip);
    }

    if trimmed == "About" {
        let next = ParseState {
            in_about_section: true,
            ..state
        };
        return (next, LineAction::Skip);
    }

    if state.in_about_section {
        return (state, LineAction::Skip);
    }

    let commander_candidate = matches!(source, SourceFormat::Moxfield | SourceFormat::Unknown)
        && !state.in_sideboard
        && is_commander_line(line, has_commander);

    let action = match parse_card_line(line, source) {
        Some(entry) => {
            let zone = if state.in_sideboard {
                Zone::Sideboard
            } else if commander_candidate {
                Zone::Commanders
            } else {
                Zone::Mainboard
            };
            LineAction::Card { zone, entry }
        }
        None => LineAction::Unparsed,
    };

    (state, action)
}

fn quantity_from(caps: &Captures<'_>) -> Option<u32> {
    caps.get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|quantity| *quantity >= 1)
}

fn parse_quantity_line(line: &str) -> Option<CardEntry> {
    let caps = QUANTITY_AND_NAME.captures(line)?;
    Some(CardEntry::new(quantity_from(&caps)?, caps[2].trim()))
}

fn parse_bare_name(line: &str) -> Option<CardEntry> {
    let caps = BARE_NAME.captures(line)?;
    Some(CardEntry::new(1, caps[1].trim()))
}

fn parse_moxfield_line(line: &str) -> Option<CardEntry> {
    let caps = MOXFIELD_LINE
        .captures(line)
        .or_else(|| MOXFIELD_LINE_LOOSE.captures(line))?;

    Some(CardEntry {
        quantity: quantity_from(&caps)?,
        name: caps[2].trim().to_string(),
        set: caps.get(3).map(|m| m.as_str().to_string()),
        collector_number: caps.get(4).map(|m| m.as_str().to_string()),
        is_foil: caps.get(5).map(|_| true),
    })
}

/// Parses a single card line for the given source format.
///
/// Characters outside printable ASCII (other than whitespace) are removed
/// first. Returns `None` when the line has no usable quantity or name.
pub fn parse_card_line(line: &str, source: &SourceFormat) -> Option<CardEntry> {
    let clean = NON_PRINTABLE.replace_all(line, "");

    let mut entry = match source {
        SourceFormat::Mtgo | SourceFormat::Mtga => parse_quantity_line(&clean),
        SourceFormat::Unknown => {
            parse_quantity_line(&clean).or_else(|| parse_bare_name(&clean))
        }
        SourceFormat::Moxfield => parse_moxfield_line(&clean),
        SourceFormat::Other(_) => parse_quantity_line(&clean),
    }?;

    if entry.name.contains("//") {
        entry.name = FACE_SEPARATOR
            .replace(&entry.name, " // ")
            .trim()
            .to_string();
    }
    if entry.name.is_empty() {
        return None;
    }

    Some(entry)
}

/// Deck name from an MTGA-style `About` block.
pub fn derive_deck_name(content: &str, source: &SourceFormat) -> Option<String> {
    if !matches!(source, SourceFormat::Mtga | SourceFormat::Unknown)
        || !content.contains("About")
        || !content.contains("Name")
    {
        return None;
    }

    DECK_NAME
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

#[derive(Debug, Default)]
struct DeckAccumulator {
    mainboard: Vec<CardEntry>,
    sideboard: Vec<CardEntry>,
    commanders: Vec<CardEntry>,
    card_count: u32,
    sideboard_count: u32,
    skipped_lines: usize,
}

impl DeckAccumulator {
    fn apply(&mut self, action: LineAction) {
        match action {
            LineAction::Skip => {}
            LineAction::Unparsed => self.skipped_lines += 1,
            LineAction::Card { zone, entry } => match zone {
                Zone::Sideboard => {
                    self.sideboard_count = self.sideboard_count.saturating_add(entry.quantity);
                    self.sideboard.push(entry);
                }
                Zone::Commanders => self.commanders.push(entry),
                Zone::Mainboard => {
                    self.card_count = self.card_count.saturating_add(entry.quantity);
                    self.mainboard.push(entry);
                }
            },
        }
    }
}

/// Parses `content` as a decklist exported by `source`, inferring the deck format.
pub fn parse(content: &str, source: &SourceFormat) -> Deck {
    parse_with_format(content, source, None)
}

/// Parses `content` as a decklist exported by `source`.
///
/// When `explicit_format` is given it is used as the deck format and
/// inference is skipped.
pub fn parse_with_format(
    content: &str,
    source: &SourceFormat,
    explicit_format: Option<&str>,
) -> Deck {
    let (_, acc) = content.trim().split('\n').fold(
        (ParseState::default(), DeckAccumulator::default()),
        |(state, mut acc), line| {
            let (next, action) = step(state, line, source, !acc.commanders.is_empty());
            acc.apply(action);
            (next, acc)
        },
    );

    if acc.skipped_lines > 0 {
        tracing::debug!("Skipped {} unparseable lines", acc.skipped_lines);
    }

    let format = match explicit_format {
        Some(format) => format.to_string(),
        None => infer_deck_format(!acc.commanders.is_empty(), acc.card_count)
            .as_str()
            .to_string(),
    };

    Deck {
        name: derive_deck_name(content, source),
        format: Some(format),
        metadata: DeckMetadata {
            source: source.to_string(),
            card_count: acc.card_count,
            unique_card_count: acc.mainboard.len() as u32,
            sideboard_count: acc.sideboard_count,
            parse_date: Utc::now(),
        },
        mainboard: acc.mainboard,
        sideboard: acc.sideboard,
        commanders: acc.commanders,
    }
}
