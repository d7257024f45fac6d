use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Tool that exported a decklist, as recognised by the format detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Mtga,
    Moxfield,
    Mtgo,
    Unknown,
    /// A caller-supplied tag outside the detected set; parsed with the bare
    /// `quantity name` pattern.
    Other(String),
}

impl SourceFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mtga => "mtga",
            Self::Moxfield => "moxfield",
            Self::Mtgo => "mtgo",
            Self::Unknown => "unknown",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "mtga" => Self::Mtga,
            "moxfield" => Self::Moxfield,
            "mtgo" => Self::Mtgo,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        })
    }
}

/// Play format inferred from deck shape when the caller gave none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    Commander,
    Standard,
    Limited,
    Unknown,
}

impl DeckFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commander => "commander",
            Self::Standard => "standard",
            Self::Limited => "limited",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeckFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_round_trips_through_str() {
        for tag in ["mtga", "moxfield", "mtgo", "unknown"] {
            let parsed: SourceFormat = tag.parse().unwrap();
            assert_eq!(parsed.as_str(), tag);
        }
    }

    #[test]
    fn test_unrecognised_source_is_generic() {
        let parsed: SourceFormat = "archidekt".parse().unwrap();
        assert_eq!(parsed, SourceFormat::Other("archidekt".to_string()));
        assert_eq!(parsed.to_string(), "archidekt");
    }
}
