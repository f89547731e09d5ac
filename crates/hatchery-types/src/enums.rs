//! Enumeration types for the Hatchery collection game.
//!
//! Every enum here has a stable string label used both on the wire (serde)
//! and in the embedded store's text columns.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A label could not be parsed into one of the known enum values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {label:?}")]
pub struct ParseLabelError {
    /// Which enum was being parsed (e.g. `"rarity"`).
    pub kind: &'static str,
    /// The offending input.
    pub label: String,
}

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

/// Rarity tier of a creature, ordered lowest (`F`) to highest (`S+`).
///
/// The derived [`Ord`] follows declaration order, so `Rarity::F <
/// Rarity::SPlus`. Resale value and sort rank are separate lookup tables in
/// `hatchery-economy`; neither is derived from this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Rarity {
    /// Lowest tier.
    F,
    /// Tier E.
    E,
    /// Tier D.
    D,
    /// Tier C.
    C,
    /// Tier B.
    B,
    /// Tier A.
    A,
    /// Tier S.
    S,
    /// Highest tier, labelled `S+`.
    #[serde(rename = "S+")]
    SPlus,
}

impl Rarity {
    /// All eight tiers, lowest first.
    pub const ALL: [Self; 8] = [
        Self::F,
        Self::E,
        Self::D,
        Self::C,
        Self::B,
        Self::A,
        Self::S,
        Self::SPlus,
    ];

    /// The display and storage label (`"F"` .. `"S+"`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::F => "F",
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
            Self::SPlus => "S+",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rarity {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.label() == normalized)
            .ok_or_else(|| ParseLabelError {
                kind: "rarity",
                label: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Creature status
// ---------------------------------------------------------------------------

/// Ownership status of a creature record. `Resold` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CreatureStatus {
    /// In the collection; can be resold or evolved.
    Owned,
    /// Sold back for tokens. No further actions apply.
    Resold,
}

impl CreatureStatus {
    /// The storage label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Owned => "owned",
            Self::Resold => "resold",
        }
    }
}

impl fmt::Display for CreatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CreatureStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owned" => Ok(Self::Owned),
            "resold" => Ok(Self::Resold),
            other => Err(ParseLabelError {
                kind: "status",
                label: other.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Sort mode
// ---------------------------------------------------------------------------

/// Display ordering for the collection grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum SortMode {
    /// Newest first by creation timestamp.
    #[default]
    DateDesc,
    /// Oldest first by creation timestamp.
    DateAsc,
    /// Lowest rarity first.
    RarityAsc,
    /// Highest rarity first.
    RarityDesc,
    /// Name A to Z.
    NameAsc,
    /// Name Z to A.
    NameDesc,
}

impl SortMode {
    /// All six modes in selector order.
    pub const ALL: [Self; 6] = [
        Self::DateDesc,
        Self::DateAsc,
        Self::RarityAsc,
        Self::RarityDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// The wire label (`"date-desc"`, ...).
    pub const fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::RarityAsc => "rarity-asc",
            Self::RarityDesc => "rarity-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "sort mode",
                label: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Notice kind
// ---------------------------------------------------------------------------

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum NoticeKind {
    /// A workflow completed.
    Success,
    /// A workflow failed.
    Error,
    /// A precondition was not met; nothing changed.
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_order_is_lowest_to_highest() {
        let mut shuffled = vec![Rarity::S, Rarity::F, Rarity::SPlus, Rarity::C, Rarity::A];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Rarity::F, Rarity::C, Rarity::A, Rarity::S, Rarity::SPlus]
        );
    }

    #[test]
    fn rarity_labels_parse_back() {
        for rarity in Rarity::ALL {
            assert_eq!(rarity.label().parse::<Rarity>(), Ok(rarity));
        }
        assert_eq!("s+".parse::<Rarity>(), Ok(Rarity::SPlus));
        assert!("Z".parse::<Rarity>().is_err());
    }

    #[test]
    fn rarity_serializes_with_plus_label() {
        let json = serde_json::to_string(&Rarity::SPlus).unwrap_or_default();
        assert_eq!(json, "\"S+\"");
        let back: Result<Rarity, _> = serde_json::from_str("\"S+\"");
        assert_eq!(back.ok(), Some(Rarity::SPlus));
    }

    #[test]
    fn sort_mode_wire_labels() {
        assert_eq!(SortMode::default(), SortMode::DateDesc);
        let json = serde_json::to_string(&SortMode::RarityDesc).unwrap_or_default();
        assert_eq!(json, "\"rarity-desc\"");
        for mode in SortMode::ALL {
            assert_eq!(mode.label().parse::<SortMode>(), Ok(mode));
        }
        assert!("newest".parse::<SortMode>().is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!("resold".parse::<CreatureStatus>(), Ok(CreatureStatus::Resold));
        assert_eq!(CreatureStatus::Owned.to_string(), "owned");
        assert!("sold".parse::<CreatureStatus>().is_err());
    }
}
