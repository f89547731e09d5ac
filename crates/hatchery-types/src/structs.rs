//! Core record structs: creatures, evolutions, image payloads, notices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CreatureStatus, NoticeKind, Rarity};
use crate::ids::CreatureId;

// ---------------------------------------------------------------------------
// Image payload
// ---------------------------------------------------------------------------

/// A generated image, kept inline as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ImagePayload {
    /// MIME type of the decoded bytes (e.g. `image/png`).
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data_base64: String,
}

impl ImagePayload {
    /// Build a PNG payload from base64 data.
    pub fn png(data_base64: impl Into<String>) -> Self {
        Self {
            mime_type: "image/png".to_owned(),
            data_base64: data_base64.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Evolution
// ---------------------------------------------------------------------------

/// The three text fields returned by the evolution text call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EvolutionText {
    /// Name of the evolved form.
    pub name: String,
    /// Flavour description of the evolved form.
    pub description: String,
    /// Short stats summary.
    pub stats: String,
}

/// A one-time augmentation attached to a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Evolution {
    /// Name of the evolved form.
    pub name: String,
    /// Flavour description of the evolved form.
    pub description: String,
    /// Short stats summary.
    pub stats: String,
    /// Artwork of the evolved form.
    pub image: ImagePayload,
    /// When the evolution was attached.
    pub created_at: DateTime<Utc>,
}

impl Evolution {
    /// Assemble an evolution from its generated parts, stamped now.
    pub fn assemble(text: EvolutionText, image: ImagePayload) -> Self {
        Self {
            name: text.name,
            description: text.description,
            stats: text.stats,
            image,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// A generated creature in the user's collection.
///
/// Immutable apart from two transitions: `status` owned to resold, and
/// attachment of an [`Evolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Creature {
    /// Unique identity.
    pub id: CreatureId,
    /// Display name.
    pub name: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Ownership status.
    pub status: CreatureStatus,
    /// Flavour text generated alongside the name.
    pub description: String,
    /// Primary artwork.
    pub image: ImagePayload,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional evolution, at most one.
    pub evolution: Option<Evolution>,
}

impl Creature {
    /// Whether the creature is still in the collection.
    pub fn is_owned(&self) -> bool {
        self.status == CreatureStatus::Owned
    }

    /// Whether the evolve control should be offered.
    pub fn can_evolve(&self) -> bool {
        self.is_owned() && self.evolution.is_none()
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Notice {
    /// Monotonic sequence number; distinguishes successive notices.
    pub id: u64,
    /// Severity.
    pub kind: NoticeKind,
    /// Human-readable message.
    pub message: String,
}
