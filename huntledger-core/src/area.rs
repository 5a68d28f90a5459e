//! Hunting areas and the loot records tallied against them.
//!
//! These structs are the persisted wire shapes: field names serialize in
//! camelCase to match the stored JSON layout, and fields added after the
//! first release default when absent so old ledgers keep deserializing.

use serde::{Deserialize, Serialize};

/// Whether an area shipped with the app or was created by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaCategory {
    Popular,
    Custom,
}

/// A named farming location and everything tallied against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntingArea {
    pub id: String,
    pub name: String,
    pub category: AreaCategory,
    /// Session-scoped run tally; resets independently of `total_runs`.
    #[serde(default)]
    pub count: u32,
    /// Lifetime run tally.
    #[serde(default)]
    pub total_runs: u32,
    #[serde(default)]
    pub loot: Vec<LootRecord>,
}

impl HuntingArea {
    /// Fresh area with zeroed tallies and no loot.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: AreaCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            count: 0,
            total_runs: 0,
            loot: Vec::new(),
        }
    }
}

/// Kind of a logged drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LootKind {
    Rune,
    Key,
    Item,
}

impl LootKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rune => "rune",
            Self::Key => "key",
            Self::Item => "item",
        }
    }
}

/// Colour of a Pandemonium key drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Terror,
    Hate,
    Destruction,
}

/// A single logged drop, owned by exactly one area's loot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LootKind,
    pub name: String,
    /// Rune tier, present exactly when `kind` is [`LootKind::Rune`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rune_level: Option<u8>,
    /// Key colour, present exactly when `kind` is [`LootKind::Key`].
    #[serde(rename = "keyType", default, skip_serializing_if = "Option::is_none")]
    pub key_kind: Option<KeyKind>,
    /// Creation instant, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Id of the owning area.
    pub area_id: String,
}

/// Loot details supplied by the caller. Id, timestamp, and owning area are
/// filled in by the store when the record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoot {
    pub kind: LootKind,
    pub name: String,
    pub rune_level: Option<u8>,
    pub key_kind: Option<KeyKind>,
}

impl NewLoot {
    #[must_use]
    pub fn rune(name: impl Into<String>, level: u8) -> Self {
        Self {
            kind: LootKind::Rune,
            name: name.into(),
            rune_level: Some(level),
            key_kind: None,
        }
    }

    #[must_use]
    pub fn key(name: impl Into<String>, colour: KeyKind) -> Self {
        Self {
            kind: LootKind::Key,
            name: name.into(),
            rune_level: None,
            key_kind: Some(colour),
        }
    }

    #[must_use]
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            kind: LootKind::Item,
            name: name.into(),
            rune_level: None,
            key_kind: None,
        }
    }
}
