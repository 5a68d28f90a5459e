//! The 33-tier rune ladder and the legacy-name migration table.

/// Tier at or above which a rune counts as a high rune (Um and up).
pub const HIGH_RUNE_LEVEL: u8 = 22;

/// One entry in the rune ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rune {
    pub id: u8,
    pub name: &'static str,
    pub level: u8,
}

const fn rune(id: u8, name: &'static str) -> Rune {
    Rune {
        id,
        name,
        level: id,
    }
}

/// Full ladder in tier order.
pub static RUNES: &[Rune] = &[
    rune(1, "El"),
    rune(2, "Eld"),
    rune(3, "Tir"),
    rune(4, "Nef"),
    rune(5, "Eth"),
    rune(6, "Ith"),
    rune(7, "Tal"),
    rune(8, "Ral"),
    rune(9, "Ort"),
    rune(10, "Thul"),
    rune(11, "Amn"),
    rune(12, "Sol"),
    rune(13, "Shael"),
    rune(14, "Dol"),
    rune(15, "Hel"),
    rune(16, "Io"),
    rune(17, "Lum"),
    rune(18, "Ko"),
    rune(19, "Fal"),
    rune(20, "Lem"),
    rune(21, "Pul"),
    rune(22, "Um"),
    rune(23, "Mal"),
    rune(24, "Ist"),
    rune(25, "Gul"),
    rune(26, "Vex"),
    rune(27, "Ohm"),
    rune(28, "Lo"),
    rune(29, "Sur"),
    rune(30, "Ber"),
    rune(31, "Jah"),
    rune(32, "Cham"),
    rune(33, "Zod"),
];

/// Ladder entry for the given tier, if it exists.
#[must_use]
pub fn rune_by_level(level: u8) -> Option<&'static Rune> {
    RUNES.iter().find(|entry| entry.level == level)
}

#[must_use]
pub fn is_high_rune(level: u8) -> bool {
    level >= HIGH_RUNE_LEVEL
}

/// Rune names as persisted before schema v1 (lowercase ladder ids), mapped
/// to their canonical display names.
pub static LEGACY_RUNE_NAMES: &[(&str, &str)] = &[
    ("el", "El"),
    ("eld", "Eld"),
    ("tir", "Tir"),
    ("nef", "Nef"),
    ("eth", "Eth"),
    ("ith", "Ith"),
    ("tal", "Tal"),
    ("ral", "Ral"),
    ("ort", "Ort"),
    ("thul", "Thul"),
    ("amn", "Amn"),
    ("sol", "Sol"),
    ("shael", "Shael"),
    ("dol", "Dol"),
    ("hel", "Hel"),
    ("io", "Io"),
    ("lum", "Lum"),
    ("ko", "Ko"),
    ("fal", "Fal"),
    ("lem", "Lem"),
    ("pul", "Pul"),
    ("um", "Um"),
    ("mal", "Mal"),
    ("ist", "Ist"),
    ("gul", "Gul"),
    ("vex", "Vex"),
    ("ohm", "Ohm"),
    ("lo", "Lo"),
    ("sur", "Sur"),
    ("ber", "Ber"),
    ("jah", "Jah"),
    ("cham", "Cham"),
    ("zod", "Zod"),
];

/// Canonical name for a legacy rune name, or `None` when the name is not a
/// legacy entry (including names that are already canonical).
#[must_use]
pub fn canonical_rune_name(legacy: &str) -> Option<&'static str> {
    LEGACY_RUNE_NAMES
        .iter()
        .find(|(old, _)| *old == legacy)
        .map(|(_, canonical)| *canonical)
}
