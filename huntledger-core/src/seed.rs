//! Seed catalog of popular hunting areas.
//!
//! The ids here are stable across releases: persisted tallies are merged
//! back onto the seed by id, so changing one detaches existing progress.

use once_cell::sync::Lazy;

use crate::area::{AreaCategory, HuntingArea};

const POPULAR_SEED: &[(&str, &str)] = &[
    ("ancient-tunnels", "Ancient Tunnels"),
    ("mephisto", "Mephisto"),
    ("diablo", "Diablo"),
    ("baal", "Baal"),
    ("chaos-sanctuary", "Chaos Sanctuary"),
    ("worldstone-keep", "Worldstone Keep"),
    ("countess", "Countess"),
    ("andariel", "Andariel"),
    ("cow-level", "Cow Level"),
    ("pindleskin", "Pindleskin"),
];

static POPULAR_AREAS: Lazy<Vec<HuntingArea>> = Lazy::new(|| {
    POPULAR_SEED
        .iter()
        .map(|(id, name)| HuntingArea::new(*id, *name, AreaCategory::Popular))
        .collect()
});

/// The popular areas with zeroed tallies, in seed order.
#[must_use]
pub fn popular_areas() -> Vec<HuntingArea> {
    POPULAR_AREAS.clone()
}

/// Whether `id` belongs to the popular seed set.
#[must_use]
pub fn is_popular_id(id: &str) -> bool {
    POPULAR_SEED.iter().any(|(seed_id, _)| *seed_id == id)
}
