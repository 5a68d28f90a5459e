//! Lifetime user statistics.

use serde::{Deserialize, Serialize};

use crate::area::HuntingArea;

/// Singleton statistics document, recomputed incrementally on every run
/// increment and loot change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_runs: u32,
    #[serde(default)]
    pub total_loot: u32,
    /// Name (not id) of the area with the highest lifetime tally as of the
    /// last increment.
    #[serde(default)]
    pub favorite_area: String,
    #[serde(default)]
    pub session_start: i64,
    #[serde(default)]
    pub last_visit: i64,
}

impl UserStats {
    /// Fresh statistics document stamped with the current instant.
    #[must_use]
    pub fn starting_at(now_ms: i64) -> Self {
        Self {
            total_runs: 0,
            total_loot: 0,
            favorite_area: String::new(),
            session_start: now_ms,
            last_visit: now_ms,
        }
    }
}

/// Name of the area with the highest lifetime tally. Ties go to the area
/// appearing earliest in the list; an empty list yields `None`.
#[must_use]
pub fn favorite_area(areas: &[HuntingArea]) -> Option<&str> {
    let mut best: Option<&HuntingArea> = None;
    for area in areas {
        if best.map_or(true, |leader| area.total_runs > leader.total_runs) {
            best = Some(area);
        }
    }
    best.map(|area| area.name.as_str())
}
