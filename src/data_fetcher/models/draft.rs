use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::require;
use super::league::{EntryId, MatchRecord, MatchSide};
use crate::error::DataShapeError;

/// Body of the draft league details endpoint.
///
/// Entries and matches are kept as raw values so one bad record can be
/// skipped without failing the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLeagueDetails {
    pub league_entries: Vec<Value>,
    pub matches: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DraftLeagueEntry {
    pub id: Option<u64>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub entry_name: Option<String>,
}

impl DraftLeagueEntry {
    /// Entries without a short name never become participants.
    pub fn usable_label(&self) -> Option<&str> {
        self.short_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DraftMatch {
    pub event: u32,
    #[serde(default)]
    pub finished: Option<bool>,
    #[serde(default)]
    pub league_entry_1: Option<u64>,
    #[serde(default)]
    pub league_entry_1_points: Option<i64>,
    #[serde(default)]
    pub league_entry_2: Option<u64>,
    #[serde(default)]
    pub league_entry_2_points: Option<i64>,
}

impl DraftMatch {
    pub fn into_record(self, index: usize) -> Result<MatchRecord, DataShapeError> {
        Ok(MatchRecord {
            event: self.event,
            finished: self.finished,
            home: MatchSide {
                entry: self.league_entry_1.map(EntryId),
                score: require(index, "league_entry_1_points", self.league_entry_1_points)?,
                total: None,
                outcomes: None,
            },
            away: MatchSide {
                entry: self.league_entry_2.map(EntryId),
                score: require(index, "league_entry_2_points", self.league_entry_2_points)?,
                total: None,
                outcomes: None,
            },
        })
    }
}
