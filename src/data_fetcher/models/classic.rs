use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::require;
use super::league::{EntryId, MatchRecord, MatchSide, OutcomeCounters};
use crate::error::DataShapeError;

/// One page of the classic head-to-head match listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPage {
    pub has_next: bool,
    #[serde(default)]
    pub page: Option<u32>,
    pub results: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassicMatch {
    pub event: u32,
    #[serde(default)]
    pub entry_1_entry: Option<u64>,
    #[serde(default)]
    pub entry_1_player_name: Option<String>,
    #[serde(default)]
    pub entry_1_points: Option<i64>,
    #[serde(default)]
    pub entry_1_total: Option<i64>,
    #[serde(default)]
    pub entry_1_win: Option<u32>,
    #[serde(default)]
    pub entry_1_draw: Option<u32>,
    #[serde(default)]
    pub entry_1_loss: Option<u32>,
    #[serde(default)]
    pub entry_2_entry: Option<u64>,
    #[serde(default)]
    pub entry_2_player_name: Option<String>,
    #[serde(default)]
    pub entry_2_points: Option<i64>,
    #[serde(default)]
    pub entry_2_total: Option<i64>,
    #[serde(default)]
    pub entry_2_win: Option<u32>,
    #[serde(default)]
    pub entry_2_draw: Option<u32>,
    #[serde(default)]
    pub entry_2_loss: Option<u32>,
}

fn counters(win: Option<u32>, draw: Option<u32>, loss: Option<u32>) -> Option<OutcomeCounters> {
    if win.is_none() && draw.is_none() && loss.is_none() {
        return None;
    }
    Some(OutcomeCounters {
        win: win.unwrap_or(0),
        draw: draw.unwrap_or(0),
        loss: loss.unwrap_or(0),
    })
}

impl ClassicMatch {
    /// Entry ids paired with manager names, for participant discovery.
    pub fn named_entries(&self) -> [(Option<u64>, Option<&str>); 2] {
        [
            (self.entry_1_entry, self.entry_1_player_name.as_deref()),
            (self.entry_2_entry, self.entry_2_player_name.as_deref()),
        ]
    }

    pub fn into_record(self, index: usize) -> Result<MatchRecord, DataShapeError> {
        Ok(MatchRecord {
            event: self.event,
            finished: None,
            home: MatchSide {
                entry: self.entry_1_entry.map(EntryId),
                score: require(index, "entry_1_points", self.entry_1_points)?,
                total: self.entry_1_total,
                outcomes: counters(self.entry_1_win, self.entry_1_draw, self.entry_1_loss),
            },
            away: MatchSide {
                entry: self.entry_2_entry.map(EntryId),
                score: require(index, "entry_2_points", self.entry_2_points)?,
                total: self.entry_2_total,
                outcomes: counters(self.entry_2_win, self.entry_2_draw, self.entry_2_loss),
            },
        })
    }
}
