use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::win_points;
use crate::data_fetcher::models::{LeagueKind, MatchSide};

/// What the second exported table measures.
///
/// The two sources disagree: draft results only carry raw scores, so win
/// points are derived, while classic head-to-head results carry a per-match
/// points field of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryMetric {
    /// 3 for a win, 1 each for a draw, 0 for a loss, derived from raw scores.
    WinPoints,
    /// The source's own per-side `total` field, taken as is (missing → 0).
    CarriedTotal,
}

impl SecondaryMetric {
    /// Metric used when a job does not pick one explicitly
    pub fn default_for(kind: LeagueKind) -> Self {
        match kind {
            LeagueKind::Draft => SecondaryMetric::WinPoints,
            LeagueKind::Classic => SecondaryMetric::CarriedTotal,
        }
    }

    /// Secondary values earned by each side of one played match.
    pub fn score(self, home: &MatchSide, away: &MatchSide) -> (i64, i64) {
        match self {
            SecondaryMetric::WinPoints => derive_win_points(home.score, away.score),
            SecondaryMetric::CarriedTotal => (home.total.unwrap_or(0), away.total.unwrap_or(0)),
        }
    }
}

impl fmt::Display for SecondaryMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecondaryMetric::WinPoints => write!(f, "win-points"),
            SecondaryMetric::CarriedTotal => write!(f, "carried-total"),
        }
    }
}

impl FromStr for SecondaryMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "win-points" | "wins" => Ok(SecondaryMetric::WinPoints),
            "carried-total" | "total" => Ok(SecondaryMetric::CarriedTotal),
            other => Err(format!(
                "Unknown metric: {other}. Use win-points or carried-total."
            )),
        }
    }
}

/// Win points for a head-to-head result: winner 3, loser 0, draw 1 each.
pub fn derive_win_points(home_score: i64, away_score: i64) -> (i64, i64) {
    use std::cmp::Ordering;

    match home_score.cmp(&away_score) {
        Ordering::Greater => (win_points::WIN, win_points::LOSS),
        Ordering::Less => (win_points::LOSS, win_points::WIN),
        Ordering::Equal => (win_points::DRAW, win_points::DRAW),
    }
}
