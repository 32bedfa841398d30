use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::export;

/// Opaque identifier of a league entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A competitor in the league with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: EntryId,
    pub label: String,
}

/// The fixed set of known participants for one run.
///
/// Lookups go by id; iteration goes by label, then id, so column order is
/// reproducible even when two entries share a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participants {
    by_id: BTreeMap<EntryId, String>,
}

impl Participants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a participant. A later registration of the same id replaces
    /// the label, matching how match records are scanned in arrival order.
    pub fn insert(&mut self, id: EntryId, label: impl Into<String>) {
        self.by_id.insert(id, label.into());
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn label(&self, id: EntryId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Participants sorted lexicographically by label, ties broken by id.
    pub fn ordered(&self) -> Vec<Participant> {
        let mut list: Vec<Participant> = self
            .by_id
            .iter()
            .map(|(id, label)| Participant {
                id: *id,
                label: label.clone(),
            })
            .collect();
        list.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        list
    }

    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.by_id.keys().copied()
    }
}

impl FromIterator<Participant> for Participants {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        let mut participants = Participants::new();
        for p in iter {
            participants.insert(p.id, p.label);
        }
        participants
    }
}

/// Outcome counters carried by sources without an explicit finished flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounters {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl OutcomeCounters {
    pub fn is_zero(&self) -> bool {
        self.win == 0 && self.draw == 0 && self.loss == 0
    }
}

/// One side of a head-to-head match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSide {
    /// `None` for pseudo-entries such as the league average opponent.
    pub entry: Option<EntryId>,
    pub score: i64,
    /// Externally supplied per-match total, when the source carries one.
    pub total: Option<i64>,
    pub outcomes: Option<OutcomeCounters>,
}

/// A head-to-head match record, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub event: u32,
    pub finished: Option<bool>,
    pub home: MatchSide,
    pub away: MatchSide,
}

impl MatchRecord {
    /// A match is played when its finished flag says so. Without a flag, any
    /// nonzero outcome counter on either side marks it as played.
    pub fn is_played(&self) -> bool {
        if let Some(finished) = self.finished {
            return finished;
        }
        [self.home.outcomes, self.away.outcomes]
            .iter()
            .flatten()
            .any(|counters| !counters.is_zero())
    }
}

/// Everything a fetch produces for one league.
#[derive(Debug, Clone, Default)]
pub struct LeagueSnapshot {
    pub participants: Participants,
    pub matches: Vec<MatchRecord>,
    /// Records dropped during decoding because of non-structural shape problems.
    pub skipped_records: usize,
}

/// Which remote game the league lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueKind {
    /// Draft game: one details document with entries and all matches.
    Draft,
    /// Classic game: paged head-to-head match listing.
    Classic,
}

impl LeagueKind {
    /// Namespace used as the first path segment of exported files
    pub fn namespace(self) -> &'static str {
        match self {
            LeagueKind::Draft => export::DRAFT_NAMESPACE,
            LeagueKind::Classic => export::CLASSIC_NAMESPACE,
        }
    }

    /// File names for the score table and the secondary table
    pub fn file_names(self) -> (&'static str, &'static str) {
        match self {
            LeagueKind::Draft => (export::DRAFT_SCORES_FILE, export::DRAFT_SECONDARY_FILE),
            LeagueKind::Classic => (export::CLASSIC_SCORES_FILE, export::CLASSIC_SECONDARY_FILE),
        }
    }
}

impl fmt::Display for LeagueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeagueKind::Draft => write!(f, "draft"),
            LeagueKind::Classic => write!(f, "classic"),
        }
    }
}

impl FromStr for LeagueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(LeagueKind::Draft),
            "classic" | "fantasy" => Ok(LeagueKind::Classic),
            other => Err(format!("Unknown league kind: {other}. Use draft or classic.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(entry: u64, score: i64) -> MatchSide {
        MatchSide {
            entry: Some(EntryId(entry)),
            score,
            total: None,
            outcomes: None,
        }
    }

    #[test]
    fn test_participants_ordered_by_label_then_id() {
        let mut participants = Participants::new();
        participants.insert(EntryId(3), "CD");
        participants.insert(EntryId(1), "ZZ");
        participants.insert(EntryId(2), "AB");
        participants.insert(EntryId(0), "CD");

        let labels: Vec<(u64, String)> = participants
            .ordered()
            .into_iter()
            .map(|p| (p.id.0, p.label))
            .collect();
        assert_eq!(
            labels,
            vec![
                (2, "AB".to_string()),
                (0, "CD".to_string()),
                (3, "CD".to_string()),
                (1, "ZZ".to_string()),
            ]
        );
    }

    #[test]
    fn test_finished_flag_wins_over_counters() {
        let mut record = MatchRecord {
            event: 1,
            finished: Some(false),
            home: side(1, 50),
            away: side(2, 40),
        };
        record.home.outcomes = Some(OutcomeCounters { win: 1, draw: 0, loss: 0 });
        assert!(!record.is_played());

        record.finished = Some(true);
        assert!(record.is_played());
    }

    #[test]
    fn test_counters_decide_without_flag() {
        let mut record = MatchRecord {
            event: 4,
            finished: None,
            home: side(1, 0),
            away: side(2, 0),
        };
        assert!(!record.is_played(), "no flag and no counters is unplayed");

        record.home.outcomes = Some(OutcomeCounters::default());
        record.away.outcomes = Some(OutcomeCounters::default());
        assert!(!record.is_played());

        record.away.outcomes = Some(OutcomeCounters { win: 0, draw: 1, loss: 0 });
        assert!(record.is_played());
    }

    #[test]
    fn test_league_kind_parsing() {
        assert_eq!("draft".parse::<LeagueKind>(), Ok(LeagueKind::Draft));
        assert_eq!("Classic".parse::<LeagueKind>(), Ok(LeagueKind::Classic));
        assert_eq!("fantasy".parse::<LeagueKind>(), Ok(LeagueKind::Classic));
        assert!("cup".parse::<LeagueKind>().is_err());
        assert_eq!(LeagueKind::Classic.to_string(), "classic");
    }

    #[test]
    fn test_league_kind_output_names() {
        assert_eq!(LeagueKind::Draft.namespace(), "draft");
        assert_eq!(
            LeagueKind::Draft.file_names(),
            ("fantasy_draft_points.csv", "fantasy_draft_wins.csv")
        );
        assert_eq!(LeagueKind::Classic.namespace(), "fantasy");
        assert_eq!(
            LeagueKind::Classic.file_names(),
            ("fantasy_points.csv", "fantasy_wins.csv")
        );
    }
}
