use serde_json::{Value, json};

use crate::aggregator::{CumulativeTable, Standings};
use crate::data_fetcher::models::{
    EntryId, LeagueSnapshot, MatchRecord, MatchSide, OutcomeCounters, Participants,
};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    fn side(entry: EntryId, score: i64) -> MatchSide {
        MatchSide {
            entry: Some(entry),
            score,
            total: None,
            outcomes: None,
        }
    }

    /// Creates a match carrying an explicit finished flag set to true
    pub fn finished(
        event: u32,
        home: EntryId,
        home_score: i64,
        away: EntryId,
        away_score: i64,
    ) -> MatchRecord {
        MatchRecord {
            event,
            finished: Some(true),
            home: Self::side(home, home_score),
            away: Self::side(away, away_score),
        }
    }

    /// Creates a match that has not been played yet
    pub fn unfinished(
        event: u32,
        home: EntryId,
        home_score: i64,
        away: EntryId,
        away_score: i64,
    ) -> MatchRecord {
        MatchRecord {
            finished: Some(false),
            ..Self::finished(event, home, home_score, away, away_score)
        }
    }

    /// Creates a match without a finished flag whose outcome counters follow
    /// the scores, the way classic listings report played matches.
    pub fn counted(
        event: u32,
        home: EntryId,
        home_score: i64,
        away: EntryId,
        away_score: i64,
    ) -> MatchRecord {
        use std::cmp::Ordering;

        let (home_counters, away_counters) = match home_score.cmp(&away_score) {
            Ordering::Greater => (
                OutcomeCounters { win: 1, draw: 0, loss: 0 },
                OutcomeCounters { win: 0, draw: 0, loss: 1 },
            ),
            Ordering::Less => (
                OutcomeCounters { win: 0, draw: 0, loss: 1 },
                OutcomeCounters { win: 1, draw: 0, loss: 0 },
            ),
            Ordering::Equal => (
                OutcomeCounters { win: 0, draw: 1, loss: 0 },
                OutcomeCounters { win: 0, draw: 1, loss: 0 },
            ),
        };

        let mut record = Self::finished(event, home, home_score, away, away_score);
        record.finished = None;
        record.home.outcomes = Some(home_counters);
        record.away.outcomes = Some(away_counters);
        record
    }

    /// Creates a participant set from `(id, label)` pairs
    pub fn participants(entries: &[(u64, &str)]) -> Participants {
        let mut participants = Participants::new();
        for (id, label) in entries {
            participants.insert(EntryId(*id), *label);
        }
        participants
    }

    /// Draft details document in the shape the draft API returns.
    ///
    /// `matches` holds `(event, finished, home, home_points, away, away_points)`.
    pub fn draft_details_json(
        entries: &[(u64, &str, &str)],
        matches: &[(u32, bool, u64, i64, u64, i64)],
    ) -> Value {
        let league_entries: Vec<Value> = entries
            .iter()
            .map(|(id, entry_name, short_name)| {
                json!({"id": id, "entry_name": entry_name, "short_name": short_name})
            })
            .collect();
        let matches: Vec<Value> = matches
            .iter()
            .map(|(event, finished, home, home_points, away, away_points)| {
                json!({
                    "event": event,
                    "finished": finished,
                    "league_entry_1": home,
                    "league_entry_1_points": home_points,
                    "league_entry_2": away,
                    "league_entry_2_points": away_points,
                })
            })
            .collect();

        json!({
            "league": {"id": 1, "name": "Test League"},
            "league_entries": league_entries,
            "matches": matches,
        })
    }

    /// One classic match record with outcome counters and totals derived
    /// from the scores.
    pub fn classic_match_json(
        event: u32,
        home: (u64, &str, i64),
        away: (u64, &str, i64),
    ) -> Value {
        let record = Self::counted(event, EntryId(home.0), home.2, EntryId(away.0), away.2);
        let mut value = json!({"event": event});
        for (n, (id, name, points), counters) in [
            (1, home, record.home.outcomes),
            (2, away, record.away.outcomes),
        ] {
            let counters = counters.unwrap_or_default();
            let total = i64::from(counters.win) * 3 + i64::from(counters.draw);
            value[format!("entry_{n}_entry")] = json!(id);
            value[format!("entry_{n}_player_name")] = json!(name);
            value[format!("entry_{n}_points")] = json!(points);
            value[format!("entry_{n}_total")] = json!(total);
            value[format!("entry_{n}_win")] = json!(counters.win);
            value[format!("entry_{n}_draw")] = json!(counters.draw);
            value[format!("entry_{n}_loss")] = json!(counters.loss);
        }
        value
    }

    /// One page of the classic match listing
    pub fn classic_page_json(page: u32, has_next: bool, results: Vec<Value>) -> Value {
        json!({"has_next": has_next, "page": page, "results": results})
    }
}

/// Two participants labelled "AB" (id 1) and "CD" (id 2), no matches yet.
pub fn two_player_league() -> LeagueSnapshot {
    LeagueSnapshot {
        participants: TestDataBuilder::participants(&[(1, "AB"), (2, "CD")]),
        matches: Vec::new(),
        skipped_records: 0,
    }
}

/// Property-based testing utilities
pub struct PropertyTesting;

impl PropertyTesting {
    /// Checks that every row of a cumulative table holds exactly the known
    /// participants.
    pub fn validate_key_set(table: &CumulativeTable, participants: &Participants) -> Result<(), String> {
        let expected: Vec<EntryId> = participants.ids().collect();
        for round in table.rounds() {
            let Some(row) = table.row(round) else {
                return Err(format!("Round {round} listed but has no row"));
            };
            let ids: Vec<EntryId> = row.keys().copied().collect();
            if ids != expected {
                return Err(format!("Round {round} has participants {ids:?}, expected {expected:?}"));
            }
        }
        Ok(())
    }

    /// Checks that running totals never decrease from one round to the next.
    /// Only meaningful for non-negative per-round values.
    pub fn validate_monotonic(table: &CumulativeTable, participants: &Participants) -> Result<(), String> {
        let rounds: Vec<u32> = table.rounds().collect();
        for id in participants.ids() {
            for pair in rounds.windows(2) {
                let (before, after) = (table.get(pair[0], id), table.get(pair[1], id));
                if after < before {
                    return Err(format!(
                        "Entry {id} decreased from {before} to {after} between rounds {} and {}",
                        pair[0], pair[1]
                    ));
                }
            }
        }
        Ok(())
    }

    /// Checks that both tables of a standings cover the same rounds and
    /// participant set.
    pub fn validate_standings(standings: &Standings) -> Result<(), String> {
        let score_rounds: Vec<u32> = standings.scores.rounds().collect();
        let secondary_rounds: Vec<u32> = standings.secondary.rounds().collect();
        if score_rounds != secondary_rounds {
            return Err(format!(
                "Tables disagree on rounds: {score_rounds:?} vs {secondary_rounds:?}"
            ));
        }
        Self::validate_key_set(&standings.scores, &standings.participants)?;
        Self::validate_key_set(&standings.secondary, &standings.participants)
    }
}
