//! Turns fetched match records into cumulative per-round tables.

pub mod scoring;
pub mod table;

pub use scoring::{SecondaryMetric, derive_win_points};
pub use table::{CumulativeTable, RoundTable};

use tracing::{debug, info};

use crate::data_fetcher::models::{EntryId, LeagueSnapshot, MatchRecord, Participants};

/// Per-round values before accumulation.
#[derive(Debug, Clone, Default)]
pub struct RoundTotals {
    pub scores: RoundTable,
    pub secondary: RoundTable,
    /// Matches dropped because they were unplayed or involved an unknown entry.
    pub discarded: usize,
}

/// Final cumulative tables for one league.
#[derive(Debug, Clone)]
pub struct Standings {
    pub participants: Participants,
    pub metric: SecondaryMetric,
    pub scores: CumulativeTable,
    pub secondary: CumulativeTable,
}

/// Both entry ids of a played match between known participants.
fn countable_entries(
    record: &MatchRecord,
    participants: &Participants,
) -> Option<(EntryId, EntryId)> {
    if !record.is_played() {
        return None;
    }
    let home = record.home.entry.filter(|id| participants.contains(*id))?;
    let away = record.away.entry.filter(|id| participants.contains(*id))?;
    Some((home, away))
}

/// Groups played matches by round and sums both metrics per participant.
pub fn tally_rounds(snapshot: &LeagueSnapshot, metric: SecondaryMetric) -> RoundTotals {
    let participants = &snapshot.participants;
    let mut totals = RoundTotals::default();

    for record in &snapshot.matches {
        let Some((home, away)) = countable_entries(record, participants) else {
            totals.discarded += 1;
            continue;
        };

        let round = record.event;
        totals.scores.touch_round(round, participants);
        totals.secondary.touch_round(round, participants);

        totals.scores.add(round, home, record.home.score);
        totals.scores.add(round, away, record.away.score);

        let (home_extra, away_extra) = metric.score(&record.home, &record.away);
        totals.secondary.add(round, home, home_extra);
        totals.secondary.add(round, away, away_extra);
    }

    debug!(
        "Tallied {} rounds, discarded {} matches",
        totals.scores.len(),
        totals.discarded
    );
    totals
}

/// Filters, tallies and accumulates a snapshot into its two cumulative tables.
pub fn aggregate(snapshot: &LeagueSnapshot, metric: SecondaryMetric) -> Standings {
    let totals = tally_rounds(snapshot, metric);
    let participants = snapshot.participants.clone();

    let scores = totals.scores.into_cumulative(&participants);
    let secondary = totals.secondary.into_cumulative(&participants);

    info!(
        "Aggregated {} rounds for {} participants using {metric}",
        scores.len(),
        participants.len()
    );

    Standings {
        participants,
        metric,
        scores,
        secondary,
    }
}
