//! Round → participant → value tables.
//!
//! A table starts life as a [`RoundTable`] holding per-round values and is
//! turned into a [`CumulativeTable`] exactly once by
//! [`RoundTable::into_cumulative`]. The conversion consumes the round table,
//! so running totals can never be accumulated a second time.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::data_fetcher::models::{EntryId, Participants};

/// Marker for tables holding plain per-round values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerRound;

/// Marker for tables holding running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cumulative;

pub type Row = BTreeMap<EntryId, i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<Stage> {
    rows: BTreeMap<u32, Row>,
    stage: PhantomData<Stage>,
}

pub type RoundTable = Table<PerRound>;
pub type CumulativeTable = Table<Cumulative>;

impl<Stage> Table<Stage> {
    /// Value for a participant in a round, 0 when either key is absent.
    pub fn get(&self, round: u32, entry: EntryId) -> i64 {
        self.rows
            .get(&round)
            .and_then(|row| row.get(&entry))
            .copied()
            .unwrap_or(0)
    }

    /// Round numbers present in the table, ascending.
    pub fn rounds(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, round: u32) -> Option<&Row> {
        self.rows.get(&round)
    }

    pub fn contains_round(&self, round: u32) -> bool {
        self.rows.contains_key(&round)
    }

    /// Number of rounds in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for RoundTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundTable {
    pub fn new() -> Self {
        Table {
            rows: BTreeMap::new(),
            stage: PhantomData,
        }
    }

    /// Creates the row for `round` on first touch, with every known
    /// participant at 0. Existing rows are left alone.
    pub fn touch_round(&mut self, round: u32, participants: &Participants) {
        self.rows
            .entry(round)
            .or_insert_with(|| participants.ids().map(|id| (id, 0)).collect());
    }

    /// Adds `delta` to a participant's value in a round.
    pub fn add(&mut self, round: u32, entry: EntryId, delta: i64) {
        *self
            .rows
            .entry(round)
            .or_default()
            .entry(entry)
            .or_insert(0) += delta;
    }

    /// Converts per-round values into running totals.
    ///
    /// Rounds are visited in ascending order and participants in label order.
    /// Each participant's running total starts at 0; a participant missing from
    /// a round row contributes 0 and still receives its carried total.
    pub fn into_cumulative(mut self, participants: &Participants) -> CumulativeTable {
        let order = participants.ordered();
        let mut running: BTreeMap<EntryId, i64> = order.iter().map(|p| (p.id, 0)).collect();

        for row in self.rows.values_mut() {
            for participant in &order {
                let total = running.entry(participant.id).or_insert(0);
                *total += row.get(&participant.id).copied().unwrap_or(0);
                row.insert(participant.id, *total);
            }
        }

        Table {
            rows: self.rows,
            stage: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants() -> Participants {
        let mut participants = Participants::new();
        participants.insert(EntryId(1), "AB");
        participants.insert(EntryId(2), "CD");
        participants
    }

    #[test]
    fn test_touch_round_zero_fills_once() {
        let participants = participants();
        let mut table = RoundTable::new();

        table.touch_round(5, &participants);
        table.add(5, EntryId(1), 12);
        table.touch_round(5, &participants);

        let row = table.row(5).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row[&EntryId(1)], 12);
        assert_eq!(row[&EntryId(2)], 0);
    }

    #[test]
    fn test_get_defaults_to_zero() {
        let table = RoundTable::new();
        assert_eq!(table.get(1, EntryId(1)), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_into_cumulative_running_totals() {
        let participants = participants();
        let mut table = RoundTable::new();
        for (round, a, b) in [(1, 50, 40), (2, 30, 30), (4, 0, 7)] {
            table.touch_round(round, &participants);
            table.add(round, EntryId(1), a);
            table.add(round, EntryId(2), b);
        }

        let cumulative = table.into_cumulative(&participants);

        assert_eq!(cumulative.rounds().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(cumulative.get(1, EntryId(1)), 50);
        assert_eq!(cumulative.get(2, EntryId(1)), 80);
        assert_eq!(cumulative.get(2, EntryId(2)), 70);
        assert_eq!(cumulative.get(4, EntryId(1)), 80);
        assert_eq!(cumulative.get(4, EntryId(2)), 77);
        assert!(!cumulative.contains_round(3));
    }

    #[test]
    fn test_into_cumulative_fills_participants_missing_from_row() {
        let participants = participants();
        let mut table = RoundTable::new();
        table.add(1, EntryId(1), 10);
        table.add(2, EntryId(2), 5);

        let cumulative = table.into_cumulative(&participants);

        assert_eq!(cumulative.row(1).unwrap().len(), 2);
        assert_eq!(cumulative.get(1, EntryId(2)), 0);
        assert_eq!(cumulative.get(2, EntryId(1)), 10);
        assert_eq!(cumulative.get(2, EntryId(2)), 5);
    }

    #[test]
    fn test_cumulative_is_monotonic_for_non_negative_values() {
        let participants = participants();
        let mut table = RoundTable::new();
        let values = [(1, 3, 0), (2, 0, 1), (3, 1, 1), (7, 3, 0), (9, 0, 3)];
        for (round, a, b) in values {
            table.touch_round(round, &participants);
            table.add(round, EntryId(1), a);
            table.add(round, EntryId(2), b);
        }

        let cumulative = table.into_cumulative(&participants);
        let rounds: Vec<u32> = cumulative.rounds().collect();
        for id in [EntryId(1), EntryId(2)] {
            for pair in rounds.windows(2) {
                assert!(cumulative.get(pair[0], id) <= cumulative.get(pair[1], id));
            }
        }
        assert_eq!(cumulative.get(9, EntryId(1)), 7);
        assert_eq!(cumulative.get(9, EntryId(2)), 5);
    }
}
