//! CSV rendering of cumulative tables

use csv::WriterBuilder;

use crate::aggregator::CumulativeTable;
use crate::constants::export::ROUND_HEADER;
use crate::data_fetcher::models::Participants;
use crate::error::ExportError;

/// Header row followed by one row per round, as plain strings.
///
/// Columns are `Round` then participant labels in label order; rounds are
/// ascending and every cell falls back to 0.
pub fn render_rows(table: &CumulativeTable, participants: &Participants) -> Vec<Vec<String>> {
    let order = participants.ordered();

    let mut header = Vec::with_capacity(order.len() + 1);
    header.push(ROUND_HEADER.to_string());
    header.extend(order.iter().map(|p| p.label.clone()));

    let mut rows = vec![header];
    for round in table.rounds() {
        let mut row = Vec::with_capacity(order.len() + 1);
        row.push(round.to_string());
        row.extend(order.iter().map(|p| table.get(round, p.id).to_string()));
        rows.push(row);
    }
    rows
}

/// Renders a table into CSV bytes ready for a storage sink.
///
/// `path` is only used to label errors.
pub fn render_csv(
    table: &CumulativeTable,
    participants: &Participants,
    path: &str,
) -> Result<Vec<u8>, ExportError> {
    let render_error = |source: csv::Error| ExportError::Render {
        path: path.to_string(),
        source,
    };

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for row in render_rows(table, participants) {
        writer.write_record(&row).map_err(render_error)?;
    }

    writer.into_inner().map_err(|e| ExportError::Write {
        path: path.to_string(),
        source: e.into_error(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{SecondaryMetric, aggregate};
    use crate::data_fetcher::models::EntryId;
    use crate::testing_utils::{TestDataBuilder, two_player_league};

    #[test]
    fn test_render_scenario_b() {
        let mut snapshot = two_player_league();
        snapshot.matches = vec![
            TestDataBuilder::finished(1, EntryId(1), 50, EntryId(2), 40),
            TestDataBuilder::finished(2, EntryId(1), 30, EntryId(2), 30),
        ];
        let standings = aggregate(&snapshot, SecondaryMetric::WinPoints);

        let points = render_csv(&standings.scores, &standings.participants, "p.csv").unwrap();
        let wins = render_csv(&standings.secondary, &standings.participants, "w.csv").unwrap();

        assert_eq!(String::from_utf8(points).unwrap(), "Round,AB,CD\n1,50,40\n2,80,70\n");
        assert_eq!(String::from_utf8(wins).unwrap(), "Round,AB,CD\n1,3,0\n2,4,1\n");
    }

    #[test]
    fn test_columns_follow_label_order_not_id_order() {
        let mut snapshot = two_player_league();
        snapshot.participants = TestDataBuilder::participants(&[(1, "ZZ"), (2, "AA"), (3, "MM")]);
        snapshot.matches = vec![TestDataBuilder::finished(4, EntryId(1), 9, EntryId(3), 2)];
        let standings = aggregate(&snapshot, SecondaryMetric::WinPoints);

        let rows = render_rows(&standings.scores, &standings.participants);
        assert_eq!(rows[0], vec!["Round", "AA", "MM", "ZZ"]);
        assert_eq!(rows[1], vec!["4", "0", "2", "9"]);
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        let snapshot = two_player_league();
        let standings = aggregate(&snapshot, SecondaryMetric::WinPoints);

        let bytes = render_csv(&standings.scores, &standings.participants, "p.csv").unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Round,AB,CD\n");
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let mut snapshot = two_player_league();
        snapshot.participants.insert(EntryId(1), "A,B");
        snapshot.matches = vec![TestDataBuilder::finished(1, EntryId(1), 1, EntryId(2), 2)];
        let standings = aggregate(&snapshot, SecondaryMetric::WinPoints);

        let bytes = render_csv(&standings.scores, &standings.participants, "p.csv").unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Round,\"A,B\",CD\n1,1,2\n");
    }

    #[test]
    fn test_rounds_strictly_ascending() {
        let mut snapshot = two_player_league();
        snapshot.matches = vec![
            TestDataBuilder::finished(10, EntryId(1), 1, EntryId(2), 2),
            TestDataBuilder::finished(2, EntryId(1), 1, EntryId(2), 2),
            TestDataBuilder::finished(7, EntryId(1), 1, EntryId(2), 2),
        ];
        let standings = aggregate(&snapshot, SecondaryMetric::WinPoints);

        let rounds: Vec<u32> = render_rows(&standings.scores, &standings.participants)
            .iter()
            .skip(1)
            .map(|row| row[0].parse().unwrap())
            .collect();
        assert_eq!(rounds, vec![2, 7, 10]);
    }
}
