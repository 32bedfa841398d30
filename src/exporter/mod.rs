//! Renders standings tables and hands them to a storage sink.

pub mod render;
pub mod sink;

pub use render::{render_csv, render_rows};
pub use sink::{LocalDirSink, MemorySink, ObjectPath, StdoutSink, StorageSink, StoredObject};

use tracing::info;

use crate::aggregator::{CumulativeTable, Standings};
use crate::constants::export::CONTENT_TYPE;
use crate::data_fetcher::models::{LeagueKind, Participants};
use crate::error::ExportError;

/// Writes the two tables of a league run to a sink.
#[derive(Debug)]
pub struct Exporter<S> {
    sink: S,
}

impl<S: StorageSink> Exporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Renders and stores one table at `path`.
    pub fn export_table(
        &mut self,
        table: &CumulativeTable,
        participants: &Participants,
        path: &ObjectPath,
    ) -> Result<(), ExportError> {
        let display_path = path.to_string();
        let body = render_csv(table, participants, &display_path)?;
        self.sink.put(path, CONTENT_TYPE, &body)
    }

    /// Exports the score table then the secondary table of a league.
    ///
    /// Returns the paths written, in order. Stops at the first failure.
    pub fn export_standings(
        &mut self,
        kind: LeagueKind,
        league_id: &str,
        standings: &Standings,
    ) -> Result<Vec<ObjectPath>, ExportError> {
        let (scores_file, secondary_file) = kind.file_names();
        let namespace = kind.namespace();

        let tables = [
            (&standings.scores, scores_file),
            (&standings.secondary, secondary_file),
        ];

        let mut written = Vec::with_capacity(tables.len());
        for (table, file_name) in tables {
            let path = ObjectPath::new(namespace, league_id, file_name);
            self.export_table(table, &standings.participants, &path)?;
            written.push(path);
        }

        info!(
            "Exported {} tables for {kind} league {league_id}",
            written.len()
        );
        Ok(written)
    }
}
