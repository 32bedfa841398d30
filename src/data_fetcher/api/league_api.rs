//! League fetching for the draft and classic head-to-head sources

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_classic_matches_url, build_draft_details_url};
use crate::config::Config;
use crate::constants::pagination::{FIRST_PAGE, MAX_PAGES};
use crate::data_fetcher::labels::classic_label;
use crate::data_fetcher::models::{
    ClassicMatch, DraftLeagueDetails, DraftLeagueEntry, DraftMatch, EntryId, LeagueKind,
    LeagueSnapshot, MatchPage, MatchRecord, Participants, decode_record, read_event,
};
use crate::error::{AppError, DataShapeError, FetchError};

/// Retrieves league data from the remote game APIs.
///
/// Built once per run from the configuration; holds the shared HTTP client
/// and the base URLs of both sources.
#[derive(Debug, Clone)]
pub struct LeagueFetcher {
    client: Client,
    draft_base_url: String,
    classic_base_url: String,
}

impl LeagueFetcher {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::with_client(
            client,
            &config.draft_base_url,
            &config.classic_base_url,
        ))
    }

    pub fn with_client(client: Client, draft_base_url: &str, classic_base_url: &str) -> Self {
        Self {
            client,
            draft_base_url: draft_base_url.to_string(),
            classic_base_url: classic_base_url.to_string(),
        }
    }

    /// Fetches every match record of a league plus its participant set.
    ///
    /// Fails on the first page that cannot be retrieved or decoded; no
    /// partial snapshot is ever returned.
    #[instrument(skip(self))]
    pub async fn fetch_league(
        &self,
        kind: LeagueKind,
        league_id: &str,
    ) -> Result<LeagueSnapshot, AppError> {
        let snapshot = match kind {
            LeagueKind::Draft => self.fetch_draft(league_id).await?,
            LeagueKind::Classic => self.fetch_classic(league_id).await?,
        };

        info!(
            "Fetched {} matches and {} participants for {kind} league {league_id} ({} records skipped)",
            snapshot.matches.len(),
            snapshot.participants.len(),
            snapshot.skipped_records
        );
        Ok(snapshot)
    }

    async fn fetch_draft(&self, league_id: &str) -> Result<LeagueSnapshot, AppError> {
        let url = build_draft_details_url(&self.draft_base_url, league_id);
        let details: DraftLeagueDetails = fetch(&self.client, &url).await?;
        Ok(decode_draft_details(details)?)
    }

    async fn fetch_classic(&self, league_id: &str) -> Result<LeagueSnapshot, AppError> {
        let records = fetch_all_pages(&self.client, |page| {
            build_classic_matches_url(&self.classic_base_url, league_id, page)
        })
        .await?;
        Ok(decode_classic_matches(records)?)
    }
}

/// Follows `has_next` from the first page until the listing is exhausted,
/// concatenating the records of every page in arrival order.
pub async fn fetch_all_pages<F>(client: &Client, page_url: F) -> Result<Vec<Value>, FetchError>
where
    F: Fn(u32) -> String,
{
    let mut records = Vec::new();
    let mut page = FIRST_PAGE;

    loop {
        let url = page_url(page);
        let body: MatchPage = fetch(client, &url).await?;
        debug!("Page {page} returned {} records", body.results.len());
        records.extend(body.results);

        if !body.has_next {
            break;
        }
        if page - FIRST_PAGE + 1 >= MAX_PAGES {
            return Err(FetchError::TooManyPages {
                pages: MAX_PAGES,
                url,
            });
        }
        page += 1;
    }

    info!("Collected {} records from {page} page(s)", records.len());
    Ok(records)
}

/// Applies the record-level shape policy: structural errors abort, anything
/// else drops the record with a warning.
fn skip_or_fail<T>(
    result: Result<T, DataShapeError>,
    skipped: &mut usize,
) -> Result<Option<T>, DataShapeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_structural() => Err(e),
        Err(e) => {
            warn!("Skipping record: {e}");
            *skipped += 1;
            Ok(None)
        }
    }
}

/// Turns a draft details document into a snapshot.
///
/// Participants come from `league_entries`; entries without a short name are
/// left out, so matches involving them are later discarded.
pub fn decode_draft_details(details: DraftLeagueDetails) -> Result<LeagueSnapshot, DataShapeError> {
    let mut snapshot = LeagueSnapshot::default();

    for (index, raw) in details.league_entries.into_iter().enumerate() {
        let entry = match decode_record::<DraftLeagueEntry>(index, raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping league entry: {e}");
                continue;
            }
        };
        match (entry.id, entry.usable_label()) {
            (Some(id), Some(label)) => snapshot.participants.insert(EntryId(id), label),
            _ => debug!("League entry #{index} has no id or short name, not a participant"),
        }
    }

    for (index, raw) in details.matches.into_iter().enumerate() {
        read_event(index, &raw)?;
        let record = decode_record::<DraftMatch>(index, raw).and_then(|m| m.into_record(index));
        if let Some(record) = skip_or_fail(record, &mut snapshot.skipped_records)? {
            snapshot.matches.push(record);
        }
    }

    Ok(snapshot)
}

/// Turns the concatenated classic listing into a snapshot.
///
/// Participants are discovered from the match records themselves, labelled
/// with the initials of the manager name.
pub fn decode_classic_matches(records: Vec<Value>) -> Result<LeagueSnapshot, DataShapeError> {
    let mut participants = Participants::new();
    let mut matches: Vec<MatchRecord> = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for (index, raw) in records.into_iter().enumerate() {
        read_event(index, &raw)?;
        let wire = match skip_or_fail(decode_record::<ClassicMatch>(index, raw), &mut skipped)? {
            Some(wire) => wire,
            None => continue,
        };

        for (entry, name) in wire.named_entries() {
            if let Some(id) = entry {
                participants.insert(EntryId(id), classic_label(name, id));
            }
        }

        if let Some(record) = skip_or_fail(wire.into_record(index), &mut skipped)? {
            matches.push(record);
        }
    }

    Ok(LeagueSnapshot {
        participants,
        matches,
        skipped_records: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft_details() -> DraftLeagueDetails {
        serde_json::from_value(json!({
            "league": {"id": 1, "name": "Office"},
            "league_entries": [
                {"id": 11, "entry_name": "Alpha", "short_name": "AB"},
                {"id": 12, "entry_name": "Bravo", "short_name": "CD"},
                {"id": 13, "entry_name": "Ghost", "short_name": ""}
            ],
            "matches": [
                {"event": 1, "finished": true, "league_entry_1": 11, "league_entry_1_points": 50,
                 "league_entry_2": 12, "league_entry_2_points": 40},
                {"event": 1, "finished": true, "league_entry_1": 13, "league_entry_1_points": 10,
                 "league_entry_2": 12, "league_entry_2_points": 20},
                {"event": 2, "finished": true, "league_entry_1": 11,
                 "league_entry_2": 12, "league_entry_2_points": 20},
                {"event": 3, "finished": false, "league_entry_1": 11, "league_entry_1_points": 0,
                 "league_entry_2": 12, "league_entry_2_points": 0}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_draft_details() {
        let snapshot = decode_draft_details(draft_details()).unwrap();

        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.participants.label(EntryId(11)), Some("AB"));
        assert!(!snapshot.participants.contains(EntryId(13)));
        // The match missing a score is skipped, the rest are kept in arrival order.
        assert_eq!(snapshot.skipped_records, 1);
        let events: Vec<u32> = snapshot.matches.iter().map(|m| m.event).collect();
        assert_eq!(events, vec![1, 1, 3]);
    }

    #[test]
    fn test_decode_draft_missing_event_is_fatal() {
        let details: DraftLeagueDetails = serde_json::from_value(json!({
            "league_entries": [],
            "matches": [{"finished": true, "league_entry_1": 1, "league_entry_1_points": 1,
                         "league_entry_2": 2, "league_entry_2_points": 2}]
        }))
        .unwrap();

        let err = decode_draft_details(details).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_decode_classic_matches() {
        let records = vec![
            json!({"event": 1, "entry_1_entry": 501, "entry_1_player_name": "Ana Bell",
                   "entry_1_points": 50, "entry_1_total": 3, "entry_1_win": 1, "entry_1_draw": 0, "entry_1_loss": 0,
                   "entry_2_entry": 502, "entry_2_player_name": "Cal Dee",
                   "entry_2_points": 40, "entry_2_total": 0, "entry_2_win": 0, "entry_2_draw": 0, "entry_2_loss": 1}),
            json!({"event": 1, "entry_1_entry": 503, "entry_1_player_name": "Eve Fox",
                   "entry_1_points": "n/a",
                   "entry_2_entry": 504, "entry_2_player_name": "Gus Hill", "entry_2_points": 1}),
            json!({"event": 1, "entry_1_entry": 505, "entry_1_player_name": "Ivy Jones",
                   "entry_1_points": 61, "entry_1_total": 3, "entry_1_win": 1, "entry_1_draw": 0, "entry_1_loss": 0,
                   "entry_2_entry": null, "entry_2_player_name": "AVERAGE",
                   "entry_2_points": 48, "entry_2_total": 0, "entry_2_win": 0, "entry_2_draw": 0, "entry_2_loss": 1}),
        ];

        let snapshot = decode_classic_matches(records).unwrap();

        assert_eq!(snapshot.skipped_records, 1);
        assert_eq!(snapshot.matches.len(), 2);
        assert_eq!(snapshot.participants.label(EntryId(501)), Some("AB"));
        assert_eq!(snapshot.participants.label(EntryId(502)), Some("CD"));
        assert_eq!(snapshot.participants.label(EntryId(505)), Some("IJ"));
        // The undecodable record contributes no participants.
        assert!(!snapshot.participants.contains(EntryId(503)));
        assert_eq!(snapshot.participants.len(), 3);
    }

    #[test]
    fn test_decode_classic_bad_event_is_fatal() {
        let records = vec![json!({"event": "one", "entry_1_entry": 1, "entry_1_points": 1,
                                  "entry_2_entry": 2, "entry_2_points": 1})];
        assert!(decode_classic_matches(records).unwrap_err().is_structural());
    }
}
