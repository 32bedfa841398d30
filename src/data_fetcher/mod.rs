pub mod api;
pub mod labels;
pub mod models;

pub use api::LeagueFetcher;
pub use models::{EntryId, LeagueKind, LeagueSnapshot, MatchRecord, Participant, Participants};
