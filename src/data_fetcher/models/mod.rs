pub mod classic;
pub mod common;
pub mod draft;
pub mod league;

pub use classic::{ClassicMatch, MatchPage};
pub use common::{decode_record, read_event};
pub use draft::{DraftLeagueDetails, DraftLeagueEntry, DraftMatch};
pub use league::{
    EntryId, LeagueKind, LeagueSnapshot, MatchRecord, MatchSide, OutcomeCounters, Participant,
    Participants,
};
