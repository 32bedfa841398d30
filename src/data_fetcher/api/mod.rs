pub mod fetch_utils;
pub mod http_client;
pub mod league_api;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
pub use http_client::create_http_client_with_timeout;
pub use league_api::{LeagueFetcher, decode_classic_matches, decode_draft_details, fetch_all_pages};
