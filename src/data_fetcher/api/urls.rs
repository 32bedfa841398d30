//! URL building utilities for API endpoints

/// Builds the draft league details URL.
///
/// # Arguments
/// * `base_url` - The draft API base URL
/// * `league_id` - The league identifier
///
/// # Example
/// ```
/// use fpl_munger::data_fetcher::api::build_draft_details_url;
///
/// let url = build_draft_details_url("https://draft.example.com", "1234");
/// assert_eq!(url, "https://draft.example.com/api/league/1234/details");
/// ```
pub fn build_draft_details_url(base_url: &str, league_id: &str) -> String {
    format!("{}/api/league/{league_id}/details", trim_base(base_url))
}

/// Builds one page URL of the classic head-to-head match listing.
///
/// # Arguments
/// * `base_url` - The classic API base URL
/// * `league_id` - The league identifier
/// * `page` - 1-based page number
///
/// # Example
/// ```
/// use fpl_munger::data_fetcher::api::build_classic_matches_url;
///
/// let url = build_classic_matches_url("https://fantasy.example.com/", "77", 2);
/// assert_eq!(url, "https://fantasy.example.com/api/leagues-h2h-matches/league/77/?page=2");
/// ```
pub fn build_classic_matches_url(base_url: &str, league_id: &str, page: u32) -> String {
    format!(
        "{}/api/leagues-h2h-matches/league/{league_id}/?page={page}",
        trim_base(base_url)
    )
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
