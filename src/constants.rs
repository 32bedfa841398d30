//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, endpoint defaults and output names
//! so the fetch, aggregation and export code stays free of literals.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Default base URL of the draft game API
pub const DEFAULT_DRAFT_BASE_URL: &str = "https://draft.premierleague.com";

/// Default base URL of the classic fantasy game API
pub const DEFAULT_CLASSIC_BASE_URL: &str = "https://fantasy.premierleague.com";

/// Directory name used under the platform config dir
pub const APP_DIR_NAME: &str = "fpl_munger";

/// Default log file name
pub const LOG_FILE_NAME: &str = "fpl_munger.log";

/// Default tracing directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_DIRECTIVE: &str = "fpl_munger=info";

/// Pagination limits for paged endpoints
pub mod pagination {
    /// First page number requested from paged endpoints
    pub const FIRST_PAGE: u32 = 1;

    /// Upper bound on pages followed before the fetch is aborted.
    /// A season has 38 rounds, so a well-behaved league never gets near this.
    pub const MAX_PAGES: u32 = 500;
}

/// Points awarded by the derived win-points metric
pub mod win_points {
    pub const WIN: i64 = 3;
    pub const DRAW: i64 = 1;
    pub const LOSS: i64 = 0;
}

/// Export layout: header label, content type and per-source file names
pub mod export {
    /// First header cell of every exported table
    pub const ROUND_HEADER: &str = "Round";

    /// Content type handed to storage sinks
    pub const CONTENT_TYPE: &str = "text/plain";

    pub const DRAFT_NAMESPACE: &str = "draft";
    pub const DRAFT_SCORES_FILE: &str = "fantasy_draft_points.csv";
    pub const DRAFT_SECONDARY_FILE: &str = "fantasy_draft_wins.csv";

    pub const CLASSIC_NAMESPACE: &str = "fantasy";
    pub const CLASSIC_SCORES_FILE: &str = "fantasy_points.csv";
    pub const CLASSIC_SECONDARY_FILE: &str = "fantasy_wins.csv";
}

/// Environment variables that override config file values
pub mod env_vars {
    pub const OUTPUT_DIR: &str = "FPL_MUNGER_OUTPUT_DIR";
    pub const LOG_FILE: &str = "FPL_MUNGER_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "FPL_MUNGER_HTTP_TIMEOUT";
}
