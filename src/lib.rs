//! Fantasy Premier League head-to-head table exporter
//!
//! This library fetches every match of a draft or classic head-to-head
//! league, totals raw scores and a secondary metric per round, and exports
//! both as cumulative CSV tables.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fpl_munger::config::Config;
//! use fpl_munger::data_fetcher::{LeagueFetcher, LeagueKind};
//! use fpl_munger::error::AppError;
//! use fpl_munger::exporter::LocalDirSink;
//! use fpl_munger::pipeline::{Job, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load(None).await?;
//!     let fetcher = LeagueFetcher::new(&config)?;
//!     let mut pipeline = Pipeline::new(fetcher, LocalDirSink::new(&config.output_dir));
//!
//!     let outcome = pipeline.run(&Job::new(LeagueKind::Draft, "12345")).await;
//!     println!("{}", outcome.message);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod exporter;
pub mod pipeline;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use aggregator::{SecondaryMetric, Standings, aggregate};
pub use config::Config;
pub use data_fetcher::{LeagueFetcher, LeagueKind, LeagueSnapshot};
pub use error::AppError;
pub use exporter::{Exporter, LocalDirSink, MemorySink, StorageSink};
pub use pipeline::{Job, Pipeline, RunOutcome};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
