//! Fetch → aggregate → export for one league at a time.

use std::fmt;

use tracing::{error, info, instrument};

use crate::aggregator::{SecondaryMetric, aggregate};
use crate::config::JobConfig;
use crate::data_fetcher::LeagueFetcher;
use crate::data_fetcher::models::LeagueKind;
use crate::error::AppError;
use crate::exporter::{Exporter, ObjectPath, StorageSink};

/// A single league to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub kind: LeagueKind,
    pub league_id: String,
    pub metric: SecondaryMetric,
}

impl Job {
    /// A job using the default secondary metric for its kind
    pub fn new(kind: LeagueKind, league_id: impl Into<String>) -> Self {
        Self {
            kind,
            league_id: league_id.into(),
            metric: SecondaryMetric::default_for(kind),
        }
    }

    pub fn with_metric(mut self, metric: SecondaryMetric) -> Self {
        self.metric = metric;
        self
    }
}

impl From<&JobConfig> for Job {
    fn from(config: &JobConfig) -> Self {
        Job::new(config.kind, config.league_id.clone()).with_metric(config.effective_metric())
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} league {}", self.kind, self.league_id)
    }
}

/// What a successful job produced.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub written: Vec<ObjectPath>,
    pub rounds: usize,
    pub participants: usize,
    pub skipped_records: usize,
}

/// Result of one job as reported to the caller. Failures never escape as panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
}

impl RunOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Runs jobs one after another against a fetcher and a sink.
pub struct Pipeline<S> {
    fetcher: LeagueFetcher,
    exporter: Exporter<S>,
}

impl<S: StorageSink> Pipeline<S> {
    pub fn new(fetcher: LeagueFetcher, sink: S) -> Self {
        Self {
            fetcher,
            exporter: Exporter::new(sink),
        }
    }

    pub fn sink(&self) -> &S {
        self.exporter.sink()
    }

    pub fn into_sink(self) -> S {
        self.exporter.into_sink()
    }

    /// Processes one league end to end.
    ///
    /// Nothing is exported unless fetching and aggregation both complete.
    #[instrument(skip(self, job), fields(job = %job))]
    pub async fn run_job(&mut self, job: &Job) -> Result<JobReport, AppError> {
        let snapshot = self.fetcher.fetch_league(job.kind, &job.league_id).await?;
        let standings = aggregate(&snapshot, job.metric);
        let written = self
            .exporter
            .export_standings(job.kind, &job.league_id, &standings)?;

        Ok(JobReport {
            written,
            rounds: standings.scores.len(),
            participants: standings.participants.len(),
            skipped_records: snapshot.skipped_records,
        })
    }

    /// Runs one job and folds its result into a [`RunOutcome`].
    pub async fn run(&mut self, job: &Job) -> RunOutcome {
        match self.run_job(job).await {
            Ok(report) => {
                let paths: Vec<String> = report.written.iter().map(ToString::to_string).collect();
                let message = format!(
                    "{job} complete: {} rounds, {} participants, wrote {}",
                    report.rounds,
                    report.participants,
                    paths.join(", ")
                );
                info!("{message}");
                RunOutcome::succeeded(message)
            }
            Err(e) => {
                let message = format!("{job} failed during {}: {e}", e.stage());
                error!("{message}");
                RunOutcome::failed(message)
            }
        }
    }

    /// Runs every job in order. A failing job does not stop the ones after it.
    pub async fn run_all(&mut self, jobs: &[Job]) -> Vec<RunOutcome> {
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            outcomes.push(self.run(job).await);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::create_http_client_with_timeout;
    use crate::exporter::MemorySink;
    use crate::testing_utils::TestDataBuilder;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pipeline(server: &MockServer) -> Pipeline<MemorySink> {
        let client = create_http_client_with_timeout(5).unwrap();
        let fetcher = LeagueFetcher::with_client(client, &server.uri(), &server.uri());
        Pipeline::new(fetcher, MemorySink::new())
    }

    #[tokio::test]
    async fn test_draft_job_exports_both_tables() {
        let server = MockServer::start().await;
        let body = TestDataBuilder::draft_details_json(
            &[(1, "Alpha", "AB"), (2, "Bravo", "CD")],
            &[
                (1, true, 1, 50, 2, 40),
                (2, true, 1, 30, 2, 30),
                (3, false, 1, 0, 2, 0),
            ],
        );
        Mock::given(method("GET"))
            .and(path("/api/league/123/details"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let mut pipeline = pipeline(&server);
        let outcome = pipeline.run(&Job::new(LeagueKind::Draft, "123")).await;

        assert!(outcome.success, "{}", outcome.message);
        let sink = pipeline.into_sink();
        assert_eq!(
            sink.text("draft/123/fantasy_draft_points.csv").unwrap(),
            "Round,AB,CD\n1,50,40\n2,80,70\n"
        );
        assert_eq!(
            sink.text("draft/123/fantasy_draft_wins.csv").unwrap(),
            "Round,AB,CD\n1,3,0\n2,4,1\n"
        );
    }

    #[tokio::test]
    async fn test_classic_pages_are_concatenated() {
        let server = MockServer::start().await;
        let pages = [
            TestDataBuilder::classic_page_json(
                1,
                true,
                vec![TestDataBuilder::classic_match_json(1, (10, "Ana Bell", 50), (20, "Cal Dee", 40))],
            ),
            TestDataBuilder::classic_page_json(
                2,
                true,
                vec![TestDataBuilder::classic_match_json(2, (10, "Ana Bell", 30), (20, "Cal Dee", 30))],
            ),
            TestDataBuilder::classic_page_json(
                3,
                false,
                vec![TestDataBuilder::classic_match_json(3, (20, "Cal Dee", 61), (10, "Ana Bell", 12))],
            ),
        ];
        for (index, page) in pages.into_iter().enumerate() {
            Mock::given(method("GET"))
                .and(path("/api/leagues-h2h-matches/league/777/"))
                .and(query_param("page", (index + 1).to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page))
                .expect(1)
                .mount(&server)
                .await;
        }

        let mut pipeline = pipeline(&server);
        let report = pipeline
            .run_job(&Job::new(LeagueKind::Classic, "777"))
            .await
            .unwrap();

        assert_eq!(report.rounds, 3);
        assert_eq!(report.participants, 2);
        let sink = pipeline.into_sink();
        assert_eq!(
            sink.text("fantasy/777/fantasy_points.csv").unwrap(),
            "Round,AB,CD\n1,50,40\n2,80,70\n3,92,131\n"
        );
        assert_eq!(
            sink.text("fantasy/777/fantasy_wins.csv").unwrap(),
            "Round,AB,CD\n1,3,0\n2,4,1\n3,4,4\n"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_exports_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/league/9/details"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut pipeline = pipeline(&server);
        let outcome = pipeline.run(&Job::new(LeagueKind::Draft, "9")).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("fetch"), "{}", outcome.message);
        assert!(pipeline.sink().is_empty());
    }

    #[tokio::test]
    async fn test_failing_job_does_not_stop_the_next() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/league/1/details"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/league/2/details"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::draft_details_json(
                    &[(1, "Alpha", "AB"), (2, "Bravo", "CD")],
                    &[(1, true, 1, 5, 2, 4)],
                ),
            ))
            .mount(&server)
            .await;

        let mut pipeline = pipeline(&server);
        let outcomes = pipeline
            .run_all(&[
                Job::new(LeagueKind::Draft, "1"),
                Job::new(LeagueKind::Draft, "2"),
            ])
            .await;

        assert_eq!(
            outcomes.iter().map(|o| o.success).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert_eq!(pipeline.sink().len(), 2);
    }

    #[test]
    fn test_job_from_config_uses_default_metric() {
        let config = JobConfig {
            kind: LeagueKind::Classic,
            league_id: "5".to_string(),
            metric: None,
        };
        let job = Job::from(&config);
        assert_eq!(job.metric, SecondaryMetric::CarriedTotal);
        assert_eq!(job.to_string(), "classic league 5");
    }
}
