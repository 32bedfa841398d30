use crate::cli::{ConfigArgs, RunArgs};
use fpl_munger::config::Config;
use fpl_munger::data_fetcher::LeagueFetcher;
use fpl_munger::error::AppError;
use fpl_munger::exporter::{LocalDirSink, StdoutSink, StorageSink};
use fpl_munger::pipeline::{Job, Pipeline, RunOutcome};
use std::path::Path;
use tracing::info;

/// Works out which leagues a `run` invocation processes.
///
/// `--league` (with `--kind`) selects a single league. Otherwise the
/// configured jobs are used, narrowed to `--kind` when given. `--metric`
/// overrides the metric of every selected job.
pub fn select_jobs(run: &RunArgs, config: &Config) -> Result<Vec<Job>, AppError> {
    let mut jobs: Vec<Job> = match (&run.league, run.kind) {
        (Some(league), Some(kind)) => vec![Job::new(kind, league.clone())],
        (Some(_), None) => {
            return Err(AppError::config_error("--league requires --kind"));
        }
        (None, kind) => config
            .jobs
            .iter()
            .filter(|job| kind.is_none_or(|k| job.kind == k))
            .map(Job::from)
            .collect(),
    };

    if jobs.is_empty() {
        return Err(AppError::config_error(
            "No league to process: pass --kind and --league, or add [[jobs]] to the config file",
        ));
    }

    if let Some(metric) = run.metric {
        jobs = jobs.into_iter().map(|job| job.with_metric(metric)).collect();
    }
    Ok(jobs)
}

/// Handles the `run` command.
///
/// Runs every selected job in order and prints one line per job.
/// Returns whether all jobs succeeded.
pub async fn handle_run(run: &RunArgs, mut config: Config) -> Result<bool, AppError> {
    if let Some(output_dir) = &run.output_dir {
        config.output_dir = output_dir.clone();
    }

    let jobs = select_jobs(run, &config)?;
    let fetcher = LeagueFetcher::new(&config)?;

    let outcomes = if run.dry_run {
        run_jobs(fetcher, StdoutSink::new(), &jobs).await
    } else {
        info!("Writing tables under {}", config.output_dir);
        run_jobs(fetcher, LocalDirSink::new(&config.output_dir), &jobs).await
    };

    for outcome in &outcomes {
        if outcome.success {
            println!("{}", outcome.message);
        } else {
            eprintln!("{}", outcome.message);
        }
    }

    Ok(outcomes.iter().all(|outcome| outcome.success))
}

async fn run_jobs<S: StorageSink>(fetcher: LeagueFetcher, sink: S, jobs: &[Job]) -> Vec<RunOutcome> {
    let mut pipeline = Pipeline::new(fetcher, sink);
    pipeline.run_all(jobs).await
}

/// Handles `config --init`.
///
/// Writes a default configuration file unless one already exists.
pub async fn handle_config_init(config_path: &str) -> Result<(), AppError> {
    if Path::new(config_path).exists() {
        println!("Config file already exists at:");
        println!("{config_path}");
        return Ok(());
    }

    Config::default().save_to_path(config_path).await?;
    println!("Default config written to:");
    println!("{config_path}");
    Ok(())
}

/// Handles `config` and `config --list`.
///
/// Displays the effective configuration, environment overrides included.
pub fn handle_config_list(config_path: &str, config: &Config) {
    println!();
    println!("{}", config.display(config_path));
}

/// Whether a `config` invocation only writes the default file
pub fn is_init_only(args: &ConfigArgs) -> bool {
    args.init && !args.list
}
