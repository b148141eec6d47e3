use super::CliError;
use anyhow::Context;
use serde::Serialize;
use stability_core::archive::{ArchivePackager, archive_name, filename_width};
use stability_core::domain::{StabilityResult, SweepStrategy};
use stability_core::manifest::JobManifest;
use stability_core::runner::JobRunner;
use stability_core::sim::DephasedRabiModel;
use stability_core::sweep::{JobSlice, MultivariateSlice, ParameterAxes, SingleAxisSlice};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(clap::Args)]
pub(super) struct JobArgs {
    /// Zero-based job index assigned by the scheduler
    #[arg(value_name = "JOB_INDEX")]
    job_index: usize,

    /// Directory receiving the manifest and step archives; parallel jobs
    /// must each get their own
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct PlanArgs {
    /// Describe one job's step plan instead of only the partition totals
    #[arg(long)]
    job_index: Option<usize>,

    /// Partition strategy to describe
    #[arg(long, value_enum, default_value_t = StrategyArg::Single)]
    strategy: StrategyArg,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum StrategyArg {
    Single,
    Multi,
}

impl StrategyArg {
    fn as_strategy(self) -> SweepStrategy {
        match self {
            Self::Single => SweepStrategy::SingleAxis,
            Self::Multi => SweepStrategy::Multivariate,
        }
    }
}

pub(super) fn run_single_command(args: JobArgs) -> Result<i32, CliError> {
    let axes = ParameterAxes::reference();
    let slice = SingleAxisSlice::new(&axes, args.job_index).map_err(CliError::Compute)?;
    run_job(&axes, &slice, &args)
}

pub(super) fn run_multi_command(args: JobArgs) -> Result<i32, CliError> {
    let axes = ParameterAxes::reference();
    let slice = MultivariateSlice::new(&axes, args.job_index).map_err(CliError::Compute)?;
    run_job(&axes, &slice, &args)
}

fn run_job(axes: &ParameterAxes, slice: &dyn JobSlice, args: &JobArgs) -> Result<i32, CliError> {
    println!(
        "Running {} job {} ({} steps)...",
        slice.strategy(),
        slice.job_index(),
        slice.planned_steps()
    );
    info!(
        job_index = slice.job_index(),
        strategy = %slice.strategy(),
        planned_steps = slice.planned_steps(),
        out_dir = %args.out_dir.display(),
        "starting sweep job"
    );

    let packager =
        ArchivePackager::new(&args.out_dir, slice.planned_steps()).map_err(CliError::Compute)?;
    let manifest_path = JobManifest::for_job(axes, slice, packager.filename_width())
        .write(packager.output_dir())
        .map_err(CliError::Compute)?;
    debug!(manifest = %manifest_path.display(), "wrote job manifest");

    let summary = JobRunner::new(DephasedRabiModel::default())
        .run(slice, &packager)
        .map_err(CliError::Compute)?;

    info!(steps_completed = summary.steps_completed, "sweep job finished");
    println!(
        "{} job {} completed ({} archives in '{}').",
        summary.strategy,
        summary.job_index,
        summary.steps_completed,
        packager.output_dir().display()
    );
    Ok(0)
}

#[derive(Debug, Serialize)]
struct PlanReport {
    strategy: SweepStrategy,
    grid_records: usize,
    block_size: usize,
    job_count: usize,
    steps_per_job: usize,
    filename_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    job: Option<JobPlan>,
}

#[derive(Debug, Serialize)]
struct JobPlan {
    job_index: usize,
    ed_point: f64,
    sigma: f64,
    planned_steps: usize,
    first_archive: String,
    last_archive: String,
}

pub(super) fn run_plan_command(args: PlanArgs) -> Result<i32, CliError> {
    let axes = ParameterAxes::reference();
    let report = build_plan_report(&axes, &args).map_err(CliError::Compute)?;

    if args.json {
        let payload = serde_json::to_string_pretty(&report)
            .context("failed to render the plan report as JSON")?;
        println!("{}", payload);
        return Ok(0);
    }

    println!("Strategy: {}", report.strategy);
    println!(
        "Grid: {} records in blocks of {}",
        report.grid_records, report.block_size
    );
    println!(
        "Jobs: {} ({} steps planned per job)",
        report.job_count, report.steps_per_job
    );
    println!(
        "Archives per job: {} .. {}",
        archive_name(0, report.filename_width),
        archive_name(
            report.steps_per_job.saturating_sub(1),
            report.filename_width
        )
    );
    if let Some(job) = &report.job {
        println!(
            "Job {}: ed_point={} sigma={} ({} steps, {} .. {})",
            job.job_index,
            job.ed_point,
            job.sigma,
            job.planned_steps,
            job.first_archive,
            job.last_archive
        );
    }
    Ok(0)
}

fn build_plan_report(axes: &ParameterAxes, args: &PlanArgs) -> StabilityResult<PlanReport> {
    let strategy = args.strategy.as_strategy();
    let steps_per_job = match strategy {
        SweepStrategy::SingleAxis => axes.coupling_sweep_len(),
        SweepStrategy::Multivariate => 2 * axes.block_size(),
    };
    let width = filename_width(steps_per_job);

    let job = match args.job_index {
        None => None,
        Some(job_index) => Some(match strategy {
            SweepStrategy::SingleAxis => {
                let slice = SingleAxisSlice::new(axes, job_index)?;
                job_plan(&slice, slice.ed_point(), slice.sigma(), width)
            }
            SweepStrategy::Multivariate => {
                let slice = MultivariateSlice::new(axes, job_index)?;
                let first = slice.record(0)?;
                job_plan(&slice, first.ed_point, first.sigma, width)
            }
        }),
    };

    Ok(PlanReport {
        strategy,
        grid_records: axes.grid_len(),
        block_size: axes.block_size(),
        job_count: axes.pair_count(),
        steps_per_job,
        filename_width: width,
        job,
    })
}

fn job_plan(slice: &dyn JobSlice, ed_point: f64, sigma: f64, width: usize) -> JobPlan {
    JobPlan {
        job_index: slice.job_index(),
        ed_point,
        sigma,
        planned_steps: slice.planned_steps(),
        first_archive: archive_name(0, width),
        last_archive: archive_name(slice.planned_steps().saturating_sub(1), width),
    }
}
