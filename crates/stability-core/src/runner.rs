use crate::archive::ArchivePackager;
use crate::domain::{JobSummary, StabilityResult};
use crate::sim::TimeSeriesSimulator;
use crate::sweep::JobSlice;

/// Drives one job: for every planned step, resolve the parameter
/// record, run the simulator, and package the result.
///
/// The first error aborts the job and propagates unchanged; archives
/// from earlier steps stay on disk, and the orchestrator re-runs a
/// failed job wholesale.
#[derive(Debug)]
pub struct JobRunner<S> {
    simulator: S,
}

impl<S: TimeSeriesSimulator> JobRunner<S> {
    pub fn new(simulator: S) -> Self {
        Self { simulator }
    }

    pub fn run(
        &self,
        slice: &dyn JobSlice,
        packager: &ArchivePackager,
    ) -> StabilityResult<JobSummary> {
        let planned = slice.planned_steps();
        let mut archives = Vec::with_capacity(planned);
        for step in 0..planned {
            let params = slice.record(step)?;
            let series = self.simulator.run_time_series(&params)?;
            archives.push(packager.write_archive(step, &params, &series)?);
        }
        Ok(JobSummary {
            job_index: slice.job_index(),
            strategy: slice.strategy(),
            steps_completed: archives.len(),
            archives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::JobRunner;
    use crate::archive::ArchivePackager;
    use crate::domain::{
        ParameterRecord, StabilityErrorCategory, StabilityResult, SweepStrategy, TimeSeries,
    };
    use crate::sim::TimeSeriesSimulator;
    use crate::sweep::{JobSlice, MultivariateSlice, ParameterAxes, SingleAxisSlice};
    use ndarray::{arr1, arr2};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct EchoSimulator;

    impl TimeSeriesSimulator for EchoSimulator {
        fn run_time_series(&self, params: &ParameterRecord) -> StabilityResult<TimeSeries> {
            Ok(TimeSeries::new(
                arr1(&[0.0, 1.0]),
                arr2(&[
                    [params.delta1_var, params.delta2_var],
                    [params.ed_point, params.sigma],
                ]),
            ))
        }
    }

    /// Fails once the sweep reaches a chosen delta2 factor.
    struct TrippingSimulator {
        trip_delta2: f64,
    }

    impl TimeSeriesSimulator for TrippingSimulator {
        fn run_time_series(&self, params: &ParameterRecord) -> StabilityResult<TimeSeries> {
            if params.delta2_var == self.trip_delta2 {
                return Err(crate::domain::StabilityError::computation(
                    "RUN.TIME_SERIES",
                    "simulated failure",
                ));
            }
            EchoSimulator.run_time_series(params)
        }
    }

    fn scenario_axes() -> ParameterAxes {
        ParameterAxes::new(
            vec![1.0, 2.0],
            vec![1.0],
            vec![0.9, 1.0, 1.1],
            vec![0.9, 1.0, 1.1],
        )
        .expect("scenario axes should validate")
    }

    fn archive_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("output directory should list")
            .map(|entry| {
                entry
                    .expect("directory entry should resolve")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn run_packages_every_planned_step() {
        let temp = TempDir::new().expect("tempdir should be created");
        let axes = scenario_axes();
        let slice = SingleAxisSlice::new(&axes, 1).expect("job 1 should build");
        let packager =
            ArchivePackager::new(temp.path(), slice.planned_steps()).expect("packager should build");

        let summary = JobRunner::new(EchoSimulator)
            .run(&slice, &packager)
            .expect("job should complete");

        assert_eq!(summary.job_index, 1);
        assert_eq!(summary.strategy, SweepStrategy::SingleAxis);
        assert_eq!(summary.steps_completed, 6);
        assert_eq!(summary.archives.len(), 6);
        for archive in &summary.archives {
            assert!(archive.is_file(), "{} should exist", archive.display());
        }
        assert_eq!(
            archive_names(temp.path()),
            vec![
                "00output.npz",
                "01output.npz",
                "02output.npz",
                "03output.npz",
                "04output.npz",
                "05output.npz",
            ]
        );
    }

    #[test]
    fn simulator_failure_aborts_and_keeps_earlier_archives() {
        let temp = TempDir::new().expect("tempdir should be created");
        let axes = scenario_axes();
        let slice = SingleAxisSlice::new(&axes, 0).expect("job 0 should build");
        let packager =
            ArchivePackager::new(temp.path(), slice.planned_steps()).expect("packager should build");

        // Step 3 is the first second-half record: (delta1, delta2) = (1.0, 0.9).
        let error = JobRunner::new(TrippingSimulator { trip_delta2: 0.9 })
            .run(&slice, &packager)
            .expect_err("tripping simulator should abort the job");

        assert_eq!(error.category(), StabilityErrorCategory::ComputationError);
        assert_eq!(error.placeholder(), "RUN.TIME_SERIES");
        assert_eq!(
            archive_names(temp.path()),
            vec!["00output.npz", "01output.npz", "02output.npz"]
        );
    }

    #[test]
    fn out_of_grid_job_fails_before_writing_anything() {
        let temp = TempDir::new().expect("tempdir should be created");
        let axes = scenario_axes();
        let slice = MultivariateSlice::new(&axes, axes.pair_count())
            .expect("out-of-grid job should still construct");
        let packager =
            ArchivePackager::new(temp.path(), slice.planned_steps()).expect("packager should build");

        let error = JobRunner::new(EchoSimulator)
            .run(&slice, &packager)
            .expect_err("job past the grid should fail at step 0");

        assert_eq!(error.placeholder(), "INPUT.GRID_RANGE");
        assert!(archive_names(temp.path()).is_empty());
    }
}
