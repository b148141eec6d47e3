use super::{ParameterAxes, ParameterGrid};
use crate::domain::{ParameterRecord, StabilityError, SweepResult, SweepStrategy};
use std::ops::Range;

/// The subset of sweep work owned by one job index.
///
/// Implementations are pure functions of (axes, job index): two
/// processes handed the same inputs must produce bit-identical record
/// sequences, because the cross-job partition is never coordinated at
/// runtime.
pub trait JobSlice {
    fn job_index(&self) -> usize;

    fn strategy(&self) -> SweepStrategy;

    /// Number of steps the job will attempt, fixed before step 0.
    fn planned_steps(&self) -> usize;

    /// The parameter record for one step. Steps outside the plan or the
    /// underlying grid are an input-validation error; there is no
    /// wrap-around, which would silently overlap another job's records.
    fn record(&self, step: usize) -> SweepResult<ParameterRecord>;
}

/// Block partition of the full grid: job `j` owns the `block_size`
/// consecutive records starting at `j * block_size`, i.e. exactly the
/// coupling product for the j-th (ed_point, sigma) pair.
///
/// The step plan is `2 * block_size`, the doubled bound carried over
/// from the legacy driver's one-at-a-time sweep, so a job walks its own
/// block and then the next job's. Jobs whose plan crosses the end of
/// the grid fail with a range error at the first step past it.
/// `block_bounds` is the authoritative ownership range; the tiling of
/// those ranges is what keeps the sweep collision-free.
#[derive(Debug, Clone)]
pub struct MultivariateSlice {
    job_index: usize,
    start: usize,
    block_size: usize,
    grid: ParameterGrid,
}

impl MultivariateSlice {
    /// Builds the slice for `job_index`. Offsets beyond the grid are
    /// accepted here and reported by `record` at the offending step;
    /// only block-offset arithmetic overflow fails eagerly.
    pub fn new(axes: &ParameterAxes, job_index: usize) -> SweepResult<Self> {
        let block_size = axes.block_size();
        let start = job_index
            .checked_mul(block_size)
            .and_then(|start| start.checked_add(block_size).map(|_| start))
            .ok_or_else(|| {
                StabilityError::input_validation(
                    "INPUT.JOB_INDEX",
                    format!(
                        "job index {} overflows the grid offset arithmetic",
                        job_index
                    ),
                )
            })?;
        Ok(Self {
            job_index,
            start,
            block_size,
            grid: ParameterGrid::cartesian(axes),
        })
    }

    /// The records this job owns within the partition:
    /// `[job_index * block_size, (job_index + 1) * block_size)`.
    pub fn block_bounds(&self) -> Range<usize> {
        self.start..self.start + self.block_size
    }

    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }
}

impl JobSlice for MultivariateSlice {
    fn job_index(&self) -> usize {
        self.job_index
    }

    fn strategy(&self) -> SweepStrategy {
        SweepStrategy::Multivariate
    }

    fn planned_steps(&self) -> usize {
        2 * self.block_size
    }

    fn record(&self, step: usize) -> SweepResult<ParameterRecord> {
        if step >= self.planned_steps() {
            return Err(StabilityError::input_validation(
                "INPUT.GRID_RANGE",
                format!(
                    "job {} step {} is outside the {}-step plan",
                    self.job_index,
                    step,
                    self.planned_steps()
                ),
            ));
        }
        let index = self.start.checked_add(step).ok_or_else(|| {
            StabilityError::input_validation(
                "INPUT.GRID_RANGE",
                format!(
                    "job {} step {} overflows the grid offset arithmetic",
                    self.job_index, step
                ),
            )
        })?;
        self.grid.record(index).copied().ok_or_else(|| {
            StabilityError::input_validation(
                "INPUT.GRID_RANGE",
                format!(
                    "job {} step {} addresses grid entry {} but the grid ends at {}",
                    self.job_index,
                    step,
                    index,
                    self.grid.len()
                ),
            )
        })
    }
}

/// One-at-a-time coupling sweep: the job index picks a single
/// (ed_point, sigma) pair, enumerated in the same ed-major order the
/// grid blocks use, and every job runs the same synthetic coupling
/// schedule: first each `delta1_var` with `delta2_var` pinned to 1.0,
/// then each `delta2_var` with `delta1_var` pinned to 1.0.
#[derive(Debug, Clone)]
pub struct SingleAxisSlice {
    job_index: usize,
    ed_point: f64,
    sigma: f64,
    coupling_steps: Vec<(f64, f64)>,
}

impl SingleAxisSlice {
    pub fn new(axes: &ParameterAxes, job_index: usize) -> SweepResult<Self> {
        let pair_count = axes.pair_count();
        if job_index >= pair_count {
            return Err(StabilityError::input_validation(
                "INPUT.JOB_INDEX",
                format!(
                    "job index {} exceeds the {} available (ed_point, sigma) pairs",
                    job_index, pair_count
                ),
            ));
        }
        let ed_index = job_index / axes.sigma.len();
        let sigma_index = job_index % axes.sigma.len();

        let mut coupling_steps = Vec::with_capacity(axes.coupling_sweep_len());
        for &delta1_var in &axes.delta1_var {
            coupling_steps.push((delta1_var, 1.0));
        }
        for &delta2_var in &axes.delta2_var {
            coupling_steps.push((1.0, delta2_var));
        }

        Ok(Self {
            job_index,
            ed_point: axes.ed_points[ed_index],
            sigma: axes.sigma[sigma_index],
            coupling_steps,
        })
    }

    pub fn ed_point(&self) -> f64 {
        self.ed_point
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl JobSlice for SingleAxisSlice {
    fn job_index(&self) -> usize {
        self.job_index
    }

    fn strategy(&self) -> SweepStrategy {
        SweepStrategy::SingleAxis
    }

    fn planned_steps(&self) -> usize {
        self.coupling_steps.len()
    }

    fn record(&self, step: usize) -> SweepResult<ParameterRecord> {
        let (delta1_var, delta2_var) = self.coupling_steps.get(step).copied().ok_or_else(|| {
            StabilityError::input_validation(
                "INPUT.GRID_RANGE",
                format!(
                    "job {} step {} is outside the {}-step coupling sweep",
                    self.job_index,
                    step,
                    self.coupling_steps.len()
                ),
            )
        })?;
        Ok(ParameterRecord::new(
            self.ed_point,
            self.sigma,
            delta1_var,
            delta2_var,
        ))
    }
}
