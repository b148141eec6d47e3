pub mod errors;

pub use errors::{StabilityError, StabilityErrorCategory, StabilityResult, SweepResult};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Partitioning strategy selecting which records a job index owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepStrategy {
    SingleAxis,
    Multivariate,
}

impl SweepStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleAxis => "single-axis",
            Self::Multivariate => "multivariate",
        }
    }
}

impl Display for SweepStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// One fully-specified simulation input: a point in the four-axis
/// parameter space. Built per step and handed to the simulator as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRecord {
    pub ed_point: f64,
    pub sigma: f64,
    pub delta1_var: f64,
    pub delta2_var: f64,
}

impl ParameterRecord {
    pub const fn new(ed_point: f64, sigma: f64, delta1_var: f64, delta2_var: f64) -> Self {
        Self {
            ed_point,
            sigma,
            delta1_var,
            delta2_var,
        }
    }
}

/// Simulator output for one record: a time axis and the process
/// evolution sampled along it, one row per time point.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub trange: Array1<f64>,
    pub process_array: Array2<f64>,
}

impl TimeSeries {
    pub fn new(trange: Array1<f64>, process_array: Array2<f64>) -> Self {
        Self {
            trange,
            process_array,
        }
    }
}

/// What a completed job produced, in step order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub job_index: usize,
    pub strategy: SweepStrategy,
    pub steps_completed: usize,
    pub archives: Vec<PathBuf>,
}
