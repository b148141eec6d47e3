mod rabi;

pub use rabi::{DephasedRabiModel, ModelError, TimeGrid};

use crate::domain::{ParameterRecord, StabilityResult, TimeSeries};

/// Seam for the per-record simulation. The sweep machinery treats the
/// simulator as an opaque pure function; swapping the model never
/// touches partitioning or packaging.
pub trait TimeSeriesSimulator {
    fn run_time_series(&self, params: &ParameterRecord) -> StabilityResult<TimeSeries>;
}
