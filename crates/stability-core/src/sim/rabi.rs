use super::TimeSeriesSimulator;
use crate::common::constants::{
    DEFAULT_T_MAX_NS, DEFAULT_TIME_SAMPLES, DELTA1_BASE_GHZ, DELTA2_BASE_GHZ,
};
use crate::domain::{ParameterRecord, StabilityError, StabilityResult, TimeSeries};
use ndarray::{Array1, Array2};
use std::f64::consts::TAU;

/// Sampling window for the reference model, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    pub t_max_ns: f64,
    pub samples: usize,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            t_max_ns: DEFAULT_T_MAX_NS,
            samples: DEFAULT_TIME_SAMPLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("rabi model parameter '{field}' must be finite, got {value}")]
    NonFiniteParameter { field: &'static str, value: f64 },
    #[error("rabi model noise sigma must be >= 0, got {value}")]
    NegativeSigma { value: f64 },
    #[error("rabi time grid needs at least 2 samples, got {samples}")]
    DegenerateTimeGrid { samples: usize },
    #[error("rabi time grid window must be finite and > 0, got {t_max_ns}")]
    InvalidTimeWindow { t_max_ns: f64 },
}

impl From<ModelError> for StabilityError {
    fn from(source: ModelError) -> Self {
        StabilityError::computation("RUN.TIME_SERIES", source.to_string())
    }
}

/// Reference simulator: interdot charge transfer of a two-level qubit
/// under quasi-static detuning noise.
///
/// For detuning `ed` (GHz) and combined coupling
/// `delta = delta1_base * delta1_var + delta2_base * delta2_var`, the
/// transfer probability follows the noise-averaged Rabi oscillation
///
/// `P(t) = A / 2 * (1 - cos(omega * t) * exp(-(2 pi sigma t)^2 / 2))`
///
/// with visibility `A = 4 delta^2 / (ed^2 + 4 delta^2)` and angular
/// frequency `omega = 2 pi sqrt(ed^2 + 4 delta^2)`; the stay
/// probability is its complement. Times are in ns throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DephasedRabiModel {
    pub delta1_base_ghz: f64,
    pub delta2_base_ghz: f64,
    pub time_grid: TimeGrid,
}

impl DephasedRabiModel {
    pub const STAY_COLUMN: usize = 0;
    pub const TRANSFER_COLUMN: usize = 1;

    fn validate(&self, params: &ParameterRecord) -> Result<(), ModelError> {
        for (field, value) in [
            ("ed_point", params.ed_point),
            ("sigma", params.sigma),
            ("delta1_var", params.delta1_var),
            ("delta2_var", params.delta2_var),
            ("delta1_base_ghz", self.delta1_base_ghz),
            ("delta2_base_ghz", self.delta2_base_ghz),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteParameter { field, value });
            }
        }
        if params.sigma < 0.0 {
            return Err(ModelError::NegativeSigma {
                value: params.sigma,
            });
        }
        if self.time_grid.samples < 2 {
            return Err(ModelError::DegenerateTimeGrid {
                samples: self.time_grid.samples,
            });
        }
        if !self.time_grid.t_max_ns.is_finite() || self.time_grid.t_max_ns <= 0.0 {
            return Err(ModelError::InvalidTimeWindow {
                t_max_ns: self.time_grid.t_max_ns,
            });
        }
        Ok(())
    }
}

impl Default for DephasedRabiModel {
    fn default() -> Self {
        Self {
            delta1_base_ghz: DELTA1_BASE_GHZ,
            delta2_base_ghz: DELTA2_BASE_GHZ,
            time_grid: TimeGrid::default(),
        }
    }
}

impl TimeSeriesSimulator for DephasedRabiModel {
    fn run_time_series(&self, params: &ParameterRecord) -> StabilityResult<TimeSeries> {
        self.validate(params)?;

        let detuning = params.ed_point;
        let coupling =
            self.delta1_base_ghz * params.delta1_var + self.delta2_base_ghz * params.delta2_var;
        let quadrature = detuning * detuning + 4.0 * coupling * coupling;
        let visibility = if quadrature > 0.0 {
            4.0 * coupling * coupling / quadrature
        } else {
            // Both detuning and coupling vanish: nothing ever moves.
            0.0
        };
        let omega = TAU * quadrature.sqrt();

        let trange = Array1::linspace(0.0, self.time_grid.t_max_ns, self.time_grid.samples);
        let mut process_array = Array2::zeros((self.time_grid.samples, 2));
        for (row, &t) in trange.iter().enumerate() {
            let envelope = (-0.5 * (TAU * params.sigma * t).powi(2)).exp();
            let transfer = 0.5 * visibility * (1.0 - (omega * t).cos() * envelope);
            process_array[[row, Self::STAY_COLUMN]] = 1.0 - transfer;
            process_array[[row, Self::TRANSFER_COLUMN]] = transfer;
        }

        Ok(TimeSeries::new(trange, process_array))
    }
}
