//! Shared sweep constants ported from the legacy stability driver.
//!
//! Every job rebuilds the parameter axes from these literals; the
//! partition stays collision-free only because the values are identical
//! in every process, so they live here rather than per call site.

/// Energy conversion factor, micro-electron-volts to gigahertz.
pub const UEV_TO_GHZ: f64 = 0.241_799_050_402_417_f64;

/// Detuning operating points swept along the bias axis, in GHz.
pub const ED_OPERATING_POINTS: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

/// Quasi-static noise standard deviations before conversion, in ueV.
pub const SIGMA_BASE_UEV: [f64; 3] = [1.0, 5.0, 10.0];

/// Tunnel-coupling variation window: multiplicative factors applied to
/// the base couplings, sampled inclusively.
pub const DELTA_VAR_LO: f64 = 0.9;
pub const DELTA_VAR_HI: f64 = 1.1;
pub const DELTA_VAR_SAMPLES: usize = 21;

/// Base interdot tunnel couplings scaled by the variation factors, in GHz.
pub const DELTA1_BASE_GHZ: f64 = 1.2;
pub const DELTA2_BASE_GHZ: f64 = 0.8;

/// Default simulation time window and sampling for the reference model.
pub const DEFAULT_T_MAX_NS: f64 = 5.0;
pub const DEFAULT_TIME_SAMPLES: usize = 501;
