pub mod grid;
pub mod partition;

pub use grid::ParameterGrid;
pub use partition::{JobSlice, MultivariateSlice, SingleAxisSlice};

use crate::common::constants::{
    DELTA_VAR_HI, DELTA_VAR_LO, DELTA_VAR_SAMPLES, ED_OPERATING_POINTS, SIGMA_BASE_UEV, UEV_TO_GHZ,
};
use crate::domain::{StabilityError, SweepResult};
use ndarray::Array1;

/// The four ordered parameter axes shared by every partitioning
/// strategy. Axes are rebuilt from fixed literals in each job process;
/// disjointness across jobs relies on every process holding the exact
/// same values, never on shared storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterAxes {
    pub ed_points: Vec<f64>,
    pub sigma: Vec<f64>,
    pub delta1_var: Vec<f64>,
    pub delta2_var: Vec<f64>,
}

impl ParameterAxes {
    pub fn new(
        ed_points: Vec<f64>,
        sigma: Vec<f64>,
        delta1_var: Vec<f64>,
        delta2_var: Vec<f64>,
    ) -> SweepResult<Self> {
        validate_axis("ed_points", &ed_points)?;
        validate_axis("sigma", &sigma)?;
        validate_axis("delta1_var", &delta1_var)?;
        validate_axis("delta2_var", &delta2_var)?;
        Ok(Self {
            ed_points,
            sigma,
            delta1_var,
            delta2_var,
        })
    }

    /// The production axes of the legacy driver: six detuning operating
    /// points, three noise levels converted from ueV to GHz, and a
    /// 21-point coupling variation window on both tunnel couplings.
    pub fn reference() -> Self {
        let coupling_axis =
            Array1::linspace(DELTA_VAR_LO, DELTA_VAR_HI, DELTA_VAR_SAMPLES).to_vec();
        Self {
            ed_points: ED_OPERATING_POINTS.to_vec(),
            sigma: SIGMA_BASE_UEV
                .iter()
                .map(|sigma_uev| sigma_uev * UEV_TO_GHZ)
                .collect(),
            delta1_var: coupling_axis.clone(),
            delta2_var: coupling_axis,
        }
    }

    /// Number of (ed_point, sigma) pairs; one single-axis job per pair.
    pub fn pair_count(&self) -> usize {
        self.ed_points.len() * self.sigma.len()
    }

    /// Grid entries sharing one (ed_point, sigma) pair; the multivariate
    /// per-job block.
    pub fn block_size(&self) -> usize {
        self.delta1_var.len() * self.delta2_var.len()
    }

    pub fn grid_len(&self) -> usize {
        self.pair_count() * self.block_size()
    }

    /// Steps in the one-at-a-time coupling sweep run by a single-axis job.
    pub fn coupling_sweep_len(&self) -> usize {
        self.delta1_var.len() + self.delta2_var.len()
    }
}

fn validate_axis(name: &'static str, values: &[f64]) -> SweepResult<()> {
    if values.is_empty() {
        return Err(StabilityError::input_validation(
            "INPUT.AXIS_EMPTY",
            format!("parameter axis '{}' must not be empty", name),
        ));
    }
    for (index, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(StabilityError::input_validation(
                "INPUT.AXIS_VALUE",
                format!(
                    "parameter axis '{}' must be finite, index {} got {}",
                    name, index, value
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ParameterAxes;
    use crate::common::constants::UEV_TO_GHZ;
    use crate::domain::StabilityErrorCategory;

    #[test]
    fn reference_axes_match_legacy_driver_shape() {
        let axes = ParameterAxes::reference();

        assert_eq!(axes.ed_points, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(axes.sigma.len(), 3);
        assert_eq!(axes.delta1_var.len(), 21);
        assert_eq!(axes.delta2_var, axes.delta1_var);

        assert!((axes.sigma[0] - UEV_TO_GHZ).abs() <= 1.0e-15);
        assert!((axes.sigma[1] - 5.0 * UEV_TO_GHZ).abs() <= 1.0e-14);
        assert!((axes.sigma[2] - 10.0 * UEV_TO_GHZ).abs() <= 1.0e-14);

        assert!((axes.delta1_var[0] - 0.9).abs() <= 1.0e-12);
        assert!((axes.delta1_var[20] - 1.1).abs() <= 1.0e-12);
    }

    #[test]
    fn reference_counts_cover_the_production_grid() {
        let axes = ParameterAxes::reference();
        assert_eq!(axes.pair_count(), 18);
        assert_eq!(axes.block_size(), 441);
        assert_eq!(axes.grid_len(), 7938);
        assert_eq!(axes.coupling_sweep_len(), 42);
    }

    #[test]
    fn empty_axis_is_rejected() {
        let error = ParameterAxes::new(vec![1.0], Vec::new(), vec![1.0], vec![1.0])
            .expect_err("empty sigma axis should fail");
        assert_eq!(error.category(), StabilityErrorCategory::InputValidationError);
        assert_eq!(error.placeholder(), "INPUT.AXIS_EMPTY");
    }

    #[test]
    fn non_finite_axis_value_is_rejected() {
        let error = ParameterAxes::new(vec![1.0], vec![0.5], vec![0.9, f64::NAN], vec![1.0])
            .expect_err("NaN coupling factor should fail");
        assert_eq!(error.placeholder(), "INPUT.AXIS_VALUE");
    }
}
