use super::ParameterAxes;
use crate::domain::ParameterRecord;

/// The full Cartesian product of the four axes, materialized once per
/// job invocation. Enumeration order is fixed: `ed_point` varies
/// slowest, then `sigma`, then `delta1_var`, with `delta2_var` fastest,
/// so the flat index of a record is
/// `((e * n_sigma + s) * n_delta1 + a) * n_delta2 + b`.
/// The slice selectors invert exactly this arithmetic; changing the
/// loop order here would silently re-map every job.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    records: Vec<ParameterRecord>,
}

impl ParameterGrid {
    pub fn cartesian(axes: &ParameterAxes) -> Self {
        let mut records = Vec::with_capacity(axes.grid_len());
        for &ed_point in &axes.ed_points {
            for &sigma in &axes.sigma {
                for &delta1_var in &axes.delta1_var {
                    for &delta2_var in &axes.delta2_var {
                        records.push(ParameterRecord::new(
                            ed_point, sigma, delta1_var, delta2_var,
                        ));
                    }
                }
            }
        }
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&ParameterRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[ParameterRecord] {
        &self.records
    }
}
