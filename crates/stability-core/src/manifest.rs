use crate::domain::{StabilityError, StabilityResult, SweepStrategy};
use crate::sweep::{JobSlice, ParameterAxes};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILENAME: &str = "sweep-manifest.json";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// Provenance record written into the output directory before step 0:
/// which job produced the archives, under which strategy and axes.
/// Informational only; nothing reads it back at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobManifest {
    pub schema_version: u32,
    pub job_index: usize,
    pub strategy: SweepStrategy,
    pub planned_steps: usize,
    pub filename_width: usize,
    pub axes: ManifestAxes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestAxes {
    pub ed_points: Vec<f64>,
    pub sigma: Vec<f64>,
    pub delta1_var: Vec<f64>,
    pub delta2_var: Vec<f64>,
}

impl JobManifest {
    pub fn for_job(axes: &ParameterAxes, slice: &dyn JobSlice, filename_width: usize) -> Self {
        Self {
            schema_version: MANIFEST_SCHEMA_VERSION,
            job_index: slice.job_index(),
            strategy: slice.strategy(),
            planned_steps: slice.planned_steps(),
            filename_width,
            axes: ManifestAxes {
                ed_points: axes.ed_points.clone(),
                sigma: axes.sigma.clone(),
                delta1_var: axes.delta1_var.clone(),
                delta2_var: axes.delta2_var.clone(),
            },
        }
    }

    pub fn write(&self, output_dir: &Path) -> StabilityResult<PathBuf> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let payload = serde_json::to_string_pretty(self).map_err(|source| {
            StabilityError::internal(
                "SYS.MANIFEST_ENCODE",
                format!("failed to encode job manifest: {}", source),
            )
        })?;
        fs::write(&path, payload).map_err(|source| {
            StabilityError::io_system(
                "IO.MANIFEST_WRITE",
                format!(
                    "failed to write job manifest '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        Ok(path)
    }
}
