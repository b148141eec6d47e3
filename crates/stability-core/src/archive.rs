use crate::domain::{ParameterRecord, StabilityError, StabilityResult, TimeSeries};
use ndarray::arr0;
use ndarray_npy::{NpzWriter, WriteNpzError};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Archive filenames are the zero-padded step number plus this suffix.
pub const ARCHIVE_SUFFIX: &str = "output.npz";

/// Entry names inside each archive; the container appends `.npy` to
/// each. Consumers address parameters by these names, so they are part
/// of the output contract.
pub const ARCHIVE_ENTRIES: [&str; 6] = [
    "ed",
    "sigma",
    "delta1",
    "delta2",
    "trange",
    "process_array",
];

/// Digits needed to number every step of a job, never fewer than the
/// two the legacy driver always used, so any plan of up to 100 steps
/// keeps byte-identical filenames.
pub fn filename_width(planned_steps: usize) -> usize {
    let last_step = planned_steps.saturating_sub(1);
    last_step.to_string().len().max(2)
}

pub fn archive_name(step: usize, width: usize) -> String {
    format!("{:0width$}{}", step, ARCHIVE_SUFFIX, width = width)
}

/// Writes one `.npz` archive per step into a fixed output directory.
///
/// Step numbering restarts at zero in every job, so two jobs pointed at
/// the same directory overwrite each other; the orchestrator is
/// expected to isolate jobs by directory.
#[derive(Debug, Clone)]
pub struct ArchivePackager {
    output_dir: PathBuf,
    width: usize,
}

impl ArchivePackager {
    pub fn new(output_dir: impl Into<PathBuf>, planned_steps: usize) -> StabilityResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| {
            StabilityError::io_system(
                "IO.OUTPUT_DIR",
                format!(
                    "failed to create output directory '{}': {}",
                    output_dir.display(),
                    source
                ),
            )
        })?;
        Ok(Self {
            output_dir,
            width: filename_width(planned_steps),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn filename_width(&self) -> usize {
        self.width
    }

    pub fn archive_name(&self, step: usize) -> String {
        archive_name(step, self.width)
    }

    pub fn archive_path(&self, step: usize) -> PathBuf {
        self.output_dir.join(self.archive_name(step))
    }

    /// Packages one step, silently replacing any existing archive of
    /// the same name.
    pub fn write_archive(
        &self,
        step: usize,
        params: &ParameterRecord,
        series: &TimeSeries,
    ) -> StabilityResult<PathBuf> {
        let path = self.archive_path(step);
        let file = File::create(&path).map_err(|source| {
            StabilityError::io_system(
                "IO.ARCHIVE_WRITE",
                format!("failed to create archive '{}': {}", path.display(), source),
            )
        })?;
        write_entries(file, params, series).map_err(|source| {
            StabilityError::io_system(
                "IO.ARCHIVE_WRITE",
                format!("failed to write archive '{}': {}", path.display(), source),
            )
        })?;
        Ok(path)
    }
}

fn write_entries(
    file: File,
    params: &ParameterRecord,
    series: &TimeSeries,
) -> Result<(), WriteNpzError> {
    let mut npz = NpzWriter::new(file);
    // Scalars are stored as 0-d arrays, matching the legacy layout.
    npz.add_array("ed", &arr0(params.ed_point))?;
    npz.add_array("sigma", &arr0(params.sigma))?;
    npz.add_array("delta1", &arr0(params.delta1_var))?;
    npz.add_array("delta2", &arr0(params.delta2_var))?;
    npz.add_array("trange", &series.trange)?;
    npz.add_array("process_array", &series.process_array)?;
    npz.finish()?;
    Ok(())
}
