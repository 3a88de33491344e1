// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::{ComparatorParams, GeoMethod};
use crate::data::resolve_restriction;
use crate::error::{MatrixError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the default output directory created beside the metadata file
pub const DEFAULT_OUT_DIR_NAME: &str = "meta";

#[derive(Debug)]
pub struct ValidationResult {
    pub metadata_file: PathBuf,
    pub out_dir: PathBuf,
    pub params: ComparatorParams,
    /// `None`: every sample in the table participates
    pub restriction: Option<Vec<String>>,
}

/// `<parent of metadata file>/meta`, with `.` as parent for bare file names
pub fn default_out_dir(metadata_file: &Path) -> PathBuf {
    let parent = match metadata_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent.join(DEFAULT_OUT_DIR_NAME)
}

/// Reject an output directory that is, or contains, an input file.
///
/// The output directory is removed before writing, so it must not hold
/// anything the run reads. A directory that does not exist yet cannot.
fn check_out_dir_keeps_input(out_dir: &Path, input: &Path, flag: &str) -> Result<()> {
    if !out_dir.exists() || !input.exists() {
        return Ok(());
    }
    let out_dir_abs = out_dir.canonicalize().map_err(|e| MatrixError::io(out_dir, e))?;
    let input_abs = input.canonicalize().map_err(|e| MatrixError::io(input, e))?;

    if input_abs.starts_with(&out_dir_abs) {
        return Err(MatrixError::config(format!(
            "--out-dir \"{}\" would be removed, but it contains {} \"{}\"",
            out_dir.display(),
            flag,
            input.display()
        )));
    }
    Ok(())
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    let file = args
        .file
        .as_deref()
        .ok_or_else(|| MatrixError::config("--file is required (or `file` in the config file)"))?;
    let metadata_file = PathBuf::from(file);
    if !metadata_file.is_file() {
        return Err(MatrixError::config(format!(
            "--file \"{}\" is not valid",
            metadata_file.display()
        )));
    }

    if !(args.eucdistper > 0.0 && args.eucdistper < 1.0) {
        return Err(MatrixError::config(format!(
            "--eucdistper \"{}\" should be between 0 and 1",
            args.eucdistper
        )));
    }

    if !args.sampledist.is_finite() || args.sampledist < 0.0 {
        return Err(MatrixError::config(format!(
            "--sampledist \"{}\" should be a non-negative number of km",
            args.sampledist
        )));
    }

    let geo_method = GeoMethod::from_str(&args.geo_method).map_err(MatrixError::config)?;

    let restriction = resolve_restriction(args.names.as_deref(), args.list.as_deref().map(Path::new))?;

    let out_dir = match &args.out_dir {
        Some(dir) => PathBuf::from(dir),
        None => default_out_dir(&metadata_file),
    };
    check_out_dir_keeps_input(&out_dir, &metadata_file, "--file")?;
    if let Some(list) = args.list.as_deref() {
        check_out_dir_keeps_input(&out_dir, Path::new(list), "--list")?;
    }

    Ok(ValidationResult {
        metadata_file,
        out_dir,
        params: ComparatorParams {
            euclidean_fraction: args.eucdistper,
            max_km: args.sampledist,
            geo_method,
        },
        restriction,
    })
}
