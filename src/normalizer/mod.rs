// mod.rs - Distance matrix to distance/nearness table pair

use crate::data::alias::AliasTable;
use crate::error::{MatrixError, Result};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DISTANCE_FILE: &str = "distance.tab";
pub const NEARNESS_FILE: &str = "nearness.tab";

pub const DEFAULT_PRECISION: usize = 4;
pub const MIN_PRECISION: usize = 1;
pub const MAX_PRECISION: usize = 10;

/// What a normalization pass saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Column labels in the header
    pub samples: usize,
    /// Data rows converted
    pub rows: usize,
}

/// Digits after the decimal point in nearness cells, 1..=10
pub fn validate_precision(precision: usize) -> Result<usize> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(precision)
    } else {
        Err(MatrixError::config(format!(
            "--precision \"{}\" should be between {}-{}",
            precision, MIN_PRECISION, MAX_PRECISION
        )))
    }
}

/// Default output directory: the directory holding the matrix
pub fn default_out_dir(matrix: &Path) -> PathBuf {
    match matrix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Display name of a matrix label: its path basename, then its alias
pub fn display_label<'a>(label: &'a str, aliases: &'a AliasTable) -> &'a str {
    let base = Path::new(label)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(label);
    aliases.resolve(base)
}

/// Convert a distance matrix stream into distance and nearness streams.
///
/// Both outputs keep input row and column order. The header's first cell is
/// written empty and every label goes through [`display_label`]. Distance
/// cells are copied verbatim; nearness cells are `1 - value` formatted with
/// `precision` decimals.
pub fn normalize_lines<R, D, N>(
    reader: R,
    aliases: &AliasTable,
    precision: usize,
    distance_out: &mut D,
    nearness_out: &mut N,
) -> Result<NormalizeSummary>
where
    R: BufRead,
    D: Write,
    N: Write,
{
    let distance_err = |e: std::io::Error| MatrixError::io(Path::new(DISTANCE_FILE), e);
    let nearness_err = |e: std::io::Error| MatrixError::io(Path::new(NEARNESS_FILE), e);
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| MatrixError::data("Empty distance matrix"))?
        .map_err(|e| MatrixError::data(format!("Failed to read header: {}", e)))?;
    let header_line = header_line.trim_end_matches('\r');
    let header_fields: Vec<&str> = header_line.split('\t').collect();
    if header_fields.len() < 2 {
        return Err(MatrixError::data(
            "Distance matrix header must have at least one sample label",
        ));
    }

    let mut header = String::new();
    for label in &header_fields[1..] {
        header.push('\t');
        if !label.is_empty() {
            header.push_str(display_label(label, aliases));
        }
    }
    writeln!(distance_out, "{}", header).map_err(distance_err)?;
    writeln!(nearness_out, "{}", header).map_err(nearness_err)?;

    let mut rows = 0;
    for (line_num, line) in lines.enumerate() {
        let line_no = line_num + 2;
        let line = line.map_err(|e| MatrixError::data(format!("Failed to read line {}: {}", line_no, e)))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != header_fields.len() {
            return Err(MatrixError::data(format!(
                "Line {} has {} fields, expected {}",
                line_no,
                fields.len(),
                header_fields.len()
            )));
        }

        let sample = display_label(fields[0], aliases);
        let values = &fields[1..];

        let mut nearness = String::from(sample);
        for (col, raw) in values.iter().enumerate() {
            let value: f64 = raw.trim().parse().map_err(|_| {
                MatrixError::data(format!(
                    "Non-numeric value '{}' at line {} column {}",
                    raw,
                    line_no,
                    col + 2
                ))
            })?;
            nearness.push('\t');
            nearness.push_str(&format!("{:.*}", precision, 1.0 - value));
        }

        writeln!(distance_out, "{}\t{}", sample, values.join("\t")).map_err(distance_err)?;
        writeln!(nearness_out, "{}", nearness).map_err(nearness_err)?;
        rows += 1;
    }

    Ok(NormalizeSummary {
        samples: header_fields.len() - 1,
        rows,
    })
}

/// Read `matrix` and write `distance.tab` and `nearness.tab` into `out_dir`
pub fn normalize_matrix(
    matrix: &Path,
    out_dir: &Path,
    precision: usize,
    aliases: &AliasTable,
) -> Result<NormalizeSummary> {
    let precision = validate_precision(precision)?;
    if !matrix.is_file() {
        return Err(MatrixError::config(format!(
            "--matrix \"{}\" is not valid",
            matrix.display()
        )));
    }
    create_dir_all(out_dir).map_err(|e| MatrixError::io(out_dir, e))?;

    let input = File::open(matrix).map_err(|e| MatrixError::io(matrix, e))?;
    let distance_path = out_dir.join(DISTANCE_FILE);
    let nearness_path = out_dir.join(NEARNESS_FILE);
    let mut distance_out = BufWriter::new(
        File::create(&distance_path).map_err(|e| MatrixError::io(&distance_path, e))?,
    );
    let mut nearness_out = BufWriter::new(
        File::create(&nearness_path).map_err(|e| MatrixError::io(&nearness_path, e))?,
    );

    let summary = normalize_lines(
        BufReader::new(input),
        aliases,
        precision,
        &mut distance_out,
        &mut nearness_out,
    )?;

    distance_out.flush().map_err(|e| MatrixError::io(&distance_path, e))?;
    nearness_out.flush().map_err(|e| MatrixError::io(&nearness_path, e))?;

    log::debug!(
        "Normalized {} rows × {} samples from {}",
        summary.rows,
        summary.samples,
        matrix.display()
    );
    Ok(summary)
}
