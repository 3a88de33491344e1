// mod.rs - Output writers: relationship matrices and run summaries

use crate::core::pairwise::RelationMatrix;
use crate::data::metadata::ColumnKind;
use crate::error::{MatrixError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, remove_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Run summary file name inside the output directory
pub const SUMMARY_FILE: &str = "summary.json";

/// `<column>.meta`
pub fn meta_file_name(column: &str) -> String {
    format!("{}.meta", column)
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| MatrixError::io(parent, e))?;
    }
    Ok(())
}

/// Remove `dir` if it exists and create it empty
pub fn prepare_out_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        remove_dir_all(dir).map_err(|e| MatrixError::io(dir, e))?;
    }
    create_dir_all(dir).map_err(|e| MatrixError::io(dir, e))?;
    Ok(())
}

/// Write a relationship matrix as TSV.
///
/// Header: an empty cell then the identifiers; each row: the identifier
/// then its 0/1 cells.
pub fn write_relation_tsv<W: Write>(writer: &mut W, matrix: &RelationMatrix) -> std::io::Result<()> {
    for sample in matrix.samples() {
        write!(writer, "\t{}", sample)?;
    }
    writeln!(writer)?;

    for (i, sample) in matrix.samples().iter().enumerate() {
        write!(writer, "{}", sample)?;
        for cell in matrix.row(i) {
            write!(writer, "\t{}", cell)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a relationship matrix to `file_path`
pub fn write_relation_matrix(file_path: &Path, matrix: &RelationMatrix) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| MatrixError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);

    write_relation_tsv(&mut writer, matrix).map_err(|e| MatrixError::io(file_path, e))?;
    writer.flush().map_err(|e| MatrixError::io(file_path, e))?;
    Ok(())
}

/// One written column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column: String,
    pub kind: ColumnKind,
    pub samples: usize,
    pub related_pairs: usize,
    /// Continuous: rank-derived distance; geo-coordinate: km
    pub cutoff: Option<f64>,
    pub path: String,
}

/// One column that produced no matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub column: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub version: String,
    pub generated: String,
    pub command_line: String,
    pub input: String,
    pub out_dir: String,
    pub euclidean_fraction: f64,
    pub max_km: f64,
    pub geo_method: String,
    pub samples: Vec<String>,
    pub columns: Vec<ColumnReport>,
    pub skipped: Vec<SkippedColumn>,
}

impl RunSummary {
    pub fn generated_now() -> String {
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

/// Write the run summary as pretty-printed JSON
pub fn write_summary(file_path: &Path, summary: &RunSummary) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let content = serde_json::to_string_pretty(summary)
        .map_err(|e| MatrixError::data(format!("Failed to serialize run summary: {}", e)))?;
    std::fs::write(file_path, content).map_err(|e| MatrixError::io(file_path, e))?;
    println!("📄 Run summary written to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_tsv_layout() {
        let samples: Vec<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        let matrix = RelationMatrix::build(&samples, |_, _| true);

        let mut out = Vec::new();
        write_relation_tsv(&mut out, &matrix).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\ta\tb\na\t1\t1\nb\t1\t1\n");
    }

    #[test]
    fn test_prepare_out_dir_recreates() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("meta");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("stale.meta"), "old").unwrap();

        prepare_out_dir(&out).unwrap();
        assert!(out.is_dir());
        assert!(!out.join("stale.meta").exists());
    }

    #[test]
    fn test_summary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_FILE);
        let summary = RunSummary {
            version: "0.1.0".to_string(),
            generated: RunSummary::generated_now(),
            command_line: "metamatrix -f meta.tab".to_string(),
            input: "meta.tab".to_string(),
            out_dir: "meta".to_string(),
            euclidean_fraction: 0.1,
            max_km: 1000.0,
            geo_method: "vincenty".to_string(),
            samples: vec!["s1".to_string()],
            columns: vec![ColumnReport {
                column: "depth.c".to_string(),
                kind: ColumnKind::Continuous,
                samples: 1,
                related_pairs: 0,
                cutoff: None,
                path: "meta/depth.c.meta".to_string(),
            }],
            skipped: vec![],
        };

        write_summary(&path, &summary).unwrap();
        let loaded: RunSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.columns, summary.columns);
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"continuous\""));
    }
}
