// builder.rs - Metadata table to per-column relationship matrices

use crate::core::comparator::{ColumnRelation, Comparator, ComparatorParams};
use crate::data::metadata::{ColumnDescriptor, ColumnValues, MetadataTable};
use crate::error::{MatrixError, Result};
use crate::output::{meta_file_name, write_relation_matrix, ColumnReport, SkippedColumn};
use std::path::Path;

/// Result of relating one column
#[derive(Debug, Clone)]
pub enum ColumnMatrix {
    Computed(ColumnRelation),
    /// The column yields no computable matrix; the reason is reported, not raised
    Skipped(String),
}

/// Everything a run wrote or skipped, in column input order
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub written: Vec<ColumnReport>,
    pub skipped: Vec<SkippedColumn>,
}

pub struct MetadataMatrixBuilder<'a> {
    table: &'a MetadataTable,
    samples: Vec<String>,
    params: ComparatorParams,
}

impl<'a> MetadataMatrixBuilder<'a> {
    /// Fix the participating samples once for every column
    pub fn new(
        table: &'a MetadataTable,
        restriction: Option<&[String]>,
        params: ComparatorParams,
    ) -> Result<Self> {
        let samples = table.select_samples(restriction)?;
        Ok(Self {
            table,
            samples,
            params,
        })
    }

    /// Participating samples, lexically sorted
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn params(&self) -> &ComparatorParams {
        &self.params
    }

    /// Compute the relationship matrix of a single column
    pub fn relate_column(&self, column: &ColumnDescriptor) -> Result<ColumnMatrix> {
        if self.samples.is_empty() {
            return Ok(ColumnMatrix::Skipped("no samples selected".to_string()));
        }

        let cells = self.table.column_cells(column, &self.samples)?;
        let values = match ColumnValues::parse(column, &cells)? {
            Some(values) => values,
            None => return Ok(ColumnMatrix::Skipped("missing values".to_string())),
        };

        let comparator = Comparator::for_kind(column.kind, &self.params);
        let relation = comparator.relate(&self.samples, &values).map_err(|e| match e {
            MatrixError::Data(msg) => MatrixError::data(format!("Column '{}': {}", column.name, msg)),
            other => other,
        })?;

        if let Some(cutoff) = relation.cutoff {
            log::debug!("Column '{}' cutoff: {}", column.name, cutoff);
        }
        Ok(ColumnMatrix::Computed(relation))
    }

    /// Relate and write every column to `<out_dir>/<column>.meta`.
    ///
    /// Files are written as each column completes; an error in a later
    /// column leaves the earlier files in place.
    pub fn write_all(&self, out_dir: &Path) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        for (col_num, column) in self.table.columns.iter().enumerate() {
            match self.relate_column(column)? {
                ColumnMatrix::Computed(relation) => {
                    let path = out_dir.join(meta_file_name(&column.name));
                    println!("{:3}: Writing {}", col_num + 1, path.display());
                    write_relation_matrix(&path, &relation.matrix)?;
                    report.written.push(ColumnReport {
                        column: column.name.clone(),
                        kind: column.kind,
                        samples: relation.matrix.len(),
                        related_pairs: relation.matrix.related_pairs(),
                        cutoff: relation.cutoff,
                        path: path.display().to_string(),
                    });
                }
                ColumnMatrix::Skipped(reason) => {
                    println!("⚠️  No data for col \"{}\" ({})", column.name, reason);
                    report.skipped.push(SkippedColumn {
                        column: column.name.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(report)
    }
}
