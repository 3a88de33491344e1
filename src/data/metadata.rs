// metadata.rs - Metadata table, typed column descriptors and parsed column values

use crate::core::geo::LatLon;
use crate::error::{MatrixError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Name of the identifier column; must be the first header field
pub const ID_COLUMN: &str = "name";

/// Cell values treated as absent data
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Comparison family of a metadata column, taken from its name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// `.d` - compared by exact equality
    Discrete,
    /// `.c` - compared by Euclidean distance against a rank-derived cutoff
    Continuous,
    /// `.ll` - compared by geodesic distance against a kilometer cutoff
    GeoCoordinate,
}

impl ColumnKind {
    /// Resolve the kind from a column name, `None` if the suffix is unknown
    pub fn from_column_name(name: &str) -> Option<Self> {
        [
            ColumnKind::GeoCoordinate,
            ColumnKind::Continuous,
            ColumnKind::Discrete,
        ]
        .into_iter()
        .find(|kind| name.ends_with(kind.suffix()))
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ColumnKind::Discrete => ".d",
            ColumnKind::Continuous => ".c",
            ColumnKind::GeoCoordinate => ".ll",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ColumnKind::Discrete => "discrete (equality)",
            ColumnKind::Continuous => "continuous (Euclidean distance, rank cutoff)",
            ColumnKind::GeoCoordinate => "geo-coordinate (geodesic distance, km cutoff)",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Discrete => "discrete",
            ColumnKind::Continuous => "continuous",
            ColumnKind::GeoCoordinate => "geo-coordinate",
        };
        write!(f, "{}", name)
    }
}

/// A metadata column and the comparison family it was typed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
    /// Position among the value columns (identifier column excluded)
    pub index: usize,
}

/// Check the header row and type every value column.
///
/// The first field must be `name`; every other field must end in `.d`,
/// `.c` or `.ll`. Any violation rejects the whole table.
pub fn validate_header(fields: &[&str]) -> Result<Vec<ColumnDescriptor>> {
    let shape_error = || {
        MatrixError::config(format!(
            "Headers must be \"{}\" first, then columns ending with \".d\", \".c\" or \".ll\" (found: {})",
            ID_COLUMN,
            fields.join(", ")
        ))
    };

    match fields.first() {
        Some(first) if first.trim() == ID_COLUMN => {}
        _ => return Err(shape_error()),
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(fields.len().saturating_sub(1));

    for (index, raw) in fields[1..].iter().enumerate() {
        let name = raw.trim();
        let kind = ColumnKind::from_column_name(name).ok_or_else(shape_error)?;
        if !seen.insert(name.to_string()) {
            return Err(MatrixError::config(format!("Duplicate column '{}' in header", name)));
        }
        columns.push(ColumnDescriptor {
            name: name.to_string(),
            kind,
            index,
        });
    }

    Ok(columns)
}

/// Samples × typed columns, loaded once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    pub columns: Vec<ColumnDescriptor>,
    /// Sample identifiers in file order
    pub samples: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl MetadataTable {
    /// Assemble a table from already-typed columns and rows.
    ///
    /// Each row is the identifier followed by one raw value per column.
    pub fn from_rows(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut table = Self {
            columns,
            ..Default::default()
        };

        for (row_num, mut row) in rows.into_iter().enumerate() {
            if row.len() != table.columns.len() + 1 {
                return Err(MatrixError::data(format!(
                    "Row {} has {} fields, expected {}",
                    row_num + 1,
                    row.len(),
                    table.columns.len() + 1
                )));
            }
            let sample_id = row.remove(0).trim().to_string();
            if table.index.contains_key(&sample_id) {
                return Err(MatrixError::data(format!(
                    "Duplicate sample identifier '{}'",
                    sample_id
                )));
            }
            table.index.insert(sample_id.clone(), table.samples.len());
            table.samples.push(sample_id);
            table.rows.push(row);
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn contains(&self, sample_id: &str) -> bool {
        self.index.contains_key(sample_id)
    }

    /// Raw cell for a sample in a column
    pub fn value(&self, sample_id: &str, column: &ColumnDescriptor) -> Option<&str> {
        let row = self.index.get(sample_id)?;
        self.rows[*row].get(column.index).map(|s| s.as_str())
    }

    /// Resolve the samples taking part in this run, lexically sorted.
    ///
    /// Without a restriction every row participates; with one, exactly the
    /// listed samples do and each of them must exist in the table.
    pub fn select_samples(&self, restriction: Option<&[String]>) -> Result<Vec<String>> {
        let mut selected: Vec<String> = match restriction {
            Some(names) => {
                let missing: Vec<&str> = names
                    .iter()
                    .filter(|name| !self.contains(name))
                    .map(|name| name.as_str())
                    .collect();
                if !missing.is_empty() {
                    return Err(MatrixError::data(format!(
                        "Sample(s) not found in metadata: {}",
                        missing.join(", ")
                    )));
                }
                names.to_vec()
            }
            None => self.samples.clone(),
        };

        selected.sort();
        selected.dedup();
        Ok(selected)
    }

    /// Raw cells of one column for the given samples, in the same order
    pub fn column_cells<'a>(
        &'a self,
        column: &ColumnDescriptor,
        samples: &[String],
    ) -> Result<Vec<&'a str>> {
        samples
            .iter()
            .map(|sample| {
                self.value(sample, column).ok_or_else(|| {
                    MatrixError::data(format!(
                        "No value for sample '{}' in column '{}'",
                        sample, column.name
                    ))
                })
            })
            .collect()
    }
}

/// True when a raw cell carries no value
pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// Column cells parsed for the comparator of their kind
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Discrete(Vec<String>),
    Continuous(Vec<Vec<f64>>),
    GeoCoordinate(Vec<LatLon>),
}

impl ColumnValues {
    /// Parse raw cells according to the column kind.
    ///
    /// Returns `Ok(None)` when any cell is missing: the column cannot be
    /// compared pairwise and is skipped by the caller. Malformed values are
    /// data errors.
    pub fn parse(column: &ColumnDescriptor, cells: &[&str]) -> Result<Option<Self>> {
        if cells.iter().any(|cell| is_missing(cell)) {
            return Ok(None);
        }

        let values = match column.kind {
            ColumnKind::Discrete => {
                ColumnValues::Discrete(cells.iter().map(|c| c.trim().to_string()).collect())
            }
            ColumnKind::Continuous => {
                let vectors = cells
                    .iter()
                    .map(|cell| parse_numeric(cell, &column.name))
                    .collect::<Result<Vec<_>>>()?;
                if let Some(first) = vectors.first() {
                    if let Some(bad) = vectors.iter().find(|v| v.len() != first.len()) {
                        return Err(MatrixError::data(format!(
                            "Column '{}' mixes values of dimension {} and {}",
                            column.name,
                            first.len(),
                            bad.len()
                        )));
                    }
                }
                ColumnValues::Continuous(vectors)
            }
            ColumnKind::GeoCoordinate => {
                let coords = cells
                    .iter()
                    .map(|cell| {
                        LatLon::parse(cell).map_err(|e| {
                            MatrixError::data(format!("Column '{}': {}", column.name, e))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                ColumnValues::GeoCoordinate(coords)
            }
        };

        Ok(Some(values))
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValues::Discrete(_) => ColumnKind::Discrete,
            ColumnValues::Continuous(_) => ColumnKind::Continuous,
            ColumnValues::GeoCoordinate(_) => ColumnKind::GeoCoordinate,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Discrete(v) => v.len(),
            ColumnValues::Continuous(v) => v.len(),
            ColumnValues::GeoCoordinate(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One number or a comma-separated vector of numbers
fn parse_numeric(cell: &str, column: &str) -> Result<Vec<f64>> {
    cell.split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(MatrixError::data(format!(
                    "Non-numeric value '{}' in continuous column '{}'",
                    cell.trim(),
                    column
                ))),
            }
        })
        .collect()
}
