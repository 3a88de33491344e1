// tsv.rs - TSV loader for metadata tables

use crate::data::metadata::{validate_header, MetadataTable};
use crate::error::{MatrixError, Result};
use std::path::Path;

impl MetadataTable {
    /// Load a tab-separated metadata table.
    ///
    /// The header is validated before any row is read, so a badly typed
    /// table is rejected without touching its data.
    pub fn from_tsv(file_path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .from_path(file_path)
            .map_err(|e| {
                MatrixError::config(format!(
                    "Failed to open metadata file '{}': {}",
                    file_path.display(),
                    e
                ))
            })?;

        let header = reader
            .headers()
            .map_err(|e| MatrixError::csv(file_path, e))?
            .clone();
        let header_fields: Vec<&str> = header.iter().collect();

        let columns = validate_header(&header_fields).map_err(|e| match e {
            MatrixError::Config(msg) => MatrixError::config(format!(
                "\"{}\": {}",
                file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                msg
            )),
            other => other,
        })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| MatrixError::csv(file_path, e))?;
            // Blank trailing lines
            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let table = Self::from_rows(columns, rows)?;

        println!(
            "✅ Metadata loaded: {} samples, {} columns",
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use crate::data::metadata::{ColumnKind, MetadataTable};
    use std::fs;

    #[test]
    fn test_load_metadata_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.tab");
        fs::write(
            &path,
            "name\tbiome.d\tdepth.c\tsite.ll\n\
             s2\tmarine\t10\t22.75,-158\n\
             s1\tsoil\t2.5\t32.2,-110.9\n",
        )
        .unwrap();

        let table = MetadataTable::from_tsv(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.samples, vec!["s2", "s1"]);
        assert_eq!(table.columns[1].kind, ColumnKind::Continuous);
        assert_eq!(table.value("s1", &table.columns[0]), Some("soil"));
    }

    #[test]
    fn test_untyped_header_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.tab");
        fs::write(&path, "name\tsampleA\tsampleB\ns1\t1\t2\n").unwrap();

        let err = MetadataTable::from_tsv(&path).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("meta.tab"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.tab");
        fs::write(&path, "name\tbiome.d\tdepth.c\ns1\tsoil\n").unwrap();

        let err = MetadataTable::from_tsv(&path).unwrap_err();
        assert!(err.is_data());
    }
}
