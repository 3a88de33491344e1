// alias.rs - Display-name substitution for raw sample identifiers

use crate::error::{MatrixError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Maps a raw identifier to its display name; unknown identifiers pass through
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an alias file with `name` and `alias` header columns.
    ///
    /// `.csv` files are comma-separated, anything else tab-separated.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(MatrixError::config(format!(
                "--alias \"{}\" is not valid",
                path.display()
            )));
        }

        let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
            _ => b'\t',
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(path)
            .map_err(|e| MatrixError::config(format!("Failed to open alias file '{}': {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| MatrixError::config(format!("Failed to read alias header: {}", e)))?
            .clone();
        let name_idx = headers.iter().position(|h| h.trim() == "name");
        let alias_idx = headers.iter().position(|h| h.trim() == "alias");

        let (name_idx, alias_idx) = match (name_idx, alias_idx) {
            (Some(n), Some(a)) => (n, a),
            _ => {
                return Err(MatrixError::config(format!(
                    "Alias file '{}' should contain name/alias columns",
                    path.display()
                )))
            }
        };

        let mut table = Self::new();
        for (row_num, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                MatrixError::config(format!(
                    "Malformed alias file '{}' at row {}: {}",
                    path.display(),
                    row_num + 2,
                    e
                ))
            })?;
            if let (Some(name), Some(alias)) = (record.get(name_idx), record.get(alias_idx)) {
                table.insert(name.trim(), alias.trim());
            }
        }

        println!("📋 Loaded {} aliases from '{}'", table.len(), path.display());
        Ok(table)
    }

    pub fn insert(&mut self, name: &str, alias: &str) {
        self.aliases.insert(name.to_string(), alias.to_string());
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.aliases.get(raw).map(|s| s.as_str())
    }

    /// Display name for `raw`, or `raw` itself when it has no alias
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.get(raw).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, alias) in iter {
            table.insert(name, alias);
        }
        table
    }
}
