// samples.rs - Sample restriction lists

use crate::error::{MatrixError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Split an inline comma-separated list, dropping blanks and repeats
pub fn parse_name_list(names: &str) -> Result<Vec<String>> {
    let separator = Regex::new(r"\s*,\s*")
        .map_err(|e| MatrixError::config(format!("Invalid list separator: {}", e)))?;

    let mut parsed: Vec<String> = Vec::new();
    for name in separator.split(names.trim()) {
        if !name.is_empty() && !parsed.iter().any(|n| n == name) {
            parsed.push(name.to_string());
        }
    }
    Ok(parsed)
}

/// Load sample names from a file, one per line
pub fn load_name_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        MatrixError::config(format!(
            "Failed to open sample list '{}': {}",
            path.display(),
            e
        ))
    })?;

    let reader = BufReader::new(file);
    let mut names: Vec<String> = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            MatrixError::config(format!(
                "Failed to read line {} from '{}': {}",
                line_num + 1,
                path.display(),
                e
            ))
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !names.iter().any(|n| n == trimmed) {
            names.push(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} sample names from '{}'", names.len(), path.display());
    Ok(names)
}

/// Resolve the restriction from `--names` and `--list`.
///
/// The inline list wins when both are given. `None` means every sample in
/// the table participates.
pub fn resolve_restriction(names: Option<&str>, list: Option<&Path>) -> Result<Option<Vec<String>>> {
    if let Some(names) = names.filter(|n| !n.trim().is_empty()) {
        let parsed = parse_name_list(names)?;
        if parsed.is_empty() {
            return Ok(None);
        }
        return Ok(Some(parsed));
    }

    if let Some(list) = list {
        let loaded = load_name_file(list)?;
        if loaded.is_empty() {
            return Err(MatrixError::config(format!(
                "Sample list '{}' contains no names",
                list.display()
            )));
        }
        return Ok(Some(loaded));
    }

    Ok(None)
}
