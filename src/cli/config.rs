// config.rs - Configuration file support

use crate::error::{MatrixError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub file: Option<String>,
    pub out_dir: Option<String>,

    // Thresholds
    pub eucdistper: Option<f64>,
    pub sampledist: Option<f64>,
    pub geo_method: Option<String>,

    // Sample restriction
    pub names: Option<String>,
    pub list: Option<String>,

    // Flags
    pub summary: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MatrixError::config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            MatrixError::config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# metamatrix.toml - Configuration file for metamatrix
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Metadata table: `name` column, then columns ending in .d, .c or .ll
file = "/path/to/metadata.tab"

# Output directory (default: `meta` beside the metadata file)
# Any existing directory at this path is removed first
# out_dir = "/path/to/meta"

# =============================================================================
# THRESHOLDS
# =============================================================================

# Continuous (.c) columns: fraction of ranked positive Euclidean distances
# whose value becomes the relatedness cutoff (0 < eucdistper < 1)
eucdistper = 0.10

# Geo-coordinate (.ll) columns: samples closer than this many km are related
sampledist = 1000.0

# Geodesic distance method: vincenty, haversine
geo_method = "vincenty"

# =============================================================================
# SAMPLE RESTRICTION
# =============================================================================

# Comma-separated sample names (takes precedence over `list`)
# names = "sample1, sample2, sample3"

# File with one sample name per line
# list = "samples.txt"

# =============================================================================
# FLAGS
# =============================================================================

# Write summary.json into the output directory
summary = false

# Validate inputs without writing anything
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.eucdistper, Some(0.10));
        assert_eq!(config.sampledist, Some(1000.0));
        assert_eq!(config.geo_method.as_deref(), Some("vincenty"));
        assert!(config.names.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metamatrix.toml");
        fs::write(&path, "file = \"meta.tab\"\neucdistper = 0.25\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config,
            Config {
                file: Some("meta.tab".to_string()),
                eucdistper: Some(0.25),
                ..Config::new()
            }
        );
    }

    #[test]
    fn test_missing_or_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(dir.path().join("absent.toml")).unwrap_err().is_config());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "eucdistper = \"lots\"").unwrap();
        assert!(Config::from_file(&broken).unwrap_err().is_config());
    }
}
