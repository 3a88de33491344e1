// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.file.is_none() {
            self.file = config.file;
        }
        if self.out_dir.is_none() {
            self.out_dir = config.out_dir;
        }

        // Thresholds (only override defaults, not explicit CLI values)
        if let Some(eucdistper) = config.eucdistper {
            if self.eucdistper == 0.10 {
                self.eucdistper = eucdistper;
            }
        }
        if let Some(sampledist) = config.sampledist {
            if self.sampledist == 1000.0 {
                self.sampledist = sampledist;
            }
        }
        if let Some(geo_method) = config.geo_method {
            if self.geo_method == "vincenty" {
                self.geo_method = geo_method;
            }
        }

        // Sample restriction
        if self.names.is_none() {
            self.names = config.names;
        }
        if self.list.is_none() {
            self.list = config.list;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.summary && config.summary.unwrap_or(false) {
            self.summary = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
