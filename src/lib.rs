// lib.rs - metamatrix library root

//! # metamatrix - Pairwise relationship matrices from sample metadata
//!
//! This library turns a typed sample metadata table into one binary
//! "related / not related" matrix per column, and converts pre-built
//! distance matrices into paired distance/nearness tables.
//!
//! ## Features
//!
//! - **Typed columns**: `.d` discrete, `.c` continuous, `.ll` geo-coordinate
//! - **Data-driven cutoffs**: continuous columns relate below a rank of the
//!   column's own distance distribution
//! - **Geodesic distances**: Vincenty on WGS-84 or haversine
//! - **Sample restriction**: inline list or file of sample names
//! - **Normalizer**: distance matrix to `distance.tab` + `nearness.tab`
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use metamatrix::prelude::*;
//! use std::path::Path;
//!
//! let table = MetadataTable::from_tsv(Path::new("metadata.tab"))?;
//! let builder = MetadataMatrixBuilder::new(&table, None, ComparatorParams::default())?;
//!
//! prepare_out_dir(Path::new("meta"))?;
//! let report = builder.write_all(Path::new("meta"))?;
//! println!("{} matrices written", report.written.len());
//! # Ok::<(), metamatrix::MatrixError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod normalizer;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{BuildReport, ColumnMatrix, MetadataMatrixBuilder};
    pub use crate::core::{Comparator, ComparatorParams, GeoMethod, LatLon, RelationMatrix};
    pub use crate::data::{AliasTable, ColumnDescriptor, ColumnKind, MetadataTable};
    pub use crate::error::{MatrixError, Result};
    pub use crate::normalizer::normalize_matrix;
    pub use crate::output::{prepare_out_dir, write_relation_matrix};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{ComparatorParams, MetadataMatrixBuilder, RelationMatrix};
pub use data::{AliasTable, MetadataTable};
pub use error::{MatrixError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "metamatrix v{} - Pairwise relationship matrices from sample metadata",
        VERSION
    )
}
