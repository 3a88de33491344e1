// mod.rs - Core logic module

pub mod builder;
pub mod comparator;
pub mod geo;
pub mod pairwise;
pub mod threshold;

// Re-export main types for convenience
pub use builder::{BuildReport, ColumnMatrix, MetadataMatrixBuilder};
pub use comparator::{ColumnRelation, Comparator, ComparatorParams};
pub use geo::{GeoMethod, LatLon};
pub use pairwise::{CondensedMatrix, RelationMatrix};
pub use threshold::rank_cutoff;
