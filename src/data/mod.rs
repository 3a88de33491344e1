// mod.rs - Data structures module

pub mod alias;
pub mod loaders;
pub mod metadata;
pub mod samples;

// Re-export main types for convenience
pub use alias::AliasTable;
pub use metadata::{ColumnDescriptor, ColumnKind, ColumnValues, MetadataTable};
pub use samples::resolve_restriction;
