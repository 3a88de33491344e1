// mod.rs - Table loaders

pub mod tsv;
