//! Random access catalogs over the trace region
//!
//! Trace records need not share a length, so locating trace `i` requires
//! knowing the length of every trace before it. [`catalog_traces`] makes one
//! forward pass over the file and builds four catalogs sharing trace ordinals:
//!
//! - ordinal to header offset and ordinal to sample count, always present;
//! - CDP number to ordinal and line coordinates to ordinal, present only
//!   when their keys identify traces uniquely.
//!
//! Catalogs hold no reference to the file and can be reused for any number
//! of reads through [`crate::trace`].

pub mod builder;
pub mod scan;

pub use builder::{Catalog, CatalogBuilder, DenseCatalog, DenseCatalogBuilder};
pub use scan::{
    Cancellable, LineKey, LineKeySource, NoProgress, Progress, TraceCatalogs, catalog_traces,
};
