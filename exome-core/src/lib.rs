#![deny(warnings)]

mod error;
mod ingest;
mod models;
mod store;
mod export;
pub mod lookup;

pub use error::{ExomeError, Result};
pub use ingest::{GeneRecord, PreambleReader, parse_variants};
pub use models::{Exon, Gene, Variant};
pub use store::{Counts, Store};
pub use export::TsvExporter;
pub use lookup::GeneDetail;
