//! Service layer for lepimap.
//!
//! Domain logic separated from the CLI so other front-ends can reuse it.

pub mod catalog;
pub mod collect;

pub use catalog::{CatalogStats, ObservationCatalog};
pub use collect::{collect_observations, extract_page, CollectResult};
