//! lepimap - butterfly observation extraction from photo-gallery pages.
//!
//! Gallery anchors carry entity-encoded titles describing each photo. This
//! crate turns those titles into [`models::Observation`] records with
//! coordinates, names, location, date and photographer, ready for a map
//! renderer.

// Model types use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod extract;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;

pub use extract::{extract_observations, extract_observations_from_str, parse_coordinates};
pub use models::{GeoCoordinate, Observation};
pub use services::ObservationCatalog;
