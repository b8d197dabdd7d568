//! Data models for lepimap.

mod coordinate;
mod observation;

pub use coordinate::{GeoBounds, GeoCoordinate};
pub use observation::{Observation, QualityGrade, UNKNOWN_COMMON_NAME, UNKNOWN_SPECIES};
