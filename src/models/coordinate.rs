//! Geographic coordinate types.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components lie within the valid latitude/longitude ranges.
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// GeoJSON position order: `[longitude, latitude]`.
    pub fn to_position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Bounding box enclosing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Smallest box containing every coordinate, or `None` for an empty set.
    pub fn enclosing<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoCoordinate>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            south: first.latitude,
            west: first.longitude,
            north: first.latitude,
            east: first.longitude,
        };

        for c in iter {
            bounds.south = bounds.south.min(c.latitude);
            bounds.north = bounds.north.max(c.latitude);
            bounds.west = bounds.west.min(c.longitude);
            bounds.east = bounds.east.max(c.longitude);
        }

        Some(bounds)
    }

    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}
