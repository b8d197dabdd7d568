//! Butterfly observation records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::GeoCoordinate;

/// Display text for a species name that could not be parsed.
pub const UNKNOWN_SPECIES: &str = "Unknown Species";
/// Display text for a common name that could not be parsed.
pub const UNKNOWN_COMMON_NAME: &str = "Unknown";

/// How complete an observation's metadata is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Research,
    NeedsId,
    Casual,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::NeedsId => "needs_id",
            Self::Casual => "casual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "research" => Some(Self::Research),
            "needs_id" => Some(Self::NeedsId),
            "casual" => Some(Self::Casual),
            _ => None,
        }
    }

    /// All grades, best first.
    pub fn all() -> [Self; 3] {
        [Self::Research, Self::NeedsId, Self::Casual]
    }
}

/// One extracted sighting with coordinates and descriptive metadata.
///
/// `species` and `common_name` are `None` when the title text could not be
/// parsed, which is distinct from a legitimately empty value. Use
/// [`Observation::species_label`] and [`Observation::common_name_label`] for
/// display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Scientific name.
    pub species: Option<String>,
    pub common_name: Option<String>,
    pub coordinates: GeoCoordinate,
    pub location: String,
    /// `YYYY/MM/DD` as written in the title, or empty.
    pub date: String,
    pub photographer: String,
    /// Thumbnail shown in the gallery.
    pub image_url: String,
    /// Link target of the gallery anchor.
    pub full_image_url: String,
    /// Page the record was extracted from.
    pub source_url: String,
    /// Entity-decoded title, kept so coordinates can be re-derived.
    pub original_title: String,
}

impl Observation {
    pub fn species_label(&self) -> &str {
        self.species.as_deref().unwrap_or(UNKNOWN_SPECIES)
    }

    pub fn common_name_label(&self) -> &str {
        self.common_name.as_deref().unwrap_or(UNKNOWN_COMMON_NAME)
    }

    pub fn has_species(&self) -> bool {
        self.species.is_some()
    }

    /// Parsed observation date, if the date token is a real calendar day.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y/%m/%d").ok()
    }

    /// Grade by metadata completeness: research needs species, location and
    /// date; needs_id only a species.
    pub fn quality_grade(&self) -> QualityGrade {
        if self.has_species() && !self.location.is_empty() && !self.date.is_empty() {
            QualityGrade::Research
        } else if self.has_species() {
            QualityGrade::NeedsId
        } else {
            QualityGrade::Casual
        }
    }

    /// Case-insensitive match against species, common name and location.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [
            self.species.as_deref(),
            self.common_name.as_deref(),
            Some(self.location.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }

    /// GeoJSON `Feature` with a `Point` geometry.
    pub fn to_geojson_feature(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": self.coordinates.to_position(),
            },
            "properties": {
                "species": self.species,
                "common_name": self.common_name,
                "location": self.location,
                "date": self.date,
                "photographer": self.photographer,
                "image_url": self.image_url,
                "full_image_url": self.full_image_url,
                "source_url": self.source_url,
                "original_title": self.original_title,
                "quality_grade": self.quality_grade().as_str(),
            },
        })
    }
}
