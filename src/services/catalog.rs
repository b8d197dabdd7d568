//! In-memory observation catalog.
//!
//! Holds the current set of extracted observations for a rendering layer.
//! The set is only ever replaced wholesale; individual records are never
//! edited or removed.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::extract::reparse_coordinates;
use crate::models::{GeoBounds, GeoCoordinate, Observation, QualityGrade};

/// Summary of the currently visible observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    /// Distinct resolved species names.
    pub species: usize,
    pub sources: usize,
    pub research: usize,
    pub needs_id: usize,
    pub casual: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
    pub bounds: Option<GeoBounds>,
}

impl CatalogStats {
    pub fn count_for(&self, grade: QualityGrade) -> usize {
        match grade {
            QualityGrade::Research => self.research,
            QualityGrade::NeedsId => self.needs_id,
            QualityGrade::Casual => self.casual,
        }
    }
}

/// Observation set plus the active text and grade filters.
#[derive(Debug, Clone, Default)]
pub struct ObservationCatalog {
    observations: Vec<Observation>,
    filter: String,
    grade: Option<QualityGrade>,
}

impl ObservationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole observation set, keeping the filter.
    pub fn replace_all<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = Observation>,
    {
        self.observations = observations.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.observations.clear();
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.trim().to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Restrict visible observations to one quality grade, or lift the
    /// restriction with `None`.
    pub fn set_grade(&mut self, grade: Option<QualityGrade>) {
        self.grade = grade;
    }

    pub fn grade(&self) -> Option<QualityGrade> {
        self.grade
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Every observation, ignoring the filter.
    pub fn all(&self) -> &[Observation] {
        &self.observations
    }

    /// Observations matching the current filters, in load order.
    pub fn visible(&self) -> Vec<&Observation> {
        self.observations
            .iter()
            .filter(|o| o.matches_query(&self.filter))
            .filter(|o| self.grade.is_none() || self.grade == Some(o.quality_grade()))
            .collect()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::enclosing(self.visible().into_iter().map(|o| &o.coordinates))
    }

    /// Coordinates for the `index`th visible observation, re-derived from
    /// its title when possible.
    pub fn locate(&self, index: usize) -> Option<GeoCoordinate> {
        let visible = self.visible();
        let observation = visible.get(index)?;
        Some(reparse_coordinates(observation).unwrap_or(observation.coordinates))
    }

    pub fn stats(&self) -> CatalogStats {
        let visible = self.visible();

        let species: HashSet<&str> = visible.iter().filter_map(|o| o.species.as_deref()).collect();
        let sources: HashSet<&str> = visible.iter().map(|o| o.source_url.as_str()).collect();
        let dates: Vec<NaiveDate> = visible.iter().filter_map(|o| o.parsed_date()).collect();

        let mut stats = CatalogStats {
            total: visible.len(),
            species: species.len(),
            sources: sources.len(),
            research: 0,
            needs_id: 0,
            casual: 0,
            earliest: dates.iter().min().copied(),
            latest: dates.iter().max().copied(),
            bounds: GeoBounds::enclosing(visible.iter().map(|o| &o.coordinates)),
        };

        for observation in &visible {
            match observation.quality_grade() {
                QualityGrade::Research => stats.research += 1,
                QualityGrade::NeedsId => stats.needs_id += 1,
                QualityGrade::Casual => stats.casual += 1,
            }
        }

        stats
    }

    /// Visible observations as a GeoJSON `FeatureCollection`.
    pub fn to_geojson(&self) -> serde_json::Value {
        let features: Vec<serde_json::Value> = self
            .visible()
            .into_iter()
            .map(Observation::to_geojson_feature)
            .collect();

        serde_json::json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
