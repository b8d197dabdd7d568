//! Observation extraction from gallery pages.
//!
//! Gallery anchors wrap a thumbnail and carry a title attribute holding
//! entity-encoded markup with the species, location, coordinates, date and
//! photographer credit. Extraction is pure: the same document and source URL
//! always yield the same observations.

mod coordinates;
mod fields;

pub use coordinates::{
    parse_coordinates, parse_coordinates_detailed, parse_coordinates_opt, CoordinateMatch,
    PatternKind,
};
pub use fields::{extract_date, extract_location, extract_names, extract_photographer};

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::models::{GeoCoordinate, Observation};
use crate::utils::decode_entities;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector"));
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("image selector"));

/// Attributes checked for the descriptive title, in order.
const TITLE_ATTRIBUTES: [&str; 2] = ["data-title", "title"];

/// Extract every observation in document order.
///
/// Anchors without a non-blank title or without an image are ignored.
/// Anchors whose title holds no coordinates are dropped.
pub fn extract_observations(document: &Html, source_url: &str) -> Vec<Observation> {
    let base = Url::parse(source_url).ok();
    let mut observations = Vec::new();
    let mut candidates = 0usize;

    for anchor in document.select(&ANCHOR) {
        let Some(raw_title) = descriptive_title(&anchor) else {
            continue;
        };
        let Some(image) = anchor.select(&IMAGE).next() else {
            continue;
        };
        candidates += 1;

        let title = decode_entities(raw_title);
        let Some(coordinates) = parse_coordinates(&title) else {
            debug!(source = source_url, title = %title, "no coordinates, skipping");
            continue;
        };

        observations.push(build_observation(
            title,
            coordinates,
            &anchor,
            &image,
            source_url,
            base.as_ref(),
        ));
    }

    debug!(
        source = source_url,
        candidates,
        extracted = observations.len(),
        "extracted observations"
    );

    observations
}

/// Parse `html` and extract its observations.
pub fn extract_observations_from_str(html: &str, source_url: &str) -> Vec<Observation> {
    let document = Html::parse_document(html);
    extract_observations(&document, source_url)
}

/// Re-derive coordinates from an observation's retained title.
pub fn reparse_coordinates(observation: &Observation) -> Option<GeoCoordinate> {
    parse_coordinates(&observation.original_title)
}

fn descriptive_title<'a>(anchor: &ElementRef<'a>) -> Option<&'a str> {
    TITLE_ATTRIBUTES
        .iter()
        .filter_map(|name| anchor.value().attr(name))
        .find(|title| !title.trim().is_empty())
}

fn build_observation(
    title: String,
    coordinates: GeoCoordinate,
    anchor: &ElementRef,
    image: &ElementRef,
    source_url: &str,
    base: Option<&Url>,
) -> Observation {
    let (species, common_name) = extract_names(&title);

    let image_src = image
        .value()
        .attr("src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| image.value().attr("data-src"))
        .unwrap_or_default();
    let href = anchor.value().attr("href").unwrap_or_default();

    Observation {
        species,
        common_name,
        coordinates,
        location: extract_location(&title),
        date: extract_date(&title),
        photographer: extract_photographer(&title),
        image_url: resolve_link(base, image_src),
        full_image_url: resolve_link(base, href),
        source_url: source_url.to_string(),
        original_title: title,
    }
}

/// Resolve a possibly relative link against the page URL.
fn resolve_link(base: Option<&Url>, link: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }

    base.and_then(|b| b.join(link).ok())
        .map(String::from)
        .unwrap_or_else(|| link.to_string())
}
