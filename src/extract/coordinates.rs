//! Coordinate parsing for free-form gallery titles.
//!
//! Patterns are tried in a fixed order and the first accepted match wins:
//! - five degrees/minutes/seconds variants, strictest first
//! - decimal degrees with hemisphere letters
//! - plain signed decimal pairs (range checked)
//! - a permissive "any two numbers" fallback (range checked)
//!
//! DMS text can also satisfy the weaker decimal patterns, so the DMS
//! variants must stay ahead of them.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

use crate::models::GeoCoordinate;
use crate::utils::decode_entities;

/// How a pattern's captures are converted to degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Eight captures: d, m, s, N/S, d, m, s, E/W.
    Dms,
    /// Four captures: lat, N/S, lon, E/W.
    Hemisphere,
    /// Two captures: signed lat, signed lon.
    Plain,
    /// Four captures like `Hemisphere`, letters optional.
    Fallback,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dms => "dms",
            Self::Hemisphere => "hemisphere",
            Self::Plain => "plain",
            Self::Fallback => "fallback",
        }
    }
}

struct CoordinatePattern {
    name: &'static str,
    kind: PatternKind,
    regex: Regex,
}

/// A coordinate together with the pattern that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMatch {
    pub coordinate: GeoCoordinate,
    pub pattern: &'static str,
    pub kind: PatternKind,
}

const DEG: &str = r"(\d{1,3})\s*[°º]\s*";
const MIN: &str = r"(\d{1,2})\s*['′’]\s*";
const SEC_STRICT: &str = r#"(\d{1,2}(?:\.\d+)?)\s*(?:''|"|″|”)\s*"#;
const SEC_TOLERANT: &str = r#"(\d{1,2}(?:\.\d+)?)\s*(?:''|"|″|”|['′’])?\s*"#;
const DMS_LOOSE_PART: &str = r"(\d{1,3})[^\d\n]{1,3}?(\d{1,2})[^\d\n]{1,3}?(\d{1,2}(?:\.\d+)?)[^\dNSEW\n]{0,3}?";
const HEMI_NUM: &str = r"(\d{1,3}(?:\.\d+)?)\s*[°º]?\s*";
const SIGNED: &str = r"(-?\d{1,3}(?:\.\d+)?)";
const SIGNED_DECIMAL: &str = r"(-?\b\d{1,3}\.\d+)";

fn dms(sec: &str, sep: &str, parenthesized: bool) -> String {
    let body = format!("{DEG}{MIN}{sec}([NS])\\s*{sep}\\s*{DEG}{MIN}{sec}([EW])");
    if parenthesized {
        format!(r"\(\s*{body}\s*\)")
    } else {
        body
    }
}

fn hemisphere(parenthesized: bool) -> String {
    let body = format!(r"{HEMI_NUM}([NS])\s*[,;/]?\s*{HEMI_NUM}([EW])");
    if parenthesized {
        format!(r"\(\s*{body}\s*\)")
    } else {
        body
    }
}

static PATTERNS: LazyLock<Vec<CoordinatePattern>> = LazyLock::new(|| {
    let table: Vec<(&'static str, PatternKind, String)> = vec![
        ("dms_parenthesized", PatternKind::Dms, dms(SEC_STRICT, ",?", true)),
        (
            "dms_parenthesized_tolerant",
            PatternKind::Dms,
            dms(SEC_TOLERANT, "[,;/]?", true),
        ),
        ("dms_bare", PatternKind::Dms, dms(SEC_STRICT, ",?", false)),
        (
            "dms_bare_tolerant",
            PatternKind::Dms,
            dms(SEC_TOLERANT, "[,;/]?", false),
        ),
        (
            "dms_loose",
            PatternKind::Dms,
            format!(r"{DMS_LOOSE_PART}([NS])[^\d\n]{{0,4}}?{DMS_LOOSE_PART}([EW])"),
        ),
        (
            "hemisphere_parenthesized",
            PatternKind::Hemisphere,
            hemisphere(true),
        ),
        ("hemisphere_bare", PatternKind::Hemisphere, hemisphere(false)),
        (
            "decimal_parenthesized",
            PatternKind::Plain,
            format!(r"\(\s*{SIGNED}\s*(?:,\s*|\s+){SIGNED}\s*\)"),
        ),
        (
            "decimal_bare",
            PatternKind::Plain,
            format!(r"{SIGNED_DECIMAL}\s*(?:,\s*|\s+){SIGNED_DECIMAL}"),
        ),
        (
            "any_two_numbers",
            PatternKind::Fallback,
            r"(-?\d+(?:\.\d+)?)\s*[°º]?\s*([NSns])?[^\d\-\n]{1,5}?(-?\d+(?:\.\d+)?)\s*[°º]?\s*([EWew])?"
                .to_string(),
        ),
    ];

    table
        .into_iter()
        .map(|(name, kind, pattern)| CoordinatePattern {
            name,
            kind,
            regex: Regex::new(&pattern).expect("coordinate pattern should compile"),
        })
        .collect()
});

/// Find the first coordinate pair in `text`.
///
/// HTML entities are decoded before matching. Returns `None` for empty text
/// or when no pattern yields an acceptable pair.
pub fn parse_coordinates(text: &str) -> Option<GeoCoordinate> {
    parse_coordinates_detailed(text).map(|m| m.coordinate)
}

/// [`parse_coordinates`] for callers holding an optional title.
pub fn parse_coordinates_opt(text: Option<&str>) -> Option<GeoCoordinate> {
    text.and_then(parse_coordinates)
}

/// Like [`parse_coordinates`], also reporting which pattern matched.
pub fn parse_coordinates_detailed(text: &str) -> Option<CoordinateMatch> {
    if text.trim().is_empty() {
        return None;
    }

    let decoded = decode_entities(text);

    for pattern in PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(&decoded) else {
            continue;
        };

        match convert(pattern.kind, &caps) {
            Some(coordinate) => {
                trace!(
                    pattern = pattern.name,
                    lat = coordinate.latitude,
                    lon = coordinate.longitude,
                    "coordinate match"
                );
                return Some(CoordinateMatch {
                    coordinate,
                    pattern: pattern.name,
                    kind: pattern.kind,
                });
            }
            None => {
                trace!(pattern = pattern.name, matched = &caps[0], "rejected match");
            }
        }
    }

    None
}

fn convert(kind: PatternKind, caps: &Captures) -> Option<GeoCoordinate> {
    match kind {
        PatternKind::Dms => {
            let lat = dms_to_decimal(caps, 1)?;
            let lon = dms_to_decimal(caps, 5)?;
            Some(GeoCoordinate::new(
                signed(lat, caps.get(4).map(|m| m.as_str()), 'S'),
                signed(lon, caps.get(8).map(|m| m.as_str()), 'W'),
            ))
        }
        PatternKind::Hemisphere => hemisphere_pair(caps),
        PatternKind::Plain => {
            let coord = GeoCoordinate::new(number(caps, 1)?, number(caps, 2)?);
            coord.is_in_range().then_some(coord)
        }
        PatternKind::Fallback => hemisphere_pair(caps).filter(GeoCoordinate::is_in_range),
    }
}

fn hemisphere_pair(caps: &Captures) -> Option<GeoCoordinate> {
    let lat = number(caps, 1)?;
    let lon = number(caps, 3)?;
    Some(GeoCoordinate::new(
        signed(lat, caps.get(2).map(|m| m.as_str()), 'S'),
        signed(lon, caps.get(4).map(|m| m.as_str()), 'W'),
    ))
}

/// Degrees/minutes/seconds starting at capture `first`.
fn dms_to_decimal(caps: &Captures, first: usize) -> Option<f64> {
    let deg = number(caps, first)?;
    let min = number(caps, first + 1)?;
    let sec = number(caps, first + 2)?;
    Some(deg + min / 60.0 + sec / 3600.0)
}

fn number(caps: &Captures, idx: usize) -> Option<f64> {
    caps.get(idx)?.as_str().parse().ok()
}

fn signed(value: f64, hemisphere: Option<&str>, negative: char) -> f64 {
    let is_negative = hemisphere
        .and_then(|h| h.chars().next())
        .is_some_and(|c| c.eq_ignore_ascii_case(&negative));
    if is_negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn assert_coord(text: &str, lat: f64, lon: f64) {
        let c = parse_coordinates(text).unwrap_or_else(|| panic!("no match in {text:?}"));
        assert!(
            approx(c.latitude, lat) && approx(c.longitude, lon),
            "{text:?} -> {c:?}, expected ({lat}, {lon})"
        );
    }

    #[test]
    fn test_dms_parenthesized() {
        assert_coord("Somewhere (34°30'0''N 112°0'0''W)", 34.5, -112.0);
        let m = parse_coordinates_detailed("(34°30'0''N, 112°0'0''W)").unwrap();
        assert_eq!(m.pattern, "dms_parenthesized");
        assert_eq!(m.kind, PatternKind::Dms);
    }

    #[test]
    fn test_dms_fractional_seconds_and_hemispheres() {
        let lat = 12.0 + 15.0 / 60.0 + 30.5 / 3600.0;
        let lon = 45.0 + 1.0 / 60.0 + 2.25 / 3600.0;
        assert_coord("(12°15'30.5\"S 45°1'2.25\"E)", -lat, lon);
        assert_coord("(12°15'30.5\"N 45°1'2.25\"W)", lat, -lon);
    }

    #[test]
    fn test_dms_tolerant_variants() {
        let m = parse_coordinates_detailed("(34°30'0N; 112°0'0W)").unwrap();
        assert_eq!(m.pattern, "dms_parenthesized_tolerant");
        assert!(approx(m.coordinate.latitude, 34.5));

        let m = parse_coordinates_detailed("at 34° 30′ 0″N 112° 0′ 0″W today").unwrap();
        assert_eq!(m.pattern, "dms_bare");
        assert!(approx(m.coordinate.longitude, -112.0));

        let m = parse_coordinates_detailed("34°30'0N/112°0'0W").unwrap();
        assert_eq!(m.pattern, "dms_bare_tolerant");

        let m = parse_coordinates_detailed("34 30 0 N 112 0 0 W").unwrap();
        assert_eq!(m.pattern, "dms_loose");
        assert!(approx(m.coordinate.latitude, 34.5));
        assert!(approx(m.coordinate.longitude, -112.0));
    }

    #[test]
    fn test_dms_with_encoded_degree_sign() {
        assert_coord("(34&#176;30'0''N 112&#176;0'0''W)", 34.5, -112.0);
    }

    #[test]
    fn test_dms_preempts_decimal_patterns() {
        let m = parse_coordinates_detailed("(10°30'0''N 20°0'0''E) and (1.5, 2.5)").unwrap();
        assert_eq!(m.kind, PatternKind::Dms);
        assert!(approx(m.coordinate.latitude, 10.5));
    }

    #[test]
    fn test_hemisphere_decimal() {
        let m = parse_coordinates_detailed("(12.34N, 56.78W)").unwrap();
        assert_eq!(m.pattern, "hemisphere_parenthesized");
        assert!(approx(m.coordinate.latitude, 12.34));
        assert!(approx(m.coordinate.longitude, -56.78));

        let m = parse_coordinates_detailed("near 33.1°S 151.2°E").unwrap();
        assert_eq!(m.pattern, "hemisphere_bare");
        assert!(approx(m.coordinate.latitude, -33.1));
        assert!(approx(m.coordinate.longitude, 151.2));
    }

    #[test]
    fn test_hemisphere_is_not_range_checked() {
        let c = parse_coordinates("(95.0N, 10.0E)").unwrap();
        assert_eq!(c.latitude, 95.0);
    }

    #[test]
    fn test_plain_decimal_exact() {
        let c = parse_coordinates("Trail (34.5, -112.3)").unwrap();
        assert_eq!(c, GeoCoordinate::new(34.5, -112.3));
    }

    #[test]
    fn test_plain_decimal_forms() {
        assert_coord("(34.5 -112.3)", 34.5, -112.3);
        assert_coord("at 34.5, -112.3 on the ridge", 34.5, -112.3);
        let m = parse_coordinates_detailed("at 34.5 -112.3").unwrap();
        assert_eq!(m.pattern, "decimal_bare");
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(parse_coordinates("(200.0, 50.0)").is_none());
        assert!(parse_coordinates("(45.0, 190.0)").is_none());
    }

    #[test]
    fn test_rejected_match_falls_through_to_next_pattern() {
        let m = parse_coordinates_detailed("(200, 50) or 12.5, 40.25").unwrap();
        assert_eq!(m.pattern, "decimal_bare");
        assert_eq!(m.coordinate, GeoCoordinate::new(12.5, 40.25));
    }

    #[test]
    fn test_fallback_any_two_numbers() {
        let m = parse_coordinates_detailed("lat 12 lon 34").unwrap();
        assert_eq!(m.kind, PatternKind::Fallback);
        assert_eq!(m.coordinate, GeoCoordinate::new(12.0, 34.0));

        let m = parse_coordinates_detailed("12s / 34w").unwrap();
        assert_eq!(m.coordinate, GeoCoordinate::new(-12.0, -34.0));
    }

    #[test]
    fn test_date_alone_is_not_a_coordinate() {
        assert!(parse_coordinates("Seen 2021/05/04").is_none());
    }

    #[test]
    fn test_empty_and_absent() {
        assert!(parse_coordinates("").is_none());
        assert!(parse_coordinates("   ").is_none());
        assert!(parse_coordinates_opt(None).is_none());
        assert!(parse_coordinates_opt(Some("")).is_none());
        assert!(parse_coordinates("no numbers here").is_none());
    }
}
