//! Descriptive field extraction from decoded gallery titles.
//!
//! Each field has an ordered list of patterns; the first that matches wins.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::strip_tags;

/// Line-break anchor: `<br>`, a closing paragraph-like tag such as `</p4>`,
/// or a newline.
const LINE_BREAK: &str = r"(?:<br\s*/?>|</p\d*>|\r?\n)";

static NAME_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // <i>species</i> - common</a>
        Regex::new(r"(?is)<i>\s*([^<]+?)\s*</i>\s*[-–—]\s*([^<]+?)\s*</a>")
            .expect("linked name regex"),
        // <i>species</i> - common<...>
        Regex::new(r"(?is)<i>\s*([^<]+?)\s*</i>\s*[-–—]\s*([^<]+?)\s*(?:<|$)")
            .expect("tagged name regex"),
        // loose: markup allowed inside either part, ends at a line break
        Regex::new(r"(?i)<i>(.+?)</i>\s*[-–—]+\s*(.+?)\s*(?:<br\s*/?>|\r?\n|$)")
            .expect("loose name regex"),
    ]
});

static LOCATION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // text before a parenthesized number
        Regex::new(&format!(r"(?i){LINE_BREAK}\s*([^<\n(]+?)\s*\(\s*-?\d"))
            .expect("location-before-coordinates regex"),
        // text running to the end of the title
        Regex::new(&format!(r"(?i){LINE_BREAK}\s*([^<\n]+?)\s*$"))
            .expect("location-to-end regex"),
        // text before a date
        Regex::new(&format!(r"(?i){LINE_BREAK}\s*([^<\n]+?)\s*\d{{4}}/\d{{2}}/\d{{2}}"))
            .expect("location-before-date regex"),
    ]
});

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}/\d{2}/\d{2})").expect("date regex"));

static PHOTOGRAPHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"©\s*([^&<\r\n\x{a0}]+)").expect("photographer regex"));

/// Scientific and common name, each `None` when no pattern matched.
pub fn extract_names(title: &str) -> (Option<String>, Option<String>) {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(title) {
            let species = non_empty(strip_tags(&caps[1]));
            let common = non_empty(strip_tags(&caps[2]));
            if species.is_some() {
                return (species, common);
            }
        }
    }
    (None, None)
}

/// Free-text location, or empty.
pub fn extract_location(title: &str) -> String {
    LOCATION_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(title))
        .map(|caps| clean_location(&caps[1]))
        .unwrap_or_default()
}

/// First `YYYY/MM/DD` token, or empty.
pub fn extract_date(title: &str) -> String {
    DATE.captures(title)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Text after the copyright sign up to an `&`, non-breaking space, tag or
/// line end, or empty.
pub fn extract_photographer(title: &str) -> String {
    PHOTOGRAPHER
        .captures(title)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

fn clean_location(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONARCH: &str = "<p4><i>Danaus plexippus</i> - Monarch</a></p4> Somewhere, TX (34°30'0''N 112°0'0''W) 2021/05/04 © J. Smith";

    #[test]
    fn test_names_linked() {
        let (species, common) = extract_names(MONARCH);
        assert_eq!(species.as_deref(), Some("Danaus plexippus"));
        assert_eq!(common.as_deref(), Some("Monarch"));
    }

    #[test]
    fn test_names_dash_variants() {
        let (species, common) = extract_names("<i>Vanessa atalanta</i> – Red Admiral<br>x");
        assert_eq!(species.as_deref(), Some("Vanessa atalanta"));
        assert_eq!(common.as_deref(), Some("Red Admiral"));

        let (_, common) = extract_names("<I>Papilio glaucus</I> — Tiger Swallowtail");
        assert_eq!(common.as_deref(), Some("Tiger Swallowtail"));
    }

    #[test]
    fn test_names_loose() {
        let (species, common) =
            extract_names("<i><b>Pieris rapae</b></i> -- Cabbage <b>White</b><br>Yard");
        assert_eq!(species.as_deref(), Some("Pieris rapae"));
        assert_eq!(common.as_deref(), Some("Cabbage White"));
    }

    #[test]
    fn test_names_unresolved() {
        assert_eq!(extract_names("Somewhere (1.5, 2.5)"), (None, None));
        assert_eq!(extract_names("<i>Danaus</i> without dash"), (None, None));
    }

    #[test]
    fn test_location_before_coordinates() {
        assert_eq!(extract_location(MONARCH), "Somewhere, TX");
        assert_eq!(
            extract_location("<i>a</i> - b<br>Big Bend NP, (29.3, -103.2)"),
            "Big Bend NP"
        );
    }

    #[test]
    fn test_location_to_end() {
        assert_eq!(
            extract_location("<i>a</i> - b<br/>  Madera Canyon, AZ  "),
            "Madera Canyon, AZ"
        );
    }

    #[test]
    fn test_location_before_date() {
        assert_eq!(
            extract_location("<i>a</i> - b<br>Cave Creek 2020/08/01</p>"),
            "Cave Creek"
        );
    }

    #[test]
    fn test_location_missing() {
        assert_eq!(extract_location("no line break here (1.0, 2.0)"), "");
    }

    #[test]
    fn test_date_and_photographer() {
        assert_eq!(extract_date(MONARCH), "2021/05/04");
        assert_eq!(extract_date("2021-05-04"), "");
        assert_eq!(extract_photographer(MONARCH), "J. Smith");
        assert_eq!(extract_photographer("© Ann Lee &nbsp;more"), "Ann Lee");
        assert_eq!(extract_photographer("© Ann Lee\u{a0}\u{a0}Gallery 4"), "Ann Lee");
        assert_eq!(extract_photographer("no credit"), "");
    }
}
