//! HTML entity decoding and tag stripping for gallery title text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches a named, decimal or hex character reference.
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]{2,8});").expect("entity regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Resolve HTML character references in a single pass.
///
/// `&amp;lt;` becomes `&lt;`, not `<`. Unknown named entities and invalid
/// code points are left as written.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    ENTITY
        .replace_all(s, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(num) = body.strip_prefix('#') {
                let code = match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
            } else {
                named_entity(body)
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "deg" => '°',
        "copy" => '©',
        "ndash" => '–',
        "mdash" => '—',
        "prime" => '′',
        "Prime" => '″',
        _ => return None,
    };
    Some(c)
}

/// Remove markup tags and collapse surrounding whitespace.
pub fn strip_tags(s: &str) -> String {
    let stripped = TAG.replace_all(s, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
