//! Coordinate parsing command.

use console::style;

use lepimap::extract::{parse_coordinates_detailed, CoordinateMatch};

/// Parse `text` and print the first coordinate pair found.
pub fn cmd_coords(text: &str) -> anyhow::Result<()> {
    let Some(found) = parse_coordinates_detailed(text) else {
        anyhow::bail!("No coordinates found in {:?}", text);
    };

    println!("{}", describe_match(&found));
    Ok(())
}

fn describe_match(found: &CoordinateMatch) -> String {
    format!(
        "{} {:.6}, {:.6}  {}",
        style("✓").green(),
        found.coordinate.latitude,
        found.coordinate.longitude,
        style(format!("({} / {})", found.pattern, found.kind.as_str())).dim()
    )
}
