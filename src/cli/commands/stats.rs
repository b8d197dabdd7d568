//! Catalog summary command.

use console::style;

use lepimap::config::Config;
use lepimap::models::QualityGrade;

use super::super::helpers::{load_catalog, resolve_sources};

/// Print counts, quality grades, date range and bounds.
pub async fn cmd_stats(
    config: &Config,
    sources: &[String],
    filter: Option<&str>,
    grade: Option<QualityGrade>,
    json: bool,
) -> anyhow::Result<()> {
    let sources = resolve_sources(sources, config)?;
    let catalog = load_catalog(config, &sources, filter, grade).await?;
    let stats = catalog.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("\n{}", style("Observation Summary").bold());
    println!("{}", "-".repeat(40));
    if !catalog.filter().is_empty() {
        println!("{:<16} {}", "Filter:", catalog.filter());
    }
    if let Some(grade) = catalog.grade() {
        println!("{:<16} {}", "Grade:", grade.as_str());
    }
    println!("{:<16} {}", "Observations:", stats.total);
    println!("{:<16} {}", "Species:", stats.species);
    println!("{:<16} {}", "Sources:", stats.sources);

    for grade in QualityGrade::all() {
        println!(
            "{:<16} {}",
            format!("  {}:", grade.as_str()),
            stats.count_for(grade)
        );
    }

    if let (Some(earliest), Some(latest)) = (stats.earliest, stats.latest) {
        println!("{:<16} {} to {}", "Dates:", earliest, latest);
    }

    if let Some(bounds) = stats.bounds {
        let center = bounds.center();
        println!(
            "{:<16} S {:.4}, W {:.4}, N {:.4}, E {:.4}",
            "Bounds:", bounds.south, bounds.west, bounds.north, bounds.east
        );
        println!("{:<16} {:.4}, {:.4}", "Center:", center.latitude, center.longitude);
    }

    Ok(())
}
