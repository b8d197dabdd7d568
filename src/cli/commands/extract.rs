//! Observation extraction command.

use std::path::Path;

use console::style;

use lepimap::config::Config;
use lepimap::models::QualityGrade;
use lepimap::services::ObservationCatalog;

use super::super::helpers::{load_catalog, resolve_sources, truncate};
use super::OutputFormat;

/// Load sources, extract observations and print them.
pub async fn cmd_extract(
    config: &Config,
    sources: &[String],
    format: OutputFormat,
    filter: Option<&str>,
    grade: Option<QualityGrade>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let sources = resolve_sources(sources, config)?;
    let catalog = load_catalog(config, &sources, filter, grade).await?;

    let rendered = match format {
        OutputFormat::Table => render_table(&catalog),
        OutputFormat::Json => serde_json::to_string_pretty(&catalog.visible())?,
        OutputFormat::Geojson => serde_json::to_string_pretty(&catalog.to_geojson())?,
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, rendered.as_bytes()).await?;
            println!(
                "{} Wrote {} observations to {}",
                style("✓").green(),
                catalog.visible().len(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn render_table(catalog: &ObservationCatalog) -> String {
    let visible = catalog.visible();
    if visible.is_empty() {
        return format!("{} No observations found", style("!").yellow());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:<20} {:<24} {:<10} {:>10} {:>11}\n",
        "Species", "Common Name", "Location", "Date", "Lat", "Lon"
    ));
    out.push_str(&"-".repeat(108));
    out.push('\n');

    for obs in &visible {
        out.push_str(&format!(
            "{:<28} {:<20} {:<24} {:<10} {:>10.5} {:>11.5}\n",
            truncate(obs.species_label(), 27),
            truncate(obs.common_name_label(), 19),
            truncate(&obs.location, 23),
            obs.date,
            obs.coordinates.latitude,
            obs.coordinates.longitude,
        ));
    }

    out.push_str(&format!(
        "\n{} observations from {} source(s)",
        style(visible.len()).bold(),
        catalog.stats().sources
    ));
    out
}
