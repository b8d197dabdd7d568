//! Shared helper functions for CLI commands.

use console::style;

use lepimap::config::Config;
use lepimap::models::QualityGrade;
use lepimap::services::{collect_observations, ObservationCatalog};
use lepimap::sources::{PageLoader, PageSource};

/// Truncate to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Sources from the command line, or the configured ones when none given.
pub fn resolve_sources(args: &[String], config: &Config) -> anyhow::Result<Vec<PageSource>> {
    let sources: Vec<PageSource> = if args.is_empty() {
        config.page_sources()
    } else {
        args.iter().map(|s| PageSource::parse(s)).collect()
    };

    if sources.is_empty() {
        anyhow::bail!(
            "No sources given. Pass gallery files or URLs, or set `sources` in lepimap.toml"
        );
    }
    Ok(sources)
}

/// Load every source into a fresh catalog with the filters applied.
pub async fn load_catalog(
    config: &Config,
    sources: &[PageSource],
    filter: Option<&str>,
    grade: Option<QualityGrade>,
) -> anyhow::Result<ObservationCatalog> {
    let loader = PageLoader::new(&config.user_agent, config.timeout())?;
    let collected = collect_observations(&loader, sources).await;

    for (source, error) in &collected.failures {
        eprintln!("{} {}: {}", style("!").yellow(), source, error);
    }
    if collected.failures.len() == sources.len() {
        anyhow::bail!("No sources could be loaded");
    }

    let mut catalog = ObservationCatalog::new();
    catalog.replace_all(collected.observations);
    if let Some(query) = filter.or(config.default_filter.as_deref()) {
        catalog.set_filter(query);
    }
    catalog.set_grade(grade);
    Ok(catalog)
}
