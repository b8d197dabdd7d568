//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod coords;
mod extract;
mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lepimap::config::Config;
use lepimap::models::QualityGrade;

/// Output format for extracted observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON array of observations
    Json,
    /// GeoJSON FeatureCollection for map renderers
    Geojson,
}

#[derive(Parser)]
#[command(name = "lepimap")]
#[command(about = "Extract butterfly observations from photo-gallery pages")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn parse_grade(s: &str) -> Result<QualityGrade, String> {
    QualityGrade::from_str(&s.trim().to_lowercase().replace('-', "_")).ok_or_else(|| {
        let valid: Vec<&str> = QualityGrade::all().iter().map(|g| g.as_str()).collect();
        format!("unknown grade '{}' (expected one of: {})", s, valid.join(", "))
    })
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract observations from gallery pages (files or http(s) URLs)
    Extract {
        /// Gallery pages; defaults to the configured sources
        sources: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Only keep observations whose species, common name or location contains this text
        #[arg(long)]
        filter: Option<String>,
        /// Only keep observations of this quality grade (research, needs_id, casual)
        #[arg(long, value_parser = parse_grade)]
        grade: Option<QualityGrade>,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse coordinates from a piece of title text
    Coords {
        /// Text to parse (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Summarize observations from gallery pages
    Stats {
        /// Gallery pages; defaults to the configured sources
        sources: Vec<String>,
        /// Only count observations matching this text
        #[arg(long)]
        filter: Option<String>,
        /// Only count observations of this quality grade
        #[arg(long, value_parser = parse_grade)]
        grade: Option<QualityGrade>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments, load configuration and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_with_options(cli.config.as_deref()).await;

    match cli.command {
        Commands::Extract {
            sources,
            format,
            filter,
            grade,
            output,
        } => {
            extract::cmd_extract(
                &config,
                &sources,
                format,
                filter.as_deref(),
                grade,
                output.as_deref(),
            )
            .await
        }
        Commands::Coords { text } => coords::cmd_coords(&text.join(" ")),
        Commands::Stats {
            sources,
            filter,
            grade,
            json,
        } => stats::cmd_stats(&config, &sources, filter.as_deref(), grade, json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade() {
        assert_eq!(parse_grade("research"), Ok(QualityGrade::Research));
        assert_eq!(parse_grade("Needs-ID"), Ok(QualityGrade::NeedsId));
        assert_eq!(parse_grade(" casual "), Ok(QualityGrade::Casual));

        let err = parse_grade("verified").unwrap_err();
        assert!(err.contains("research, needs_id, casual"));
    }

    #[test]
    fn test_extract_grade_flag() {
        let cli = Cli::try_parse_from(["lepimap", "extract", "page.html", "--grade", "needs_id"])
            .unwrap();
        match cli.command {
            Commands::Extract { grade, sources, .. } => {
                assert_eq!(grade, Some(QualityGrade::NeedsId));
                assert_eq!(sources, vec!["page.html".to_string()]);
            }
            _ => panic!("expected extract command"),
        }

        assert!(Cli::try_parse_from(["lepimap", "stats", "--grade", "bogus"]).is_err());
    }
}
