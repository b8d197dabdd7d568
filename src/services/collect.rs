//! Concurrent loading and extraction across several gallery pages.

use futures::future::join_all;
use tracing::{info, warn};

use crate::extract::extract_observations_from_str;
use crate::models::Observation;
use crate::sources::{FetchedPage, PageLoader, PageSource, SourceError};

/// Observations from every page that loaded, plus the failures.
#[derive(Debug, Default)]
pub struct CollectResult {
    /// Observations in source order, then document order.
    pub observations: Vec<Observation>,
    pub failures: Vec<(PageSource, SourceError)>,
}

/// Load all sources concurrently and extract their observations.
///
/// A source that fails to load is logged and recorded in `failures`; the
/// remaining sources are still processed.
pub async fn collect_observations(loader: &PageLoader, sources: &[PageSource]) -> CollectResult {
    let outcomes = join_all(sources.iter().map(|source| async move {
        let result = match loader.load(source).await {
            Ok(page) => extract_page(page).await,
            Err(e) => Err(e),
        };
        (source.clone(), result)
    }))
    .await;

    let mut collected = CollectResult::default();
    for (source, result) in outcomes {
        match result {
            Ok(observations) => {
                info!(source = %source, count = observations.len(), "extracted");
                collected.observations.extend(observations);
            }
            Err(e) => {
                warn!(source = %source, error = %e, "skipping source");
                collected.failures.push((source, e));
            }
        }
    }

    collected
}

/// Parse and extract on the blocking pool; the parsed document is not `Send`.
pub async fn extract_page(page: FetchedPage) -> Result<Vec<Observation>, SourceError> {
    tokio::task::spawn_blocking(move || extract_observations_from_str(&page.html, &page.source_url))
        .await
        .map_err(|e| SourceError::Task(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    const PAGE: &str = r#"<html><body>
        <a href="full/1.jpg" title="&lt;i&gt;Danaus plexippus&lt;/i&gt; - Monarch&lt;br&gt;Austin (30.25, -97.75)"><img src="t/1.jpg"></a>
        <a href="full/2.jpg" title="no coordinates here"><img src="t/2.jpg"></a>
    </body></html>"#;

    #[tokio::test]
    async fn test_extract_page() {
        let page = FetchedPage {
            source_url: "https://example.org/gallery/".to_string(),
            html: PAGE.to_string(),
        };
        let observations = extract_page(page).await.unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].location, "Austin");
        assert_eq!(
            observations[0].full_image_url,
            "https://example.org/gallery/full/1.jpg"
        );
    }

    #[tokio::test]
    async fn test_collect_keeps_going_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        std::fs::write(&good, PAGE).unwrap();

        let sources = vec![
            PageSource::File(PathBuf::from("/nonexistent/missing.html")),
            PageSource::File(good),
        ];
        let loader = PageLoader::new("lepimap-test", Duration::from_secs(5)).unwrap();
        let result = collect_observations(&loader, &sources).await;

        assert_eq!(result.observations.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].0, sources[0]);
        assert!(result.observations[0].source_url.ends_with("good.html"));
    }
}
