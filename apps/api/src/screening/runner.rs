//! One screening run: extract text once, then fan out to the toggled
//! features.
//!
//! Feature failures are isolated: a failing summarizer or renderer records a
//! failure note in its own slot and the other features still populate. A
//! document that does not parse is still fatal to the run; with no text
//! there is nothing for any feature to consume.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{extract_contacts, extract_text};
use crate::models::{Feature, FeatureFailure, FeatureResults, Toggles};
use crate::summarize::Summarizer;
use crate::wordcloud::Visualizer;

/// Runs the pipeline for one document and returns the new result set.
pub async fn run_screening(
    toggles: Toggles,
    document: &[u8],
    summarizer: &Arc<dyn Summarizer>,
    visualizer: &Arc<dyn Visualizer>,
) -> Result<FeatureResults, AppError> {
    let text = extract_text(document)?;
    info!("Extracted {} chars of resume text", text.len());
    Ok(run_features(toggles, &text, summarizer, visualizer).await)
}

async fn run_features(
    toggles: Toggles,
    text: &str,
    summarizer: &Arc<dyn Summarizer>,
    visualizer: &Arc<dyn Visualizer>,
) -> FeatureResults {
    let mut results = FeatureResults::default();

    // Phone, email, and links all come from one extraction pass.
    if toggles.wants_contacts() {
        let contacts = extract_contacts(text);
        if toggles.phone {
            results.phone_numbers = Some(contacts.phone);
        }
        if toggles.email {
            results.emails = Some(contacts.email);
        }
        if toggles.links {
            results.links = Some(contacts.links);
        }
    }

    if toggles.summary {
        match summarizer.summarize(text).await {
            Ok(summary) => results.summary = Some(summary),
            Err(e) => {
                warn!("Summary feature failed: {e}");
                results.failures.push(FeatureFailure {
                    feature: Feature::Summary,
                    message: e.to_string(),
                });
            }
        }
    }

    if toggles.wordcloud {
        let visualizer = Arc::clone(visualizer);
        let owned_text = text.to_string();
        let rendered =
            tokio::task::spawn_blocking(move || visualizer.render(&owned_text)).await;
        match rendered {
            Ok(Ok(png)) => results.wordcloud_png = Some(png),
            Ok(Err(e)) => {
                warn!("Word cloud feature failed: {e}");
                results.failures.push(FeatureFailure {
                    feature: Feature::Wordcloud,
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Word cloud render task panicked: {e}");
                results.failures.push(FeatureFailure {
                    feature: Feature::Wordcloud,
                    message: "render task failed".to_string(),
                });
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::summarize::SummarizerError;

    struct StaticSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for StaticSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, SummarizerError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, SummarizerError> {
            Err(SummarizerError::Exhausted { retries: 3 })
        }
    }

    struct StubVisualizer;

    impl Visualizer for StubVisualizer {
        fn render(&self, _text: &str) -> Result<Vec<u8>, AppError> {
            Ok(b"\x89PNG stub".to_vec())
        }
    }

    struct FailingVisualizer;

    impl Visualizer for FailingVisualizer {
        fn render(&self, _text: &str) -> Result<Vec<u8>, AppError> {
            Err(AppError::Render("no words".to_string()))
        }
    }

    fn summarizer(s: impl Summarizer + 'static) -> Arc<dyn Summarizer> {
        Arc::new(s)
    }

    fn visualizer(v: impl Visualizer + 'static) -> Arc<dyn Visualizer> {
        Arc::new(v)
    }

    const TEXT: &str = "Call +1-555-123-4567 or mail jane@example.com, see example.com/cv";

    #[tokio::test]
    async fn test_only_toggled_features_computed() {
        let toggles = Toggles {
            phone: true,
            ..Default::default()
        };
        let results = run_features(
            toggles,
            TEXT,
            &summarizer(StaticSummarizer("unused")),
            &visualizer(StubVisualizer),
        )
        .await;
        assert_eq!(
            results.phone_numbers.as_deref(),
            Some(&["+1-555-123-4567".to_string()][..])
        );
        assert!(results.summary.is_none());
        assert!(results.emails.is_none());
        assert!(results.wordcloud_png.is_none());
    }

    #[tokio::test]
    async fn test_summary_failure_does_not_blank_other_features() {
        let toggles = Toggles {
            summary: true,
            phone: true,
            email: true,
            ..Default::default()
        };
        let results = run_features(
            toggles,
            TEXT,
            &summarizer(FailingSummarizer),
            &visualizer(StubVisualizer),
        )
        .await;
        assert!(results.summary.is_none());
        assert_eq!(results.failures.len(), 1);
        assert_eq!(results.failures[0].feature, Feature::Summary);
        // the rest of the run survived
        assert!(results.phone_numbers.is_some());
        assert_eq!(results.emails.as_deref(), Some(&["jane@example.com".to_string()][..]));
    }

    #[tokio::test]
    async fn test_wordcloud_failure_is_isolated_too() {
        let toggles = Toggles {
            wordcloud: true,
            links: true,
            ..Default::default()
        };
        let results = run_features(
            toggles,
            TEXT,
            &summarizer(StaticSummarizer("unused")),
            &visualizer(FailingVisualizer),
        )
        .await;
        assert!(results.wordcloud_png.is_none());
        assert_eq!(results.failures[0].feature, Feature::Wordcloud);
        assert_eq!(results.links.as_deref(), Some(&["https://example.com/cv".to_string()][..]));
    }

    #[tokio::test]
    async fn test_all_features_populate_on_success() {
        let toggles = Toggles {
            summary: true,
            phone: true,
            email: true,
            links: true,
            wordcloud: true,
        };
        let results = run_features(
            toggles,
            TEXT,
            &summarizer(StaticSummarizer("A concise summary.")),
            &visualizer(StubVisualizer),
        )
        .await;
        assert_eq!(results.summary.as_deref(), Some("A concise summary."));
        assert!(results.failures.is_empty());
        assert_eq!(results.computed().len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_pdf_is_fatal_to_the_run() {
        let err = run_screening(
            Toggles {
                phone: true,
                ..Default::default()
            },
            b"not a pdf at all",
            &summarizer(StaticSummarizer("unused")),
            &visualizer(StubVisualizer),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::DocumentFormat(_)));
    }
}
