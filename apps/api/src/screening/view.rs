//! The display view over a session's screening state.
//!
//! A field is shown only when it is BOTH requested by the current toggles
//! AND present in the last run's results. Checking a toggle after a run
//! that did not include it shows nothing until the next run; unchecking
//! one hides the computed value without discarding it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;

use crate::models::Toggles;
use crate::sessions::ScreeningPhase;

#[derive(Debug, Default, Serialize)]
pub struct ResultsView {
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Newline-joined block, one number per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<String>,
    /// Newline-joined block, one address per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordcloud_png_base64: Option<String>,
    /// Failure notes for requested features that failed in the last run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Projects the session phase through the currently-requested toggles.
pub fn build_view(phase: &ScreeningPhase, requested: &Toggles) -> ResultsView {
    let ScreeningPhase::Populated { results, .. } = phase else {
        return ResultsView {
            phase: "idle",
            ..Default::default()
        };
    };

    let mut view = ResultsView {
        phase: "populated",
        ..Default::default()
    };

    if requested.summary {
        view.summary = results.summary.clone();
    }
    if requested.phone {
        view.phone_numbers = results.phone_numbers.as_ref().map(|p| p.join("\n"));
    }
    if requested.email {
        view.emails = results.emails.as_ref().map(|e| e.join("\n"));
    }
    if requested.links {
        view.links = results.links.clone();
    }
    if requested.wordcloud {
        view.wordcloud_png_base64 = results.wordcloud_png.as_ref().map(|png| BASE64.encode(png));
    }

    view.warnings = results
        .failures
        .iter()
        .filter(|f| match f.feature {
            crate::models::Feature::Summary => requested.summary,
            crate::models::Feature::Phone => requested.phone,
            crate::models::Feature::Email => requested.email,
            crate::models::Feature::Links => requested.links,
            crate::models::Feature::Wordcloud => requested.wordcloud,
        })
        .map(|f| f.message.clone())
        .collect();

    view
}
