//! Human-readable run summaries

use orgmatch_indexer::RunSummary;

/// How many publish errors to show before truncating
const MAX_REPORTED_ERRORS: usize = 5;

/// Format the end-of-run report printed to the user
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Loaded at least {} records from the store",
            summary.identifiers
        ),
        format!(
            "{} organisations saved to the search index",
            summary.published
        ),
    ];

    if !summary.errors.is_empty() {
        lines.push(format!(
            "{} errors while saving. Showing first {} errors",
            summary.errors.len(),
            summary.errors.len().min(MAX_REPORTED_ERRORS)
        ));
        for error in summary.errors.iter().take(MAX_REPORTED_ERRORS) {
            lines.push(format!("  {error}"));
        }
    }

    match &summary.sweep_error {
        Some(error) => lines.push(format!(
            "Sweep failed, stale documents remain until the next run: {error}"
        )),
        None => lines.push(format!("Removed {} old documents", summary.deleted)),
    }

    lines
}
