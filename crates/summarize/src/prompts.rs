//! Prompt assembly helpers for the map and reduce stages. Pure functions.

use crate::orchestrator::ChunkSummary;

/// Positional framing for a chunk's map-stage prompt.
pub(crate) fn position_label(index: usize, total: usize) -> &'static str {
    if total <= 1 {
        "the document"
    } else if index == 0 {
        "the beginning of the document"
    } else if index == total - 1 {
        "the end of the document"
    } else {
        "a middle section of the document"
    }
}

/// Join surviving chunk summaries with provenance markers for the reduce
/// prompt. Numbering runs over the surviving list, not source indices.
pub(crate) fn marker_join(summaries: &[ChunkSummary]) -> String {
    let total = summaries.len();
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| format!("--- CHUNK {}/{} SUMMARY ---\n{}", i + 1, total, s.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Plain blank-line join used when the reduce stage degrades.
pub(crate) fn plain_join(summaries: &[ChunkSummary]) -> String {
    summaries
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
