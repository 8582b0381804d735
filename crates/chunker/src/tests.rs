//! Tests for the chunking engine.

use condense_core::document::{ContentHint, Document};

use super::estimator::SizeEstimator;
use super::patterns::{default_patterns, extract};
use super::{chunk_document, Chunk, ChunkConfig, ChunkError};

fn config(bound: usize, overlap: usize) -> ChunkConfig {
    ChunkConfig {
        max_chunk_units: bound,
        overlap_units: overlap,
        estimator: SizeEstimator::Coarse,
    }
}

fn plain(text: impl Into<String>) -> Document {
    Document::new(text, ContentHint::Plain)
}

fn markdown(text: impl Into<String>) -> Document {
    Document::new(text, ContentHint::Markdown)
}

/// Re-join chunks, stripping each chunk's overlap prefix against the
/// pre-overlap pieces produced by a zero-overlap run.
fn reconstruct(chunks: &[Chunk], pre_overlap: &[Chunk]) -> String {
    chunks
        .iter()
        .zip(pre_overlap)
        .map(|(c, pre)| {
            let prefix_len = c.content.len() - pre.content.len();
            &c.content[prefix_len..]
        })
        .collect()
}

// ── Size estimator ──────────────────────────────────────────────────

#[test]
fn coarse_estimate_is_ceiling_of_quarter_length() {
    let est = SizeEstimator::Coarse;
    assert_eq!(est.estimate(""), 0);
    assert_eq!(est.estimate("abc"), 1);
    assert_eq!(est.estimate("abcd"), 1);
    assert_eq!(est.estimate("abcde"), 2);
    assert_eq!(est.estimate(&"x".repeat(400)), 100);
}

#[test]
fn weighted_estimate_counts_short_words_as_half() {
    let est = SizeEstimator::Weighted;
    assert_eq!(est.estimate(""), 0);
    // "an ox" — two short words: (0.5 + 0.5) * 1.2 = 1.2 → 1
    assert_eq!(est.estimate("an ox"), 1);
    // Ten full words, no punctuation: 10 * 1.2 = 12
    let words = (0..10).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    assert_eq!(est.estimate(&words), 12);
}

#[test]
fn weighted_estimate_surcharges_punctuation() {
    let est = SizeEstimator::Weighted;
    // "hello, world!" — two full words + comma + bang:
    // (1.0 + 1.0 + 0.5 + 0.5) * 1.2 = 3.6 → 3
    assert_eq!(est.estimate("hello, world!"), 3);
}

#[test]
fn estimator_parses_from_config_strings() {
    assert_eq!("coarse".parse::<SizeEstimator>(), Ok(SizeEstimator::Coarse));
    assert_eq!("weighted".parse::<SizeEstimator>(), Ok(SizeEstimator::Weighted));
    assert!("exact".parse::<SizeEstimator>().is_err());
}

// ── Special patterns ────────────────────────────────────────────────

#[test]
fn extract_carves_out_headings() {
    let text = "# Title\nintro text\n## Section\nbody text";
    let pieces = extract(text, default_patterns());
    assert!(pieces.len() >= 3);
    assert!(pieces[0].starts_with("# Title"));
    assert_eq!(pieces.concat(), text);
}

#[test]
fn extract_prefers_fences_over_headings() {
    // Both patterns match, but the fence has the higher priority: the
    // heading must survive inside an inter-fence span, not as its own match.
    let text = "# Heading\n```\ncode here\n```\ntrailing prose";
    let pieces = extract(text, default_patterns());
    assert_eq!(pieces.concat(), text);
    assert!(
        pieces.iter().any(|p| p.starts_with("```") && p.ends_with("```")),
        "fence must be its own piece: {pieces:?}"
    );
}

#[test]
fn extract_returns_empty_when_nothing_matches() {
    let pieces = extract("just two plain sentences. nothing structural.", default_patterns());
    assert!(pieces.is_empty());
}

#[test]
fn extract_glues_blank_spans_to_neighbors() {
    // Newlines between headings are blank inter-match spans; they must be
    // folded into adjacent pieces so nothing is lost.
    let text = "# One\n\n# Two\n\n# Three";
    let pieces = extract(text, default_patterns());
    assert_eq!(pieces.concat(), text);
    for piece in &pieces {
        assert!(!piece.trim().is_empty());
    }
}

#[test]
fn extract_handles_leading_blank_span() {
    let text = "\n\n# Heading\nbody";
    let pieces = extract(text, default_patterns());
    assert_eq!(pieces.concat(), text);
    assert!(pieces[0].starts_with("\n\n"));
}

#[test]
fn extract_keeps_trailing_span() {
    let text = "- item one\n- item two\nplain trailer";
    let pieces = extract(text, default_patterns());
    assert_eq!(pieces.concat(), text);
    assert!(pieces.last().is_some_and(|p| p.contains("plain trailer")));
}

// ── Facade: bounds and round trips ──────────────────────────────────

#[test]
fn small_document_is_one_chunk() {
    let doc = plain("Hello world");
    let chunks = chunk_document(&doc, &config(100, 10)).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "Hello world");
    assert_eq!(chunks[0].index, 0);
}

#[test]
fn oversized_document_yields_at_least_two_chunks() {
    let text = "First paragraph with a decent amount of text in it.\n\nSecond paragraph, also with a decent amount of text.";
    let doc = plain(text);
    let chunks = chunk_document(&doc, &config(15, 0)).unwrap();
    assert!(chunks.len() >= 2);
}

#[test]
fn chunks_respect_the_size_bound() {
    let text = (0..200)
        .map(|i| format!("sentence number {i} goes here."))
        .collect::<Vec<_>>()
        .join(" ");
    let bound = 20;
    let chunks = chunk_document(&plain(text), &config(bound, 0)).unwrap();
    for chunk in &chunks {
        assert!(
            chunk.estimated_size <= bound,
            "chunk {} estimated at {} units, bound {}",
            chunk.index,
            chunk.estimated_size,
            bound
        );
    }
}

#[test]
fn zero_overlap_round_trips_exactly() {
    let text = "Alpha paragraph here.\n\nBeta paragraph follows it.\n\nGamma paragraph ends the document.";
    let chunks = chunk_document(&plain(text), &config(10, 0)).unwrap();
    assert!(chunks.len() >= 2);
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn markdown_round_trips_exactly() {
    let text = "# Notes\n\nIntro paragraph for the lecture.\n\n## Costs\n\nFixed and variable costs differ.\n\n## Revenue\n\nRevenue recognition has rules.";
    let chunks = chunk_document(&markdown(text), &config(12, 0)).unwrap();
    assert!(chunks.len() >= 2);
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn overlap_round_trips_after_stripping_prefixes() {
    let text = "One paragraph with words.\n\nTwo paragraph with words.\n\nThree paragraph with words.";
    let pre = chunk_document(&plain(text), &config(10, 0)).unwrap();
    let overlapped = chunk_document(&plain(text), &config(10, 3)).unwrap();
    assert_eq!(pre.len(), overlapped.len());
    assert_eq!(reconstruct(&overlapped, &pre), text);
}

#[test]
fn overlap_only_adds_to_chunks_after_the_first() {
    let text = "One paragraph with words.\n\nTwo paragraph with words.\n\nThree paragraph with words.";
    let pre = chunk_document(&plain(text), &config(10, 0)).unwrap();
    let overlapped = chunk_document(&plain(text), &config(10, 3)).unwrap();

    assert_eq!(overlapped[0].content, pre[0].content);
    for (c, p) in overlapped.iter().zip(&pre).skip(1) {
        assert!(c.content.len() >= p.content.len());
        assert!(c.content.ends_with(&p.content));
    }
}

#[test]
fn overlap_prefix_comes_from_pre_overlap_neighbor() {
    let text = "One paragraph with words.\n\nTwo paragraph with words.\n\nThree paragraph with words.";
    let pre = chunk_document(&plain(text), &config(10, 2)).unwrap();
    let zero = chunk_document(&plain(text), &config(10, 0)).unwrap();

    // 2 units × 4 chars/unit = 8 characters of trailing context.
    for i in 1..pre.len() {
        let prev = &zero[i - 1].content;
        let tail: String = prev.chars().skip(prev.chars().count().saturating_sub(8)).collect();
        assert!(
            pre[i].content.starts_with(&tail),
            "chunk {i} must start with the previous chunk's tail"
        );
    }
}

#[test]
fn chunking_is_deterministic() {
    let text = "# Head\n\nBody text with several words.\n\n- bullet one\n- bullet two\n\nClosing paragraph.";
    let cfg = config(8, 2);
    let first = chunk_document(&markdown(text), &cfg).unwrap();
    let second = chunk_document(&markdown(text), &cfg).unwrap();
    assert_eq!(first, second);
}

#[test]
fn chunk_indices_are_contiguous() {
    let text = (0..50).map(|i| format!("Paragraph {i}.")).collect::<Vec<_>>().join("\n\n");
    let chunks = chunk_document(&plain(text), &config(5, 0)).unwrap();
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
    }
}

// ── Special-pattern precedence end to end ───────────────────────────

#[test]
fn oversized_fence_is_chunked_before_prose_splits() {
    let code_lines = (0..40).map(|i| format!("let x{i} = {i};")).collect::<Vec<_>>().join("\n");
    let text = format!("```\n{code_lines}\n```\nShort prose trailer.");
    let chunks = chunk_document(&markdown(text.as_str()), &config(20, 0)).unwrap();

    assert!(chunks.len() >= 2);
    assert!(chunks[0].content.starts_with("```"));
    // The prose trailer stays out of the code chunks.
    let last = chunks.last().unwrap();
    assert!(last.content.contains("Short prose trailer."));
    for chunk in &chunks[..chunks.len() - 1] {
        assert!(!chunk.content.contains("prose trailer"));
    }
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

// ── Character-slicing fallback ──────────────────────────────────────

#[test]
fn separator_free_text_falls_back_to_char_slicing() {
    let text = "x".repeat(1000);
    let bound = 25; // 100 chars per slice
    let chunks = chunk_document(&plain(text.clone()), &config(bound, 0)).unwrap();
    assert_eq!(chunks.len(), 10);
    for chunk in &chunks {
        assert!(chunk.estimated_size <= bound);
    }
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn char_slicing_respects_utf8_boundaries() {
    let text = "é".repeat(500);
    let chunks = chunk_document(&plain(text.clone()), &config(25, 0)).unwrap();
    assert!(chunks.len() >= 2);
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn overlap_equal_to_bound_is_a_setup_error() {
    let doc = plain("anything");
    let err = chunk_document(&doc, &config(500, 500)).unwrap_err();
    assert!(matches!(
        err,
        ChunkError::OverlapTooLarge { overlap: 500, bound: 500 }
    ));
}

#[test]
fn zero_bound_is_a_setup_error() {
    let doc = plain("anything");
    let err = chunk_document(&doc, &config(0, 0)).unwrap_err();
    assert!(matches!(err, ChunkError::InvalidBound));
}

// ── Edge cases ──────────────────────────────────────────────────────

#[test]
fn empty_document_is_one_empty_chunk() {
    let chunks = chunk_document(&plain(""), &config(100, 10)).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "");
    assert_eq!(chunks[0].estimated_size, 0);
}

#[test]
fn estimated_size_is_measured_before_overlap() {
    let text = "One paragraph with words.\n\nTwo paragraph with words.\n\nThree paragraph with words.";
    let pre = chunk_document(&plain(text), &config(10, 0)).unwrap();
    let overlapped = chunk_document(&plain(text), &config(10, 4)).unwrap();
    for (c, p) in overlapped.iter().zip(&pre) {
        assert_eq!(c.estimated_size, p.estimated_size);
    }
}
