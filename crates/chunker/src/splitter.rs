//! Recursive separator-hierarchy splitting.
//!
//! The splitter is lossless: separators stay attached to the segment they
//! terminate and nothing is trimmed, so the concatenation of the returned
//! pieces always equals the input text.

use crate::estimator::{SizeEstimator, CHARS_PER_UNIT};
use crate::patterns;

/// Split `text` into pieces whose estimated size fits `bound`.
///
/// Special patterns are carved out first; carved pieces that still exceed
/// the bound, or text where no pattern fires, go through the separator
/// hierarchy. Recursion always drops the separators already tried, and the
/// terminal empty-string separator always succeeds, so this terminates.
pub(crate) fn split(
    text: &str,
    separators: &[&str],
    bound: usize,
    estimator: SizeEstimator,
) -> Vec<String> {
    if estimator.estimate(text) <= bound {
        return vec![text.to_string()];
    }

    let carved = patterns::extract(text, patterns::default_patterns());
    if carved.len() >= 2 {
        let mut pieces = Vec::with_capacity(carved.len());
        for segment in carved {
            if estimator.estimate(segment) <= bound {
                pieces.push(segment.to_string());
            } else {
                pieces.extend(split_by_separators(segment, separators, bound, estimator));
            }
        }
        return pieces;
    }

    split_by_separators(text, separators, bound, estimator)
}

/// Walk the separator hierarchy. The first separator producing at least two
/// non-empty segments is accepted; oversized segments recurse with the
/// remaining, lower-priority separators only.
fn split_by_separators(
    text: &str,
    separators: &[&str],
    bound: usize,
    estimator: SizeEstimator,
) -> Vec<String> {
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() {
            return slice_chars(text, bound);
        }

        let segments = split_keep(text, sep);
        if segments.len() < 2 {
            continue;
        }

        let rest = &separators[i + 1..];
        let mut pieces = Vec::with_capacity(segments.len());
        for segment in segments {
            if estimator.estimate(&segment) <= bound {
                pieces.push(segment);
            } else {
                pieces.extend(split_by_separators(&segment, rest, bound, estimator));
            }
        }
        return pieces;
    }

    // Profile exhausted without the terminal "" entry: pathological
    // single-token input stays whole.
    vec![text.to_string()]
}

/// Split on literal `sep`, re-appending the separator to every segment
/// except the last. Only a trailing empty segment (text ending in `sep`)
/// can come out empty, and dropping it loses nothing.
fn split_keep(text: &str, sep: &str) -> Vec<String> {
    let parts: Vec<&str> = text.split(sep).collect();
    let last = parts.len() - 1;
    let mut segments = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let segment = if i < last {
            format!("{part}{sep}")
        } else {
            (*part).to_string()
        };
        if !segment.is_empty() {
            segments.push(segment);
        }
    }
    segments
}

/// Last-resort fixed-size slicing on character boundaries. Always succeeds.
fn slice_chars(text: &str, bound: usize) -> Vec<String> {
    let max_chars = (bound * CHARS_PER_UNIT).max(1);
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (pos, _) in text.char_indices() {
        if count == max_chars {
            pieces.push(text[start..pos].to_string());
            start = pos;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }
    pieces
}
