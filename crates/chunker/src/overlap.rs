//! Overlap composition between adjacent chunks.

use crate::estimator::CHARS_PER_UNIT;

/// Prepend trailing context from each piece onto its successor.
///
/// The overlap is always taken from the predecessor's pre-overlap text, so
/// context never compounds across chunks. Piece 0 is unchanged; the whole
/// pass is a no-op for zero overlap or a single piece.
pub(crate) fn apply_overlap(pieces: &[String], overlap_units: usize) -> Vec<String> {
    if overlap_units == 0 || pieces.len() < 2 {
        return pieces.to_vec();
    }

    let overlap_chars = overlap_units * CHARS_PER_UNIT;
    let mut out = Vec::with_capacity(pieces.len());
    for (i, piece) in pieces.iter().enumerate() {
        if i == 0 {
            out.push(piece.clone());
        } else {
            let tail = tail_chars(&pieces[i - 1], overlap_chars);
            out.push(format!("{tail}{piece}"));
        }
    }
    out
}

/// Last `n` characters of `text`, cut on a character boundary.
fn tail_chars(text: &str, n: usize) -> &str {
    let total = text.chars().count();
    if total <= n {
        return text;
    }
    match text.char_indices().nth(total - n) {
        Some((pos, _)) => &text[pos..],
        None => text,
    }
}
