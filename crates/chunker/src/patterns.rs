//! Special-pattern extraction.
//!
//! Structurally significant spans (fenced code, headings, list lines) are
//! carved out before separator splitting so they are never bisected mid-unit.

use std::sync::LazyLock;

use regex::Regex;

/// A structural span matcher. Higher priority wins when several patterns
/// match the same text.
pub struct SpecialPattern {
    pub regex: Regex,
    pub priority: u8,
}

static DEFAULT_PATTERNS: LazyLock<Vec<SpecialPattern>> = LazyLock::new(|| {
    vec![
        // Fenced code blocks beat everything; headings beat list lines.
        SpecialPattern {
            regex: Regex::new(r"(?s)```.*?```").expect("fence pattern"),
            priority: 40,
        },
        SpecialPattern {
            regex: Regex::new(r"(?m)^#{1,6}[ \t]+.+$").expect("heading pattern"),
            priority: 30,
        },
        SpecialPattern {
            regex: Regex::new(r"(?m)^[ \t]*[-*+][ \t]+.+$").expect("bullet pattern"),
            priority: 20,
        },
        SpecialPattern {
            regex: Regex::new(r"(?m)^[ \t]*\d+[.)][ \t]+.+$").expect("numbered pattern"),
            priority: 10,
        },
    ]
});

/// The built-in pattern set, strongest first once sorted by priority.
pub fn default_patterns() -> &'static [SpecialPattern] {
    &DEFAULT_PATTERNS
}

/// Carve `text` into pattern matches and the spans between them.
///
/// Patterns are tried in descending priority; the first one that matches
/// anywhere decides the segmentation, lower-priority patterns are never
/// consulted. Whitespace-only inter-match spans are glued onto the adjacent
/// piece instead of emitted on their own, so concatenating the result always
/// reproduces `text` exactly. An empty return means no pattern fired and the
/// caller should fall back to separator splitting.
pub fn extract<'a>(text: &'a str, patterns: &[SpecialPattern]) -> Vec<&'a str> {
    let mut ordered: Vec<&SpecialPattern> = patterns.iter().collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

    for pattern in ordered {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        let mut cursor = 0;
        for m in pattern.regex.find_iter(text) {
            if m.start() > cursor {
                push_span(text, &mut spans, cursor, m.start());
            }
            push_piece(&mut spans, m.start(), m.end());
            cursor = m.end();
        }
        if spans.is_empty() {
            continue;
        }
        if cursor < text.len() {
            push_span(text, &mut spans, cursor, text.len());
        }
        return spans.iter().map(|&(s, e)| &text[s..e]).collect();
    }

    Vec::new()
}

/// Emit a non-matching span. Blank spans are not emitted standalone: merged
/// into the previous piece, or (at the very start) left for `push_piece` to
/// absorb into the first match.
fn push_span(text: &str, spans: &mut Vec<(usize, usize)>, start: usize, end: usize) {
    if text[start..end].trim().is_empty() {
        if let Some(last) = spans.last_mut() {
            last.1 = end;
        }
        return;
    }
    push_piece(spans, start, end);
}

fn push_piece(spans: &mut Vec<(usize, usize)>, start: usize, end: usize) {
    // The first piece starts at 0 so a leading blank span is never lost.
    let start = if spans.is_empty() { 0 } else { start };
    spans.push((start, end));
}
