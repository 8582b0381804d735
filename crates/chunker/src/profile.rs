//! Separator profiles: prioritized split delimiters, strongest first.

use condense_core::document::ContentHint;

/// Markdown leans on heading markers between the big and small paragraph
/// breaks. Heading separators are newline-prefixed so a mid-line `#` never
/// matches. The terminal `""` entry means character slicing.
const MARKDOWN: &[&str] = &[
    "\n\n\n", "\n# ", "\n## ", "\n### ", "\n#### ", "\n\n", "\n", ". ", " ", "",
];

/// Generic/code text: blank lines first, then line breaks, statement
/// delimiters, sentence breaks, words.
const GENERIC: &[&str] = &["\n\n\n", "\n\n", "\n", "; ", ". ", " ", ""];

/// An ordered separator hierarchy, selected once per document.
#[derive(Debug, Clone, Copy)]
pub struct SeparatorProfile {
    separators: &'static [&'static str],
}

impl SeparatorProfile {
    pub fn for_hint(hint: ContentHint) -> Self {
        let separators = match hint {
            ContentHint::Markdown => MARKDOWN,
            ContentHint::Plain | ContentHint::Code => GENERIC,
        };
        Self { separators }
    }

    /// Separators strongest to weakest; the last entry is always `""`.
    pub fn separators(&self) -> &'static [&'static str] {
        self.separators
    }
}
