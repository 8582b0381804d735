//! Summarization input types and content-hint sniffing.

use serde::{Deserialize, Serialize};

/// How many leading characters `ContentHint::sniff` inspects.
const SNIFF_WINDOW: usize = 512;

/// Structural flavour of a document, used to pick a separator profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentHint {
    Plain,
    Markdown,
    Code,
}

impl ContentHint {
    /// Guess a hint from the first `SNIFF_WINDOW` characters of `text`.
    ///
    /// A shebang reads as code; a code fence or a couple of heading/list
    /// lines read as markdown; several `;`/`{`-terminated lines read as
    /// code; everything else is plain text.
    pub fn sniff(text: &str) -> Self {
        let window: String = text.chars().take(SNIFF_WINDOW).collect();

        if window.starts_with("#!") {
            return Self::Code;
        }
        if window.contains("```") {
            return Self::Markdown;
        }

        let mut markdown_lines = 0;
        let mut code_lines = 0;
        for line in window.lines() {
            let trimmed = line.trim();
            if heading_line(trimmed) || trimmed.starts_with("- ") || trimmed.starts_with("* ") {
                markdown_lines += 1;
            }
            if trimmed.ends_with(';') || trimmed.ends_with('{') || trimmed.ends_with('}') {
                code_lines += 1;
            }
        }

        if markdown_lines >= 2 {
            Self::Markdown
        } else if code_lines >= 3 {
            Self::Code
        } else {
            Self::Plain
        }
    }
}

fn heading_line(line: &str) -> bool {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(' ')
}

/// Immutable summarization input. Created once per request, never mutated.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub hint: ContentHint,
}

impl Document {
    pub fn new(text: impl Into<String>, hint: ContentHint) -> Self {
        Self {
            text: text.into(),
            hint,
        }
    }

    /// Build a document, sniffing the hint from its leading characters.
    pub fn sniffed(text: impl Into<String>) -> Self {
        let text = text.into();
        let hint = ContentHint::sniff(&text);
        Self { text, hint }
    }
}
