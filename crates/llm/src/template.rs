//! Prompt template resolution.
//!
//! Templates are looked up by name as `<dir>/<name>.md` when a prompts
//! directory is configured, falling back to compiled-in defaults. The
//! summarization core only ever goes through `load_template` and
//! `substitute`; it never touches the filesystem itself.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

/// Template for one chunk's map-stage prompt. Variables: `position`,
/// `content`.
pub const CHUNK_TEMPLATE: &str = "chunk-summary";

/// Template for the reduce-stage aggregation prompt. Variables: `content`.
pub const REDUCE_TEMPLATE: &str = "reduce-summary";

const DEFAULT_CHUNK_TEMPLATE: &str = "\
You are summarizing course material for later review.

Summarize {{position}}. Capture the key concepts, definitions, and takeaways \
as concise bullet points. Do not invent content that is not in the text.

{{content}}";

const DEFAULT_REDUCE_TEMPLATE: &str = "\
The following are partial summaries of consecutive sections of one document. \
Merge them into a single coherent summary, removing the repetition introduced \
by overlapping sections. Keep the structure of the original document.

{{content}}";

/// Resolve a template by name: a file under `prompts_dir` wins, the
/// compiled-in default otherwise. `None` only for names with neither.
pub fn load_template(name: &str, prompts_dir: Option<&str>) -> Option<String> {
    if let Some(dir) = prompts_dir {
        let path = Path::new(dir).join(format!("{name}.md"));
        if let Ok(content) = std::fs::read_to_string(&path) {
            debug!(template = name, path = %path.display(), "loaded prompt template override");
            return Some(content);
        }
    }
    builtin(name).map(str::to_string)
}

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        CHUNK_TEMPLATE => Some(DEFAULT_CHUNK_TEMPLATE),
        REDUCE_TEMPLATE => Some(DEFAULT_REDUCE_TEMPLATE),
        _ => None,
    }
}

/// Replace `{{key}}` placeholders with values from `vars`. Placeholders with
/// no matching key are left verbatim.
pub fn substitute(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}
