//! Map-reduce summarization over chunked documents.
//!
//! One generative call per chunk with positional framing (map), then a
//! single aggregation call over the per-chunk summaries (reduce), degrading
//! to plain concatenation when the reduce stage yields nothing usable.

mod orchestrator;
mod prompts;

pub use orchestrator::{ChunkSummary, Summarizer, SummarizerConfig, SummarizeError};
