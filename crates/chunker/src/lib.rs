//! Hierarchical chunking engine.
//!
//! Splits documents into bounded, overlapping chunks suitable for per-chunk
//! LLM processing: structurally significant spans (code fences, headings,
//! list blocks) are carved out first, then a prioritized separator hierarchy,
//! then raw character slicing as a last resort.

mod chunk;
mod estimator;
mod overlap;
mod patterns;
mod profile;
mod splitter;
mod types;

pub use chunk::chunk_document;
pub use estimator::{SizeEstimator, CHARS_PER_UNIT};
pub use patterns::{default_patterns, extract, SpecialPattern};
pub use profile::SeparatorProfile;
pub use types::{Chunk, ChunkConfig, ChunkError};

#[cfg(test)]
mod tests;
