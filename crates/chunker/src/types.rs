//! Chunk configuration and output types.

use thiserror::Error;

use crate::estimator::SizeEstimator;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum estimator units per chunk, measured before overlap is added.
    pub max_chunk_units: usize,
    /// Overlap units duplicated from the previous chunk. Must stay below
    /// `max_chunk_units`.
    pub overlap_units: usize,
    /// Active size-estimation heuristic.
    pub estimator: SizeEstimator,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_units: 1000,
            overlap_units: 100,
            estimator: SizeEstimator::Coarse,
        }
    }
}

impl ChunkConfig {
    /// Reject configurations that cannot produce valid chunks. Called once
    /// at setup, before any chunking is attempted.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.max_chunk_units == 0 {
            return Err(ChunkError::InvalidBound);
        }
        if self.overlap_units >= self.max_chunk_units {
            return Err(ChunkError::OverlapTooLarge {
                overlap: self.overlap_units,
                bound: self.max_chunk_units,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("chunk size bound must be positive")]
    InvalidBound,

    #[error("overlap of {overlap} units must be smaller than the chunk bound of {bound}")]
    OverlapTooLarge { overlap: usize, bound: usize },
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A bounded piece of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based position within the document; contiguous across the output.
    pub index: usize,
    /// Chunk text, including any overlap prefix carried from the previous
    /// chunk.
    pub content: String,
    /// Estimator units of the pre-overlap text. Always within the configured
    /// bound; the overlap prefix may push `content` itself above it.
    pub estimated_size: usize,
}
