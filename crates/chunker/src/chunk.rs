//! Chunking facade: profile selection, splitting, overlap, chunk assembly.

use condense_core::document::Document;
use tracing::debug;

use crate::overlap::apply_overlap;
use crate::profile::SeparatorProfile;
use crate::splitter;
use crate::types::{Chunk, ChunkConfig, ChunkError};

/// Split `doc` into bounded, overlapping chunks in document order.
///
/// Returns a single chunk when the whole document already fits the bound.
/// Deterministic: the same document and config always produce the same
/// chunk sequence.
pub fn chunk_document(doc: &Document, config: &ChunkConfig) -> Result<Vec<Chunk>, ChunkError> {
    config.validate()?;
    let estimator = config.estimator;

    let whole = estimator.estimate(&doc.text);
    if whole <= config.max_chunk_units {
        return Ok(vec![Chunk {
            index: 0,
            content: doc.text.clone(),
            estimated_size: whole,
        }]);
    }

    let profile = SeparatorProfile::for_hint(doc.hint);
    let pieces = splitter::split(
        &doc.text,
        profile.separators(),
        config.max_chunk_units,
        estimator,
    );
    let sizes: Vec<usize> = pieces.iter().map(|p| estimator.estimate(p)).collect();
    let contents = apply_overlap(&pieces, config.overlap_units);

    debug!(chunks = contents.len(), hint = ?doc.hint, "chunked document");

    Ok(contents
        .into_iter()
        .zip(sizes)
        .enumerate()
        .map(|(index, (content, estimated_size))| Chunk {
            index,
            content,
            estimated_size,
        })
        .collect())
}
