//! The two-stage summarization orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use condense_chunker::{chunk_document, Chunk, ChunkConfig, ChunkError};
use condense_core::document::Document;
use condense_llm::provider::{LlmError, LlmProvider, Message, Role};
use condense_llm::template;

use crate::prompts;

/// One chunk's map-stage output. Blank outputs are dropped before this is
/// ever built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSummary {
    pub source_index: usize,
    pub text: String,
}

/// Orchestrator tuning.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound on concurrent map-stage calls.
    pub max_concurrency: usize,
    /// Directory of prompt template overrides.
    pub prompts_dir: Option<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 1024,
            max_concurrency: 4,
            prompts_dir: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("invalid chunking configuration: {0}")]
    Chunk(#[from] ChunkError),
    #[error("chunker produced no chunks")]
    NoChunks,
    #[error("missing prompt template: {0}")]
    MissingTemplate(String),
    #[error("summarization cancelled")]
    Cancelled,
}

/// Drives the chunk → map → reduce pipeline for one document at a time.
///
/// Holds no mutable state; a single instance can serve many documents.
pub struct Summarizer {
    provider: Arc<dyn LlmProvider>,
    chunk_config: ChunkConfig,
    config: SummarizerConfig,
    chunk_template: String,
    reduce_template: String,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("chunk_config", &self.chunk_config)
            .field("config", &self.config)
            .field("chunk_template", &self.chunk_template)
            .field("reduce_template", &self.reduce_template)
            .finish_non_exhaustive()
    }
}

impl Summarizer {
    /// Build a summarizer, validating the chunk configuration and resolving
    /// prompt templates up front. Configuration errors surface here, before
    /// any chunking is attempted.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        chunk_config: ChunkConfig,
        config: SummarizerConfig,
    ) -> Result<Self, SummarizeError> {
        chunk_config.validate()?;
        let chunk_template =
            template::load_template(template::CHUNK_TEMPLATE, config.prompts_dir.as_deref())
                .ok_or_else(|| SummarizeError::MissingTemplate(template::CHUNK_TEMPLATE.into()))?;
        let reduce_template =
            template::load_template(template::REDUCE_TEMPLATE, config.prompts_dir.as_deref())
                .ok_or_else(|| SummarizeError::MissingTemplate(template::REDUCE_TEMPLATE.into()))?;
        Ok(Self {
            provider,
            chunk_config,
            config,
            chunk_template,
            reduce_template,
        })
    }

    /// Summarize `doc`.
    ///
    /// Returns `Ok(None)` when no chunk produced a usable summary (defined
    /// empty result, not an error) and `Err(Cancelled)` once `cancel` fires —
    /// completed chunk summaries are discarded, never partially returned.
    pub async fn summarize(
        &self,
        doc: &Document,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, SummarizeError> {
        let chunks = chunk_document(doc, &self.chunk_config)?;
        if chunks.is_empty() {
            return Err(SummarizeError::NoChunks);
        }
        info!(chunks = chunks.len(), hint = ?doc.hint, "starting map stage");

        let summaries = self.map_stage(&chunks, cancel).await?;

        if summaries.is_empty() {
            warn!("every chunk summary was blank or failed; no summary available");
            return Ok(None);
        }
        if summaries.len() == 1 {
            // A lone surviving summary goes out verbatim; the reduce prompt
            // would only restyle it.
            let only = summaries.into_iter().next();
            return Ok(only.map(|s| s.text));
        }

        info!(summaries = summaries.len(), "starting reduce stage");
        self.reduce_stage(&summaries, cancel).await.map(Some)
    }

    /// One provider call per chunk, at most `max_concurrency` in flight.
    /// `buffered` yields results in input order, so the collected summaries
    /// are already sorted by source index when the reduce stage runs.
    async fn map_stage(
        &self,
        chunks: &[Chunk],
        cancel: &CancellationToken,
    ) -> Result<Vec<ChunkSummary>, SummarizeError> {
        let total = chunks.len();
        let mut calls = stream::iter(
            chunks
                .iter()
                .map(|chunk| self.summarize_chunk(chunk, total, cancel)),
        )
        .buffered(self.config.max_concurrency.max(1));

        let mut summaries = Vec::new();
        while let Some(result) = calls.next().await {
            // Cancellation propagates here; dropping the stream aborts any
            // calls still in flight.
            if let Some(summary) = result? {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    async fn summarize_chunk(
        &self,
        chunk: &Chunk,
        total: usize,
        cancel: &CancellationToken,
    ) -> Result<Option<ChunkSummary>, SummarizeError> {
        if cancel.is_cancelled() {
            return Err(SummarizeError::Cancelled);
        }

        let vars = HashMap::from([
            (
                "position".to_string(),
                prompts::position_label(chunk.index, total).to_string(),
            ),
            ("content".to_string(), chunk.content.clone()),
        ]);
        let prompt = template::substitute(&self.chunk_template, &vars);

        let result = self
            .provider
            .complete(
                vec![Message {
                    role: Role::User,
                    content: prompt,
                }],
                self.config.temperature,
                self.config.max_tokens,
                cancel,
            )
            .await;

        match result {
            Ok(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    debug!(chunk = chunk.index, "blank chunk summary dropped");
                    Ok(None)
                } else {
                    Ok(Some(ChunkSummary {
                        source_index: chunk.index,
                        text,
                    }))
                }
            }
            Err(LlmError::Cancelled) => Err(SummarizeError::Cancelled),
            Err(e) => {
                warn!(chunk = chunk.index, error = %e, "chunk summary failed; dropping");
                Ok(None)
            }
        }
    }

    /// Aggregate the surviving chunk summaries with one provider call,
    /// degrading to their plain concatenation when the call fails or comes
    /// back blank.
    async fn reduce_stage(
        &self,
        summaries: &[ChunkSummary],
        cancel: &CancellationToken,
    ) -> Result<String, SummarizeError> {
        let vars = HashMap::from([("content".to_string(), prompts::marker_join(summaries))]);
        let prompt = template::substitute(&self.reduce_template, &vars);

        let result = self
            .provider
            .complete(
                vec![Message {
                    role: Role::User,
                    content: prompt,
                }],
                self.config.temperature,
                self.config.max_tokens,
                cancel,
            )
            .await;

        match result {
            Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Err(LlmError::Cancelled) => Err(SummarizeError::Cancelled),
            Ok(_) => {
                warn!("reduce stage returned blank; degrading to concatenation");
                Ok(prompts::plain_join(summaries))
            }
            Err(e) => {
                warn!(error = %e, "reduce stage failed; degrading to concatenation");
                Ok(prompts::plain_join(summaries))
            }
        }
    }
}
