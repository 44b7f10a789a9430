/*!
 * Annotation pipeline: document in, three rendered views out.
 *
 * Control flow per request: segment the document, chunk each paragraph under
 * the token budget, correct every chunk through the provider (independent
 * calls with bounded concurrency, results re-sorted into original chunk
 * order), align each original/corrected pair at word level, render the
 * per-chunk fragments, and rejoin them with the paragraph separators
 * reapplied verbatim.
 *
 * All intermediate state is request-scoped; concurrent annotate calls share
 * nothing mutable. A failed chunk correction fails the whole document - no
 * partial results are returned.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info};
use std::sync::Arc;

use crate::app_config::{Config, RenderMode};
use crate::correction::align::{align_words, word_spans};
use crate::correction::annotate::{
    render_fixed_only, render_offset_preserving, render_word_stream, SpanCounter,
};
use crate::correction::chunker::{chunk_paragraph, Chunk};
use crate::correction::segmenter::{split_document, Segment, SentenceSplitter};
use crate::correction::service::CorrectionService;
use crate::correction::tokenizer::Tokenizer;
use crate::errors::{ConfigError, CorrectionError};

/// The three rendered outputs for one corrected essay
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CorrectedEssay {
    /// Plain corrected text, paragraph separators preserved
    pub corrected_text: String,
    /// Side-by-side errors (red) and fixes (green) HTML
    pub errors_and_fixes_html: String,
    /// Corrected-text-only HTML, one styled block per paragraph
    pub fixed_only_html: String,
}

impl CorrectedEssay {
    fn empty() -> Self {
        Self {
            corrected_text: String::new(),
            errors_and_fixes_html: String::new(),
            fixed_only_html: String::new(),
        }
    }
}

/// One chunk queued for correction, tagged with the segment it came from
struct PendingChunk {
    /// Index into the segment list
    segment_index: usize,
    /// The chunk itself
    chunk: Chunk,
}

/// Pipeline entry point tying the chunker, corrector, aligner and renderer
/// together
pub struct AnnotationPipeline {
    /// Handle on the external correction capability
    service: CorrectionService,
    /// Token counter for chunk budgeting
    tokenizer: Arc<dyn Tokenizer>,
    /// Sentence boundary strategy
    splitter: SentenceSplitter,
    /// Maximum tokens per chunk
    token_budget: usize,
    /// Soft cap on generated output length per chunk
    max_output_tokens: usize,
    /// Span markup convention
    render_mode: RenderMode,
}

impl AnnotationPipeline {
    /// Build a pipeline from validated configuration and an injected service
    /// handle
    pub fn new(
        config: &Config,
        service: CorrectionService,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            service,
            tokenizer,
            splitter: SentenceSplitter::new(),
            token_budget: config.correction.common.token_budget,
            max_output_tokens: config.correction.common.max_output_tokens,
            render_mode: config.correction.common.render_mode,
        })
    }

    /// Correct and annotate a whole document.
    ///
    /// Returns the plain corrected text plus the two HTML views. Blank input
    /// short-circuits to empty outputs without any provider call.
    pub async fn annotate(&self, document: &str) -> Result<CorrectedEssay, CorrectionError> {
        if document.trim().is_empty() {
            return Ok(CorrectedEssay::empty());
        }

        let segments = split_document(document);

        // Chunk every paragraph up front so chunk indices are global and in
        // document order.
        let mut pending = Vec::new();
        for (segment_index, segment) in segments.iter().enumerate() {
            if let Segment::Paragraph { text, offset } = segment {
                for chunk in chunk_paragraph(
                    text,
                    *offset,
                    &self.splitter,
                    self.tokenizer.as_ref(),
                    self.token_budget,
                ) {
                    pending.push(PendingChunk {
                        segment_index,
                        chunk,
                    });
                }
            }
        }

        info!(
            "Annotating document: {} segments, {} chunks",
            segments.len(),
            pending.len()
        );

        let corrected = self.correct_chunks(&pending).await?;

        Ok(self.assemble(document, &segments, &pending, &corrected))
    }

    /// Correct all chunks with bounded concurrency, returning corrected text
    /// in original chunk order.
    ///
    /// Chunks share no mutable state, so their corrections run
    /// independently; completion order is irrelevant because results are
    /// re-sorted by chunk index before assembly.
    async fn correct_chunks(&self, pending: &[PendingChunk]) -> Result<Vec<String>, CorrectionError> {
        let concurrency = self.service.concurrent_requests();

        let mut results: Vec<(usize, Result<String, _>)> = stream::iter(pending.iter().enumerate())
            .map(|(chunk_index, item)| {
                let service = self.service.clone();
                let max_output_tokens = self.max_output_tokens;
                let text = item.chunk.text.clone();
                async move {
                    let result = service.correct(&text, max_output_tokens).await;
                    (chunk_index, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        results.sort_by_key(|(chunk_index, _)| *chunk_index);

        let mut corrected = Vec::with_capacity(results.len());
        for (chunk_index, result) in results {
            match result {
                Ok(text) => {
                    debug!("Chunk {} corrected ({} bytes)", chunk_index, text.len());
                    corrected.push(text);
                }
                Err(source) => {
                    return Err(CorrectionError::ChunkFailed {
                        chunk_index,
                        source,
                    });
                }
            }
        }

        Ok(corrected)
    }

    /// Assemble the three output views from per-chunk corrections
    fn assemble(
        &self,
        document: &str,
        segments: &[Segment],
        pending: &[PendingChunk],
        corrected: &[String],
    ) -> CorrectedEssay {
        let mut corrected_text = String::new();
        let mut errors_html = String::new();
        let mut counter = SpanCounter::new();

        for (segment_index, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Separator(sep) => {
                    corrected_text.push_str(sep);
                    errors_html.push_str(sep);
                }
                Segment::Paragraph { text, offset } => {
                    let chunk_ids: Vec<usize> = pending
                        .iter()
                        .enumerate()
                        .filter(|(_, item)| item.segment_index == segment_index)
                        .map(|(chunk_index, _)| chunk_index)
                        .collect();

                    // Whitespace-only paragraph content: nothing to correct,
                    // pass it through.
                    if chunk_ids.is_empty() {
                        corrected_text.push_str(text);
                        errors_html.push_str(text);
                        continue;
                    }

                    let corrected_paragraph = chunk_ids
                        .iter()
                        .map(|&chunk_index| corrected[chunk_index].as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    corrected_text.push_str(&corrected_paragraph);

                    match self.render_mode {
                        RenderMode::WordStream => {
                            let fragments: Vec<String> = chunk_ids
                                .iter()
                                .map(|&chunk_index| {
                                    let chunk = &pending[chunk_index].chunk;
                                    let original_words: Vec<&str> =
                                        chunk.text.split_whitespace().collect();
                                    let corrected_words: Vec<&str> =
                                        corrected[chunk_index].split_whitespace().collect();
                                    let ops = align_words(&original_words, &corrected_words);
                                    render_word_stream(&ops, &original_words, &corrected_words)
                                })
                                .collect();
                            errors_html.push_str(&fragments.join(" "));
                        }
                        RenderMode::OffsetPreserving => {
                            // Walk the paragraph with a cursor so the bytes
                            // between and around chunks survive untouched.
                            let mut cursor = 0;
                            for &chunk_index in &chunk_ids {
                                let chunk = &pending[chunk_index].chunk;
                                let local_start = chunk.offset - offset;
                                errors_html.push_str(&text[cursor..local_start]);

                                let original_words: Vec<&str> =
                                    chunk.text.split_whitespace().collect();
                                let corrected_words: Vec<&str> =
                                    corrected[chunk_index].split_whitespace().collect();
                                let ops = align_words(&original_words, &corrected_words);
                                let spans = word_spans(&chunk.text);
                                errors_html.push_str(&render_offset_preserving(
                                    &chunk.text,
                                    &ops,
                                    &spans,
                                    &corrected_words,
                                    &mut counter,
                                ));
                                cursor = local_start + chunk.text.len();
                            }
                            errors_html.push_str(&text[cursor..]);
                        }
                    }
                }
            }
        }

        debug!(
            "Assembled document of {} bytes with {} flagged spans",
            document.len(),
            counter.assigned()
        );

        CorrectedEssay {
            fixed_only_html: render_fixed_only(&corrected_text),
            errors_and_fixes_html: errors_html,
            corrected_text,
        }
    }
}
