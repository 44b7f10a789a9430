use crate::correction::segmenter::SentenceSplitter;
use crate::correction::tokenizer::Tokenizer;

// @module: Greedy sentence packing under a token budget

/// A token-budget-bounded slice of a paragraph, sent to the correction model
/// in one call
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Chunk text, a contiguous verbatim slice of its paragraph
    pub text: String,
    /// Byte offset of the chunk start within the whole document
    pub offset: usize,
}

impl Chunk {
    /// Byte offset just past the end of the chunk within the whole document
    pub fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Split a paragraph into chunks whose token count stays within the budget.
///
/// Sentences are accumulated greedily: when adding the next sentence would
/// exceed the budget, the current chunk is closed and a new one starts with
/// that sentence. No backtracking or rebalancing. A single sentence that
/// alone exceeds the budget is emitted as its own over-budget chunk rather
/// than being truncated or split mid-sentence.
///
/// Each chunk is a contiguous byte slice of the paragraph, so original
/// inter-sentence whitespace inside a chunk is preserved.
pub fn chunk_paragraph(
    paragraph: &str,
    paragraph_offset: usize,
    splitter: &SentenceSplitter,
    tokenizer: &dyn Tokenizer,
    token_budget: usize,
) -> Vec<Chunk> {
    let sentences = splitter.split(paragraph);

    let mut chunks = Vec::new();
    let mut current: Option<std::ops::Range<usize>> = None;

    for sentence in sentences {
        match current.take() {
            None => current = Some(sentence),
            Some(range) => {
                let candidate = range.start..sentence.end;
                if tokenizer.count(&paragraph[candidate.clone()]) <= token_budget {
                    current = Some(candidate);
                } else {
                    chunks.push(range);
                    current = Some(sentence);
                }
            }
        }
    }

    if let Some(range) = current {
        chunks.push(range);
    }

    chunks
        .into_iter()
        .map(|range| Chunk {
            text: paragraph[range.clone()].to_string(),
            offset: paragraph_offset + range.start,
        })
        .collect()
}
