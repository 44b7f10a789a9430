use once_cell::sync::Lazy;
use regex::Regex;

// @module: Document segmentation and sentence boundary detection

// @const: Paragraph separator regex - any maximal run of "newline, optional
// whitespace, newline". Everything else is content, even if it starts or ends
// with spaces or tabs. The same pattern is reapplied when reassembling output
// so paragraph structure set by the caller is preserved exactly.
pub static PARAGRAPH_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @const: Sentence terminator regex - a `.`, `!` or `?` followed by
// whitespace. This is a heuristic, not a sentence-boundary classifier: it
// mis-splits abbreviations, decimals and quoted punctuation.
static SENTENCE_TERMINATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// One piece of the top-level document split
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A content paragraph with its byte offset into the document
    Paragraph {
        /// Paragraph text, verbatim slice of the document
        text: String,
        /// Byte offset of the paragraph start within the document
        offset: usize,
    },
    /// A paragraph separator, preserved verbatim
    Separator(String),
}

/// Split a document into paragraphs and verbatim separator segments.
///
/// Concatenating the returned segments in order reproduces the input exactly.
pub fn split_document(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in PARAGRAPH_SEPARATOR.find_iter(text) {
        if m.start() > cursor {
            segments.push(Segment::Paragraph {
                text: text[cursor..m.start()].to_string(),
                offset: cursor,
            });
        }
        segments.push(Segment::Separator(m.as_str().to_string()));
        cursor = m.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Paragraph {
            text: text[cursor..].to_string(),
            offset: cursor,
        });
    }

    segments
}

/// Sentence boundary detection strategy.
///
/// The regex heuristic is isolated here so a future, more correct detector
/// can replace it without touching the aligner or annotator.
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    /// Create a new sentence splitter
    pub fn new() -> Self {
        Self
    }

    /// Split paragraph text into sentence byte ranges.
    ///
    /// Ranges are half-open, in order, non-overlapping, and trimmed of the
    /// inter-sentence whitespace (which sits in the gaps between ranges).
    /// Leading paragraph whitespace belongs to the first sentence; a final
    /// sentence without a trailing terminator runs to the end of the text.
    pub fn split(&self, text: &str) -> Vec<std::ops::Range<usize>> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in SENTENCE_TERMINATOR.find_iter(text) {
            // The terminator character is one byte; the rest of the match is
            // the whitespace run that separates sentences.
            let end = m.start() + 1;
            sentences.push(start..end);
            start = m.end();
        }

        if start < text.len() {
            // Drop a trailing whitespace-only remainder
            if !text[start..].trim().is_empty() {
                sentences.push(start..trimmed_end(text, start));
            }
        }

        sentences
    }
}

/// Byte index just past the last non-whitespace character at or after `start`
fn trimmed_end(text: &str, start: usize) -> usize {
    start + text[start..].trim_end().len()
}
