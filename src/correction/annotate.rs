/*!
 * Rendering of aligned corrections into the three output views.
 *
 * Two span-markup conventions are supported:
 *
 * - *word-stream*: output is rebuilt from the word sequences with
 *   single-space joins. The markup is kept bit-compatible with the inline
 *   styles the dashboard already consumes (`title='Error'` red span,
 *   `title='Fix'` green span).
 * - *offset-preserving*: equal spans copy the original document bytes, so
 *   whitespace, tabs and casing survive outside flagged spans. Flagged spans
 *   carry `class="error-block"`, a `data-suggestion` attribute with the
 *   replacement text, and a sequential `id="suggestion-word-N"` for
 *   scroll-to-span navigation.
 */

use crate::correction::align::{AlignKind, AlignmentOp, WordSpan};
use crate::correction::segmenter::PARAGRAPH_SEPARATOR;

// Inline styles for the word-stream view. These must not drift: the
// dashboard matches on them.
const ERROR_SPAN_STYLE: &str = "background-color: #fee2e2; border-bottom: 2px solid #dc2626; \
                                padding: 2px 4px; border-radius: 3px;";
const FIX_SPAN_STYLE: &str = "background-color: #d1fae5; border-bottom: 2px solid #10b981; \
                              padding: 2px 4px; border-radius: 3px; font-weight: 500;";
const FIXED_PARAGRAPH_STYLE: &str = "margin-bottom: 0.75em; line-height: 1.8; background: #d1fae5; \
                                     padding: 10px; border-left: 4px solid #10b981; border-radius: 4px;";

/// Running counter handing out document-order span identifiers.
///
/// Identifiers are assigned while rendering, in document order, never by
/// post-hoc text substitution: matching spans by word text after the fact
/// attaches the wrong id as soon as a word value repeats.
#[derive(Debug, Default)]
pub struct SpanCounter {
    next: usize,
}

impl SpanCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    fn take(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of identifiers handed out so far
    pub fn assigned(&self) -> usize {
        self.next
    }
}

/// Render one chunk's errors-and-fixes view from the word sequences alone.
///
/// Equal spans pass through (single-space joined), replace spans emit the
/// original wrapped as an error followed by the corrected wrapped as a fix,
/// delete spans an error marker only, insert spans a fix marker only.
pub fn render_word_stream(
    ops: &[AlignmentOp],
    original_words: &[&str],
    corrected_words: &[&str],
) -> String {
    let mut html = String::new();

    for op in ops {
        match op.kind {
            AlignKind::Equal => {
                html.push_str(&original_words[op.original.clone()].join(" "));
                html.push(' ');
            }
            AlignKind::Replace => {
                let original_segment = original_words[op.original.clone()].join(" ");
                let corrected_segment = corrected_words[op.corrected.clone()].join(" ");
                html.push_str(&format!(
                    "<span style='{}' title='Error'>{}</span> \
                     <span style='{}' title='Fix'>→ {}</span> ",
                    ERROR_SPAN_STYLE, original_segment, FIX_SPAN_STYLE, corrected_segment
                ));
            }
            AlignKind::Delete => {
                let deleted_segment = original_words[op.original.clone()].join(" ");
                html.push_str(&format!(
                    "<span style='{}' title='Error'>{}</span> ",
                    ERROR_SPAN_STYLE, deleted_segment
                ));
            }
            AlignKind::Insert => {
                let added_segment = corrected_words[op.corrected.clone()].join(" ");
                html.push_str(&format!(
                    "<span style='{}' title='Fix'>+ {}</span> ",
                    FIX_SPAN_STYLE, added_segment
                ));
            }
        }
    }

    html.trim_end().to_string()
}

/// Render one chunk's errors-and-fixes view against the original character
/// offsets.
///
/// Equal spans and the gaps between words are copied byte-for-byte from the
/// chunk text; only flagged spans are wrapped in markup. Concatenating the
/// emitted pieces therefore reproduces every original character exactly once.
pub fn render_offset_preserving(
    chunk_text: &str,
    ops: &[AlignmentOp],
    original_spans: &[WordSpan],
    corrected_words: &[&str],
    counter: &mut SpanCounter,
) -> String {
    let mut html = String::new();
    let mut cursor = 0;

    for op in ops {
        match op.kind {
            AlignKind::Equal => {
                let end = original_spans[op.original.end - 1].end;
                html.push_str(&chunk_text[cursor..end]);
                cursor = end;
            }
            AlignKind::Replace | AlignKind::Delete => {
                let start = original_spans[op.original.start].start;
                let end = original_spans[op.original.end - 1].end;
                html.push_str(&chunk_text[cursor..start]);

                let suggestion = corrected_words[op.corrected.clone()].join(" ");
                html.push_str(&format!(
                    "<span class=\"error-block\" id=\"suggestion-word-{}\" \
                     data-suggestion=\"{}\" onclick=\"showSuggestion(this)\">{}</span>",
                    counter.take(),
                    escape_attribute(&suggestion),
                    &chunk_text[start..end]
                ));
                cursor = end;
            }
            AlignKind::Insert => {
                let added = corrected_words[op.corrected.clone()].join(" ");
                let leading = if cursor > 0 { " " } else { "" };
                html.push_str(&format!(
                    "{}<span class=\"suggestion\" id=\"suggestion-word-{}\">+ {}</span>",
                    leading,
                    counter.take(),
                    added
                ));
            }
        }
    }

    html.push_str(&chunk_text[cursor..]);
    html
}

/// Render the fixed-only view: corrected text re-paragraphed into styled
/// `<p>` blocks.
///
/// The paragraph split uses the same separator pattern as the document
/// segmenter, so the caller's paragraph structure carries through. Single
/// newlines inside a paragraph become spaces.
pub fn render_fixed_only(corrected_text: &str) -> String {
    if corrected_text.is_empty() {
        return String::new();
    }

    let normalized = corrected_text.replace("\r\n", "\n");

    PARAGRAPH_SEPARATOR
        .split(&normalized)
        .filter_map(|paragraph| {
            let flattened = flatten_newlines(paragraph);
            let trimmed = flattened.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(format!(
                    "<p style='{}'>{}</p>",
                    FIXED_PARAGRAPH_STYLE, trimmed
                ))
            }
        })
        .collect()
}

/// Replace single newlines with spaces inside a paragraph
fn flatten_newlines(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a string for use inside a double-quoted HTML attribute
fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
