use std::ops::Range;

// @module: Word-level alignment between original and corrected text

/// Classification of one aligned span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignKind {
    /// Same words on both sides
    Equal,
    /// Original words replaced by different corrected words
    Replace,
    /// Original words removed in the correction
    Delete,
    /// Corrected words with no original counterpart
    Insert,
}

/// One classified span from the word-level diff.
///
/// `original` and `corrected` are half-open word-index ranges. A delete op
/// has an empty corrected range positioned at the insertion point, and an
/// insert op an empty original range, so the original-side ranges always
/// partition the original word sequence and likewise on the corrected side.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentOp {
    /// Span classification
    pub kind: AlignKind,
    /// Covered original-side word indices
    pub original: Range<usize>,
    /// Covered corrected-side word indices
    pub corrected: Range<usize>,
}

/// Byte span of one whitespace-delimited word in its source text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset just past the last character
    pub end: usize,
}

/// Byte spans of all whitespace-delimited words, in order.
///
/// The spans let offset-preserving rendering map word ranges back onto the
/// exact character ranges of the original text.
pub fn word_spans(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push(WordSpan { start: s, end: i });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        spans.push(WordSpan {
            start: s,
            end: text.len(),
        });
    }

    spans
}

/// Compute the word-level alignment between original and corrected word
/// sequences.
///
/// The alignment is the minimal-edit LCS opcode sequence, computed with a
/// deterministic dynamic program: identical inputs always produce the same
/// ops. Adjacent delete and insert runs merge into a single replace op, so
/// the result reads like a standard text diff.
pub fn align_words(original: &[&str], corrected: &[&str]) -> Vec<AlignmentOp> {
    let n = original.len();
    let m = corrected.len();

    // Empty on both sides is the no-op case, not an error
    if n == 0 && m == 0 {
        return Vec::new();
    }
    if n == 0 {
        return vec![AlignmentOp {
            kind: AlignKind::Insert,
            original: 0..0,
            corrected: 0..m,
        }];
    }
    if m == 0 {
        return vec![AlignmentOp {
            kind: AlignKind::Delete,
            original: 0..n,
            corrected: 0..0,
        }];
    }

    // dp[i][j] = LCS length of original[i..] and corrected[j..]
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if original[i] == corrected[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    // Walk the table front to back, emitting maximal runs. Ties prefer the
    // delete branch so replaced regions come out original-side first.
    let mut ops: Vec<AlignmentOp> = Vec::new();
    let (mut i, mut j) = (0, 0);

    let mut push_run = |kind: AlignKind, original: Range<usize>, corrected: Range<usize>| {
        if let Some(last) = ops.last_mut() {
            // Merge a delete/insert pair at the same position into a replace
            let contiguous = last.original.end == original.start && last.corrected.end == corrected.start;
            if contiguous && last.kind != AlignKind::Equal && kind != AlignKind::Equal {
                last.kind = AlignKind::Replace;
                last.original.end = original.end;
                last.corrected.end = corrected.end;
                return;
            }
            if contiguous && last.kind == kind {
                last.original.end = original.end;
                last.corrected.end = corrected.end;
                return;
            }
        }
        ops.push(AlignmentOp {
            kind,
            original,
            corrected,
        });
    };

    while i < n || j < m {
        if i < n && j < m && original[i] == corrected[j] {
            push_run(AlignKind::Equal, i..i + 1, j..j + 1);
            i += 1;
            j += 1;
        } else if j == m || (i < n && dp[i + 1][j] >= dp[i][j + 1]) {
            push_run(AlignKind::Delete, i..i + 1, j..j);
            i += 1;
        } else {
            push_run(AlignKind::Insert, i..i, j..j + 1);
            j += 1;
        }
    }

    ops
}
