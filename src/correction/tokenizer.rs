/*!
 * Tokenizer abstraction used for chunk budget checks.
 *
 * The chunker only needs token counts that track the correction model's own
 * tokenizer closely enough for budgeting. The trait keeps the counting
 * strategy swappable so a real model tokenizer can be plugged in without
 * touching the chunker.
 */

/// Token counting interface for the chunk budget
pub trait Tokenizer: Send + Sync {
    /// Split text into tokens
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Number of tokens in the text
    fn count(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }
}

/// Approximation of a subword tokenizer.
///
/// Splits on whitespace, then separates runs of alphanumeric characters from
/// runs of punctuation, so "word." counts as two tokens the way most subword
/// vocabularies treat trailing punctuation. This overcounts rare long words
/// slightly less than a real subword tokenizer would, which errs on the side
/// of larger chunks; the budget default leaves headroom for that.
#[derive(Debug, Clone, Default)]
pub struct HeuristicTokenizer;

impl HeuristicTokenizer {
    /// Create a new heuristic tokenizer
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for HeuristicTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for word in text.split_whitespace() {
            let mut current = String::new();
            let mut current_is_alnum = None;

            for ch in word.chars() {
                let is_alnum = ch.is_alphanumeric();
                match current_is_alnum {
                    Some(prev) if prev == is_alnum => current.push(ch),
                    Some(_) => {
                        tokens.push(std::mem::take(&mut current));
                        current.push(ch);
                        current_is_alnum = Some(is_alnum);
                    }
                    None => {
                        current.push(ch);
                        current_is_alnum = Some(is_alnum);
                    }
                }
            }

            if !current.is_empty() {
                tokens.push(current);
            }
        }

        tokens
    }
}
