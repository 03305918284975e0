//! # Word tokenizer
//!
//! Splits input text into word tokens for spell checking.
//! Preserves byte offsets so corrections can be applied in place.

/// A token extracted from the input with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The normalized (lowercased) token text
    pub text: String,
    /// Start byte offset in the original string
    pub start: usize,
    /// End byte offset in the original string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

impl Token {
    /// Returns `true` if the token contains at least one alphabetic
    /// character, i.e. it is a word rather than a number.
    pub fn is_word(&self) -> bool {
        self.text.chars().any(|c| c.is_alphabetic())
    }
}

/// Tokenizer for English prose.
///
/// A word is a run of alphanumeric characters; apostrophes are kept when
/// they sit between word characters (`they're`, `it's`) and stripped when
/// they wrap a quoted word (`'hello'`).
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize text into a sequence of word tokens.
    ///
    /// # Examples
    /// ```
    /// use kousei_core::checker::tokenizer::WordTokenizer;
    ///
    /// let tokenizer = WordTokenizer::new();
    /// let tokens = tokenizer.tokenize("They're going to the store.");
    /// assert_eq!(tokens[0].text, "they're");
    /// assert_eq!(tokens.len(), 5);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start: Option<usize> = None;

        for (idx, c) in input.char_indices() {
            if c.is_alphanumeric() || c == '\'' {
                if current_start.is_none() {
                    current_start = Some(idx);
                }
            } else if let Some(start) = current_start.take() {
                self.push_token(input, start, idx, &mut tokens);
            }
        }

        if let Some(start) = current_start {
            self.push_token(input, start, input.len(), &mut tokens);
        }

        tokens
    }

    fn push_token(&self, input: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
        // Strip wrapping apostrophes, keeping interior ones.
        let raw = &input[start..end];
        let trimmed_front = raw.len() - raw.trim_start_matches('\'').len();
        let trimmed_back = raw.len() - raw.trim_end_matches('\'').len();
        let start = start + trimmed_front;
        let end = end - trimmed_back;
        if start >= end {
            return;
        }

        let text = input[start..end].to_lowercase();
        let index = tokens.len();
        tokens.push(Token {
            text,
            start,
            end,
            index,
        });
    }
}

/// Count sentences in text.
///
/// A sentence ends at a run of `.`, `!` or `?` with non-empty content
/// before it; trailing content without a terminator counts as one more.
pub fn count_sentences(input: &str) -> usize {
    let mut sentences = 0;
    let mut has_content = false;
    let mut in_terminator = false;

    for c in input.chars() {
        match c {
            '.' | '!' | '?' => {
                if has_content && !in_terminator {
                    sentences += 1;
                    has_content = false;
                }
                in_terminator = true;
            }
            _ => {
                in_terminator = false;
                if !c.is_whitespace() {
                    has_content = true;
                }
            }
        }
    }

    if has_content {
        sentences += 1;
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("She went to the sea.");

        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].text, "she");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 3);
        assert_eq!(tokens[4].text, "sea");
    }

    #[test]
    fn test_tokenize_keeps_contractions() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("It's too hot, isn't it?");

        assert_eq!(tokens[0].text, "it's");
        assert!(tokens.iter().any(|t| t.text == "isn't"));
    }

    #[test]
    fn test_tokenize_strips_quoting_apostrophes() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("she said 'hello' quietly");

        let hello = tokens.iter().find(|t| t.text == "hello").unwrap();
        assert_eq!(&"she said 'hello' quietly"[hello.start..hello.end], "hello");
    }

    #[test]
    fn test_tokenize_offsets_match_input() {
        let input = "Their going to the store.";
        let tokenizer = WordTokenizer::new();
        for token in tokenizer.tokenize(input) {
            assert_eq!(input[token.start..token.end].to_lowercase(), token.text);
        }
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = WordTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  ... !!! ").is_empty());
    }

    #[test]
    fn test_numbers_are_not_words() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("route 66 is long");
        let sixty_six = tokens.iter().find(|t| t.text == "66").unwrap();
        assert!(!sixty_six.is_word());
        assert!(tokens[0].is_word());
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("Ellipsis... still one sentence."), 2);
        assert_eq!(count_sentences("no terminator"), 1);
        assert_eq!(count_sentences(""), 0);
        assert_eq!(count_sentences("..."), 0);
    }
}
