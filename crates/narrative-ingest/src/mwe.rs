//! Multi-word expression merging.
//!
//! Registered expressions are matched greedily, longest first, left to
//! right. A matched run of tokens becomes one underscore-joined token.

use std::collections::HashSet;

use narrative_core::Sentence;

#[derive(Debug, Clone, Default)]
pub struct MweTokenizer {
    expressions: HashSet<String>,
    max_words: usize,
}

impl MweTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an underscore-joined expression. Single words are ignored.
    pub fn add_mwe(&mut self, phrase: &str) {
        let words = phrase.split('_').count();
        if words < 2 {
            return;
        }
        self.max_words = self.max_words.max(words);
        self.expressions.insert(phrase.to_string());
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Re-tokenize a sentence, merging every registered expression.
    pub fn tokenize(&self, sentence: &[String]) -> Sentence {
        if self.expressions.is_empty() {
            return sentence.to_vec();
        }

        let mut merged = Vec::with_capacity(sentence.len());
        let mut i = 0;
        while i < sentence.len() {
            let longest = (2..=self.max_words.min(sentence.len() - i))
                .rev()
                .find(|&len| self.expressions.contains(&sentence[i..i + len].join("_")));

            match longest {
                Some(len) => {
                    merged.push(sentence[i..i + len].join("_"));
                    i += len;
                }
                None => {
                    merged.push(sentence[i].clone());
                    i += 1;
                }
            }
        }
        merged
    }
}
