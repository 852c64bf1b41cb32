// WHY: Non-destructive split into whitespace, punctuation and word-like tokens
// Concatenating the tokens in order always reproduces the input exactly

use anyhow::Result;
use regex_automata::meta::Regex;

const SEPARATOR_PATTERN: &str = r"\s+|[.,;:!?()\[\]{}]";

/// One slice of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Whitespace(&'a str),
    Punctuation(&'a str),
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Whitespace(s) | Token::Punctuation(s) | Token::Word(s) => s,
        }
    }
}

/// Splits text on whitespace runs and single punctuation characters
#[derive(Debug)]
pub struct Tokenizer {
    separators: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            separators: Regex::new(SEPARATOR_PATTERN)?,
        })
    }

    /// Tokenize `text`; word tokens are the gaps between separator matches
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for found in self.separators.find_iter(text) {
            if found.start() > last {
                tokens.push(Token::Word(&text[last..found.start()]));
            }
            let separator = &text[found.range()];
            if separator.starts_with(char::is_whitespace) {
                tokens.push(Token::Whitespace(separator));
            } else {
                tokens.push(Token::Punctuation(separator));
            }
            last = found.end();
        }

        if last < text.len() {
            tokens.push(Token::Word(&text[last..]));
        }
        tokens
    }
}
