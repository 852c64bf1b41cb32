// WHY: Typography Law entry point: guards, phrase rules, tokenization, per-token casing
// Pure and total; compiled patterns are built once and shared read-only across threads

use anyhow::Result;
use std::sync::OnceLock;
use tracing::debug;

pub mod guards;
pub mod rules;
pub mod terms;
pub mod tokenizer;

pub use guards::{ContentGuards, Guard};
pub use rules::{NormalizationRules, Rewrite};
pub use terms::{hand_notation, TermKind, TermTables};
pub use tokenizer::{Token, Tokenizer};

/// Per-call formatting options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Return the input verbatim
    pub raw: bool,
}

impl FormatOptions {
    pub fn raw() -> Self {
        Self { raw: true }
    }
}

/// How the formatter treated an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Bypassed via [`FormatOptions::raw`]
    Raw,
    /// Left untouched because a guard fired
    Guarded(Guard),
    /// Went through the pipeline and came out identical
    Unchanged,
    /// Went through the pipeline and changed
    Rewritten,
}

/// Formatted text together with the reason it looks the way it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    pub output: String,
    pub disposition: Disposition,
}

impl FormatOutcome {
    pub fn changed(&self) -> bool {
        self.disposition == Disposition::Rewritten
    }
}

/// Canonical-capitalization formatter for poker UI strings
#[derive(Debug)]
pub struct TitleCaseFormatter {
    guards: ContentGuards,
    rules: NormalizationRules,
    tokenizer: Tokenizer,
    terms: TermTables,
}

impl TitleCaseFormatter {
    /// Compile the built-in guards, rules and tokenizer
    pub fn new() -> Result<Self> {
        debug!("Compiling typography patterns");
        Ok(Self {
            guards: ContentGuards::new()?,
            rules: NormalizationRules::new()?,
            tokenizer: Tokenizer::new()?,
            terms: TermTables::new(),
        })
    }

    /// Format with new allocation
    pub fn format(&self, input: &str, options: FormatOptions) -> String {
        let mut buffer = String::with_capacity(input.len());
        self.format_into(input, options, &mut buffer);
        buffer
    }

    /// Format into supplied buffer, replacing its contents
    pub fn format_into(&self, input: &str, options: FormatOptions, buffer: &mut String) {
        self.run(input, options, buffer);
    }

    /// Format and report which path through the pipeline was taken
    pub fn inspect(&self, input: &str, options: FormatOptions) -> FormatOutcome {
        let mut output = String::with_capacity(input.len());
        let disposition = self.run(input, options, &mut output);
        FormatOutcome { output, disposition }
    }

    /// Classify a single word-like token the way the pipeline would
    pub fn classify(&self, word: &str) -> Option<TermKind> {
        let cased = title_case(word);
        self.terms
            .lookup(&cased)
            .map(|(kind, _)| kind)
            .or_else(|| hand_notation(&cased).map(|_| TermKind::Hand))
    }

    fn run(&self, input: &str, options: FormatOptions, buffer: &mut String) -> Disposition {
        buffer.clear();

        if options.raw {
            buffer.push_str(input);
            return Disposition::Raw;
        }

        // WHY: guard verdicts are final; nothing below may touch guarded input
        if let Some(guard) = self.guards.check(input) {
            debug!(%guard, len = input.len(), "Guard left input untouched");
            buffer.push_str(input);
            return Disposition::Guarded(guard);
        }

        let normalized = self.rules.apply(input);
        buffer.reserve(normalized.len());
        for token in self.tokenizer.tokenize(&normalized) {
            match token {
                Token::Word(word) => self.push_word(word, buffer),
                other => buffer.push_str(other.as_str()),
            }
        }

        if buffer.as_str() == input {
            Disposition::Unchanged
        } else {
            Disposition::Rewritten
        }
    }

    /// Hyphenated words are cased one segment at a time
    fn push_word(&self, word: &str, buffer: &mut String) {
        for (i, segment) in word.split('-').enumerate() {
            if i > 0 {
                buffer.push('-');
            }
            self.push_segment(segment, buffer);
        }
    }

    fn push_segment(&self, segment: &str, buffer: &mut String) {
        if segment.is_empty() {
            return;
        }
        let cased = title_case(segment);
        if let Some((_, canonical)) = self.terms.lookup(&cased) {
            buffer.push_str(canonical);
        } else if let Some(hand) = hand_notation(&cased) {
            buffer.push_str(&hand);
        } else {
            buffer.push_str(&cased);
        }
    }
}

/// First character uppercased, the rest lowercased; words without letters pass through
///
/// A first character whose uppercase form is more than one character (`ß`) is kept
/// as written so the result is stable under repeated application.
pub fn title_case(word: &str) -> String {
    if !word.chars().any(char::is_alphabetic) {
        return word.to_string();
    }

    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        let mut upper = first.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => out.push(single),
            _ => out.push(first),
        }
    }
    for c in chars {
        out.extend(c.to_lowercase());
    }
    out
}

static SHARED_FORMATTER: OnceLock<TitleCaseFormatter> = OnceLock::new();

/// Process-wide formatter with the built-in rules
pub fn shared() -> &'static TitleCaseFormatter {
    SHARED_FORMATTER.get_or_init(|| {
        TitleCaseFormatter::new().expect("built-in typography patterns are valid")
    })
}

/// Format `input` with default options
pub fn format(input: &str) -> String {
    shared().format(input, FormatOptions::default())
}

/// Format `input` with explicit options
pub fn format_with(input: &str, options: FormatOptions) -> String {
    shared().format(input, options)
}

/// Format `input` into `buffer` (buffer reuse for batch callers)
pub fn format_into(input: &str, options: FormatOptions, buffer: &mut String) {
    shared().format_into(input, options, buffer);
}
