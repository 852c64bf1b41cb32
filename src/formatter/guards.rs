// WHY: Strings that are addresses or machine identifiers must come back byte-for-byte
// Guards are checked before any rewrite and their verdict is final

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::Serialize;
use std::fmt;

/// Reason a string was returned untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// Contains a scheme separator or a `www.` host
    Url,
    /// Contains an `name@domain.tld` address
    Email,
    /// Contains a canonical 8-4-4-4-12 UUID
    Uuid,
    /// Whole string is a long run of hex digits
    HexHash,
    /// Two or more underscores
    Underscores,
    /// Three or more hyphens
    Hyphens,
    /// Internal camelCase or PascalCase capitalization
    CamelCase,
    /// Two or more slashes
    Paths,
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Guard::Url => "url",
            Guard::Email => "email",
            Guard::Uuid => "uuid",
            Guard::HexHash => "hex hash",
            Guard::Underscores => "underscores",
            Guard::Hyphens => "hyphens",
            Guard::CamelCase => "camel case",
            Guard::Paths => "paths",
        };
        f.write_str(label)
    }
}

const URL_PATTERN: &str = r"(?i)://|\bwww\.";
const EMAIL_PATTERN: &str = r"(?i)[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}";
const UUID_PATTERN: &str =
    r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";
const HEX_HASH_PATTERN: &str = r"^[0-9a-fA-F]{16,}$";
const CAMEL_CASE_PATTERN: &str = r"\p{Ll}\p{Lu}\p{Ll}";

const MAX_UNDERSCORES: usize = 1;
const MAX_HYPHENS: usize = 2;
const MAX_SLASHES: usize = 1;

/// Compiled unsafe-content and identifier guards
#[derive(Debug)]
pub struct ContentGuards {
    url: Regex,
    email: Regex,
    uuid: Regex,
    hex_hash: Regex,
    camel_case: Regex,
}

impl ContentGuards {
    /// Compile the built-in guard patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            url: Regex::new(URL_PATTERN)?,
            email: Regex::new(EMAIL_PATTERN)?,
            uuid: Regex::new(UUID_PATTERN)?,
            hex_hash: Regex::new(HEX_HASH_PATTERN)?,
            camel_case: Regex::new(CAMEL_CASE_PATTERN)?,
        })
    }

    /// First guard that applies to `text`, unsafe content before identifiers
    pub fn check(&self, text: &str) -> Option<Guard> {
        self.unsafe_content(text).or_else(|| self.identifier(text))
    }

    /// URL and email detection
    pub fn unsafe_content(&self, text: &str) -> Option<Guard> {
        if self.url.is_match(text) {
            Some(Guard::Url)
        } else if self.email.is_match(text) {
            Some(Guard::Email)
        } else {
            None
        }
    }

    /// Heuristic detection of keys, slugs, hashes and generated ids
    pub fn identifier(&self, text: &str) -> Option<Guard> {
        if self.uuid.is_match(text) {
            return Some(Guard::Uuid);
        }
        if self.hex_hash.is_match(text) {
            return Some(Guard::HexHash);
        }
        if count(text, '_') > MAX_UNDERSCORES {
            return Some(Guard::Underscores);
        }
        if count(text, '-') > MAX_HYPHENS {
            return Some(Guard::Hyphens);
        }
        if self.camel_case.is_match(text) {
            return Some(Guard::CamelCase);
        }
        if count(text, '/') > MAX_SLASHES {
            return Some(Guard::Paths);
        }
        None
    }
}

fn count(text: &str, needle: char) -> usize {
    text.chars().filter(|&c| c == needle).count()
}
