// WHY: Phrase-level rewrites that must run before tokenization
// Each rule sees the output of the one before it, so order is part of the behavior

use anyhow::Result;
use regex_automata::{meta::Regex, util::captures::Captures};
use std::borrow::Cow;
use tracing::debug;

/// What a rule emits in place of each match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// `<digits> BB` / `<digits> SB`
    StackUnit,
    /// `<N>-Bet` / `<N>-Betting`
    BetCount,
    /// Fixed canonical spelling
    Phrase(&'static str),
    /// `<number>%` with the gap removed
    PercentSpacing,
}

/// Built-in rules in application order
pub const NORMALIZATION_RULES: &[(&str, &str, Rewrite)] = &[
    ("stack_unit", r"(?i)\b(\d+) ?(bb|sb)\b", Rewrite::StackUnit),
    ("bet_count", r"(?i)\b([345])[ -]?bet(ting)?\b", Rewrite::BetCount),
    ("all_in", r"(?i)\ball[ -]?in\b", Rewrite::Phrase("All-In")),
    ("c_bet", r"(?i)\bc[ -]?bet\b", Rewrite::Phrase("C-Bet")),
    ("check_raise", r"(?i)\bcheck[ -]?raise\b", Rewrite::Phrase("Check-Raise")),
    ("donk_bet", r"(?i)\bdonk(?:[ -]?bet)?\b", Rewrite::Phrase("Donk-Bet")),
    ("iso_raise", r"(?i)\biso(?:[ -]?raise)?\b", Rewrite::Phrase("Iso-Raise")),
    ("percent_spacing", r"(\d+(?:\.\d+)?)\s+%", Rewrite::PercentSpacing),
];

/// One compiled rewrite
#[derive(Debug)]
pub struct NormalizationRule {
    pub(crate) name: &'static str,
    regex: Regex,
    rewrite: Rewrite,
}

impl NormalizationRule {
    pub(crate) fn new(name: &'static str, pattern: &str, rewrite: Rewrite) -> Result<Self> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            rewrite,
        })
    }

    /// Rewrite every match in `text`, borrowing when nothing matched
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        replace_all(&self.regex, text, |caps, out| match self.rewrite {
            Rewrite::StackUnit => {
                out.push_str(group(caps, text, 1));
                out.push(' ');
                out.push_str(&group(caps, text, 2).to_ascii_uppercase());
            }
            Rewrite::BetCount => {
                out.push_str(group(caps, text, 1));
                out.push_str("-Bet");
                if caps.get_group(2).is_some() {
                    out.push_str("ting");
                }
            }
            Rewrite::Phrase(canonical) => out.push_str(canonical),
            Rewrite::PercentSpacing => {
                out.push_str(group(caps, text, 1));
                out.push('%');
            }
        })
    }
}

/// Ordered rule set run between the guards and tokenization
#[derive(Debug)]
pub struct NormalizationRules {
    rules: Vec<NormalizationRule>,
}

impl NormalizationRules {
    /// Compile [`NORMALIZATION_RULES`]
    pub fn new() -> Result<Self> {
        let rules = NORMALIZATION_RULES
            .iter()
            .map(|&(name, pattern, rewrite)| NormalizationRule::new(name, pattern, rewrite))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Run every rule in order
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Owned(rewritten) => rewritten,
                Cow::Borrowed(_) => continue,
            };
            debug!(rule = rule.name, before = %current, after = %rewritten, "Normalization rule fired");
            current = rewritten;
        }
        current
    }

    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }
}

/// Substitute every match of `regex`, letting `emit` write the replacement
fn replace_all<'t, F>(regex: &Regex, text: &'t str, mut emit: F) -> Cow<'t, str>
where
    F: FnMut(&Captures, &mut String),
{
    let mut out: Option<String> = None;
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let Some(found) = caps.get_match() else {
            continue;
        };
        let buffer = out.get_or_insert_with(|| String::with_capacity(text.len() + 8));
        buffer.push_str(&text[last..found.start()]);
        emit(&caps, buffer);
        last = found.end();
    }

    match out {
        Some(mut buffer) => {
            buffer.push_str(&text[last..]);
            if buffer == text {
                Cow::Borrowed(text)
            } else {
                Cow::Owned(buffer)
            }
        }
        None => Cow::Borrowed(text),
    }
}

fn group<'t>(caps: &Captures, text: &'t str, index: usize) -> &'t str {
    caps.get_group(index)
        .map(|span| &text[span.range()])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> NormalizationRules {
        NormalizationRules::new().expect("rule patterns should compile")
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<_> = rules().rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["stack_unit", "bet_count", "all_in", "c_bet", "check_raise", "donk_bet", "iso_raise", "percent_spacing"]
        );
    }

    #[test]
    fn test_stack_units() {
        let rules = rules();
        assert_eq!(rules.apply("25bb"), "25 BB");
        assert_eq!(rules.apply("25 bb"), "25 BB");
        assert_eq!(rules.apply("100 Sb deep"), "100 SB deep");
        assert_eq!(rules.apply("25  bb"), "25  bb");
        assert_eq!(rules.apply("a25bb"), "a25bb");
        assert_eq!(rules.apply("25bbs"), "25bbs");
    }

    #[test]
    fn test_bet_counts() {
        let rules = rules();
        assert_eq!(rules.apply("3bet"), "3-Bet");
        assert_eq!(rules.apply("4 BET"), "4-Bet");
        assert_eq!(rules.apply("5-betting"), "5-Betting");
        assert_eq!(rules.apply("2bet"), "2bet");
        assert_eq!(rules.apply("13bet"), "13bet");
    }

    #[test]
    fn test_fixed_phrases() {
        let rules = rules();
        let cases = [
            ("all in", "All-In"),
            ("ALLIN", "All-In"),
            ("all-in", "All-In"),
            ("cbet", "C-Bet"),
            ("c bet", "C-Bet"),
            ("check raise", "Check-Raise"),
            ("checkraise", "Check-Raise"),
            ("donk", "Donk-Bet"),
            ("donk bet", "Donk-Bet"),
            ("iso", "Iso-Raise"),
            ("iso-raise", "Iso-Raise"),
            ("install ball in", "install ball in"),
        ];
        for (input, expected) in cases {
            assert_eq!(rules.apply(input), expected, "apply({input:?})");
        }
    }

    #[test]
    fn test_percent_spacing() {
        let rules = rules();
        assert_eq!(rules.apply("33.3 %"), "33.3%");
        assert_eq!(rules.apply("50\t%"), "50%");
        assert_eq!(rules.apply("50%"), "50%");
    }

    #[test]
    fn test_canonical_forms_are_fixed_points() {
        let rules = rules();
        for canonical in ["25 BB", "3-Bet", "4-Betting", "All-In", "C-Bet", "Check-Raise", "Donk-Bet", "Iso-Raise", "33.3%"] {
            assert_eq!(rules.apply(canonical), canonical);
            assert!(matches!(rules.rules()[0].apply(canonical), Cow::Borrowed(_)));
        }
    }
}
