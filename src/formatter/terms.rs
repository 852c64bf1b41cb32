// WHY: Canonical poker vocabulary shared by every formatting call
// Tables are keyed by ASCII-uppercase spelling so lookups are case-insensitive

use std::collections::HashMap;

/// Seat abbreviations, always rendered fully capitalized
pub const POSITIONS: &[&str] = &[
    "SB", "BB", "UTG", "UTG+1", "UTG+2", "LJ", "HJ", "CO", "BTN",
];

/// Alternate seat spellings and the abbreviation they render as
pub const POSITION_ALIASES: &[(&str, &str)] = &[("BU", "BTN")];

/// Statistical and strategic acronyms, always rendered fully capitalized
pub const METRICS: &[&str] = &[
    "EV", "ICM", "ROI", "VPIP", "PFR", "GTO", "SPR", "WTSD", "AF",
];

/// Betting rounds in simple capitalized form
pub const STREETS: &[&str] = &["Preflop", "Flop", "Turn", "River"];

/// Betting actions in simple capitalized form
pub const ACTIONS: &[&str] = &["Bet", "Raise", "Call", "Fold", "Check", "Jam"];

/// Card ranks valid in hand notation, lowest to highest
pub const RANKS: &str = "23456789TJQKA";

/// Which table (or rule) produced a token's canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Position,
    Metric,
    Street,
    Action,
    Hand,
}

/// Case-insensitive lookup over the canonical term tables
#[derive(Debug)]
pub struct TermTables {
    positions: HashMap<String, &'static str>,
    metrics: HashMap<String, &'static str>,
    streets: HashMap<String, &'static str>,
    actions: HashMap<String, &'static str>,
}

fn keyed(terms: &[&'static str]) -> HashMap<String, &'static str> {
    terms.iter().map(|term| (term.to_ascii_uppercase(), *term)).collect()
}

impl TermTables {
    /// Build lookup maps from the built-in tables
    pub fn new() -> Self {
        let mut positions = keyed(POSITIONS);
        for (alias, canonical) in POSITION_ALIASES {
            positions.insert(alias.to_ascii_uppercase(), *canonical);
        }

        Self {
            positions,
            metrics: keyed(METRICS),
            streets: keyed(STREETS),
            actions: keyed(ACTIONS),
        }
    }

    /// Canonical spelling for `word`, checking positions, metrics, streets, then actions
    pub fn lookup(&self, word: &str) -> Option<(TermKind, &'static str)> {
        let key = word.to_ascii_uppercase();
        let tables = [
            (TermKind::Position, &self.positions),
            (TermKind::Metric, &self.metrics),
            (TermKind::Street, &self.streets),
            (TermKind::Action, &self.actions),
        ];

        tables
            .into_iter()
            .find_map(|(kind, table)| table.get(&key).map(|canonical| (kind, *canonical)))
    }
}

impl Default for TermTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `word` as hand notation (`AKs`, `T9o`, `QQ`) if it is one
///
/// Two ranks from [`RANKS`] plus an optional `s`/`o` marker, any case.
/// Ranks come back uppercase and the marker lowercase.
pub fn hand_notation(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let high = rank(chars.next()?)?;
    let low = rank(chars.next()?)?;
    let marker = match chars.next() {
        None => None,
        Some(c) if matches!(c, 's' | 'S' | 'o' | 'O') => Some(c.to_ascii_lowercase()),
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }

    let mut hand = String::with_capacity(3);
    hand.push(high);
    hand.push(low);
    hand.extend(marker);
    Some(hand)
}

fn rank(c: char) -> Option<char> {
    let upper = c.to_ascii_uppercase();
    RANKS.contains(upper).then_some(upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    static SHARED_TABLES: OnceLock<TermTables> = OnceLock::new();

    fn get_tables() -> &'static TermTables {
        SHARED_TABLES.get_or_init(TermTables::new)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let tables = get_tables();
        for spelling in ["utg", "UTG", "Utg", "uTg"] {
            assert_eq!(tables.lookup(spelling), Some((TermKind::Position, "UTG")), "{spelling}");
        }
        assert_eq!(tables.lookup("vpip"), Some((TermKind::Metric, "VPIP")));
        assert_eq!(tables.lookup("RIVER"), Some((TermKind::Street, "River")));
        assert_eq!(tables.lookup("jAm"), Some((TermKind::Action, "Jam")));
        assert_eq!(tables.lookup("hello"), None);
    }

    #[test]
    fn test_button_alias() {
        let tables = get_tables();
        assert_eq!(tables.lookup("bu"), Some((TermKind::Position, "BTN")));
        assert_eq!(tables.lookup("btn"), Some((TermKind::Position, "BTN")));
    }

    #[test]
    fn test_under_the_gun_variants() {
        let tables = get_tables();
        assert_eq!(tables.lookup("utg+1"), Some((TermKind::Position, "UTG+1")));
        assert_eq!(tables.lookup("Utg+2"), Some((TermKind::Position, "UTG+2")));
        assert_eq!(tables.lookup("utg+3"), None);
    }

    #[test]
    fn test_every_canonical_form_maps_to_itself() {
        let tables = get_tables();
        for term in POSITIONS.iter().chain(METRICS).chain(STREETS).chain(ACTIONS) {
            let (_, canonical) = tables.lookup(term).expect("table term should resolve");
            assert_eq!(canonical, *term);
        }
    }

    #[test]
    fn test_hand_notation() {
        let cases = [
            ("akS", Some("AKs")),
            ("AQo", Some("AQo")),
            ("tt", Some("TT")),
            ("72O", Some("72o")),
            ("22", Some("22")),
            ("a1", None),
            ("AKx", None),
            ("AKso", None),
            ("K", None),
            ("", None),
        ];
        for (input, expected) in cases {
            assert_eq!(hand_notation(input).as_deref(), expected, "hand_notation({input:?})");
        }
    }
}
