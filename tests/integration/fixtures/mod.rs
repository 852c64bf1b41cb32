// Catalog fixtures with known inputs and canonical outputs
// WHY: Golden-file testing requires deterministic input/output pairs for validation

/// Line catalog from a training screen, as a copywriter might type it
pub const TRAINING_LABELS: &str = "stack size: 25 bb
3bet pot
all in now
cbet frequency 33.3 %
akS
bu vs co
go to https://pokeriq.app
user_id 8bb621b6-16b5-4bd9-bb73-7c78a8d347ad

hero opens utg+1 with t9s
villain donks the turn
iso raise vs limpers from the hj
";

/// TRAINING_LABELS after formatting
pub const TRAINING_EXPECTED: &str = "Stack Size: 25 BB
3-Bet Pot
All-In Now
C-Bet Frequency 33.3%
AKs
BTN Vs CO
go to https://pokeriq.app
user_id 8bb621b6-16b5-4bd9-bb73-7c78a8d347ad

Hero Opens UTG+1 With T9s
Villain Donks The Turn
Iso-Raise Vs Limpers From The HJ
";

/// Number of lines in TRAINING_LABELS that change
pub const TRAINING_VIOLATIONS: usize = 9;

/// JSON catalog with nested strings and non-string values
pub const LOCALE_JSON: &str = r#"{
  "drills": {
    "title": "check raise defense",
    "subtitle": "vpip and pfr by position",
    "steps": ["fold", "call", "4bet"]
  },
  "support_email": "help@pokeriq.app",
  "max_stack_bb": 100,
  "min_open_bb": 2.50,
  "hand_id": 98765432109876543210,
  "enabled": true
}
"#;

/// LOCALE_JSON after a rewrite; only the changed string literals differ
pub const LOCALE_JSON_EXPECTED: &str = r#"{
  "drills": {
    "title": "Check-Raise Defense",
    "subtitle": "VPIP And PFR By Position",
    "steps": ["Fold", "Call", "4-Bet"]
  },
  "support_email": "help@pokeriq.app",
  "max_stack_bb": 100,
  "min_open_bb": 2.50,
  "hand_id": 98765432109876543210,
  "enabled": true
}
"#;

/// Already-canonical line catalog
pub const CANONICAL_LABELS: &str = "River Jam
SB Vs BB
EV Of A C-Bet
AQo Vs KK
";
