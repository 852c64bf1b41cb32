// WHY: Display wrapper that applies the Typography Law wherever text is rendered
// Raw bypasses are logged in debug builds so every escape hatch stays auditable

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use tracing::warn;

use crate::formatter::{self, FormatOptions};

/// Text that renders in canonical form unless explicitly marked raw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedText<'a> {
    text: Cow<'a, str>,
    raw: bool,
}

impl<'a> FormattedText<'a> {
    /// Text that will be formatted when displayed
    pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            raw: false,
        }
    }

    /// Text that will be displayed verbatim
    #[track_caller]
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        let text = text.into();
        if cfg!(debug_assertions) {
            let caller = Location::caller();
            warn!(
                file = caller.file(),
                line = caller.line(),
                text = %text,
                "Typography raw bypass"
            );
        }
        Self { text, raw: true }
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Text exactly as supplied
    pub fn source(&self) -> &str {
        &self.text
    }

    /// Rendered form as an owned string
    pub fn as_canonical(&self) -> String {
        formatter::format_with(&self.text, self.options())
    }

    fn options(&self) -> FormatOptions {
        FormatOptions { raw: self.raw }
    }
}

impl fmt::Display for FormattedText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw {
            f.write_str(&self.text)
        } else {
            f.write_str(&self.as_canonical())
        }
    }
}

impl<'a> From<&'a str> for FormattedText<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl From<String> for FormattedText<'static> {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_text() {
        let label = FormattedText::new("hero on the bu");
        assert_eq!(label.to_string(), "Hero On The BTN");
        assert_eq!(label.source(), "hero on the bu");
        assert!(!label.is_raw());
    }

    #[test]
    fn test_raw_displays_verbatim() {
        let label = FormattedText::raw("keep 25bb as typed");
        assert!(label.is_raw());
        assert_eq!(label.to_string(), "keep 25bb as typed");
        assert_eq!(label.as_canonical(), "keep 25bb as typed");
    }

    #[test]
    fn test_conversions() {
        let borrowed: FormattedText = "vpip".into();
        let owned: FormattedText<'static> = String::from("pfr").into();
        assert_eq!(format!("{borrowed} / {owned}"), "VPIP / PFR");
    }
}
