//! Date-format tokens and their matching patterns
//!
//! The matching pattern is derived from the token rather than written by
//! hand, so the two cannot drift apart.

use regex::Regex;

use crate::error::{Error, Result};
use crate::rolling::CalendarInstant;

/// Date-format token and the pattern recognizing its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    token: &'static str,
    pattern: String,
}

impl FormatDescriptor {
    /// Build a descriptor from a chrono `strftime` token
    pub(crate) fn from_token(token: &'static str) -> Self {
        Self {
            token,
            pattern: pattern_for_token(token),
        }
    }

    /// The chrono `strftime` token, empty for unbounded rolling
    pub fn token(&self) -> &'static str {
        self.token
    }

    /// Regular expression matching exactly the strings the token produces
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Split into `(token, pattern)`
    pub fn into_parts(self) -> (String, String) {
        (self.token.to_string(), self.pattern)
    }

    /// Render the wall clock of `instant` with the token
    pub fn render<I: CalendarInstant>(&self, instant: &I) -> String {
        if self.token.is_empty() {
            return String::new();
        }
        instant.wall_clock().format(self.token).to_string()
    }

    /// Compile the pattern anchored to the whole input
    pub fn regex(&self) -> Result<Regex> {
        Regex::new(&format!("^{}$", self.pattern)).map_err(Error::from)
    }
}

/// Translate a `strftime` token into a regular expression.
///
/// Only the numeric fields used by rolling tokens are supported; any other
/// character is matched literally.
fn pattern_for_token(token: &str) -> String {
    let mut pattern = String::with_capacity(token.len() * 4);
    let mut chars = token.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            push_literal(&mut pattern, c);
            continue;
        }
        match chars.next() {
            Some('Y') => pattern.push_str(r"\d{4}"),
            Some('m' | 'd' | 'H' | 'M' | 'S') => pattern.push_str(r"\d{2}"),
            Some('%') => pattern.push('%'),
            Some(other) => {
                pattern.push('%');
                push_literal(&mut pattern, other);
            }
            None => pattern.push('%'),
        }
    }

    pattern
}

/// Characters with a meaning outside a character class
const META_CHARACTERS: &str = r"\.+*?()|[]{}^$#";

fn push_literal(pattern: &mut String, c: char) {
    if META_CHARACTERS.contains(c) {
        pattern.push('\\');
    }
    pattern.push(c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolling::Granularity;
    use chrono::NaiveDate;

    #[test]
    fn test_format_tables() {
        let expected = [
            (Granularity::Unbounded, "", ""),
            (Granularity::Year, "%Y", r"\d{4}"),
            (Granularity::Month, "%Y-%m", r"\d{4}-\d{2}"),
            (Granularity::Day, "%Y-%m-%d", r"\d{4}-\d{2}-\d{2}"),
            (Granularity::Hour, "%Y-%m-%d-%H", r"\d{4}-\d{2}-\d{2}-\d{2}"),
            (
                Granularity::Minute,
                "%Y-%m-%d-%H-%M",
                r"\d{4}-\d{2}-\d{2}-\d{2}-\d{2}",
            ),
        ];

        for (granularity, token, pattern) in expected {
            let format = granularity.format();
            assert_eq!(format.token(), token, "{}", granularity);
            assert_eq!(format.pattern(), pattern, "{}", granularity);
        }
    }

    #[test]
    fn test_pattern_escapes_literals() {
        assert_eq!(pattern_for_token("%Y.%m"), r"\d{4}\.\d{2}");
        assert_eq!(pattern_for_token("%Y_%m"), r"\d{4}_\d{2}");
        assert_eq!(pattern_for_token("100%%"), "100%");
        assert_eq!(pattern_for_token("%Y-%m~%d"), r"\d{4}-\d{2}~\d{2}");
        assert_eq!(pattern_for_token("(%H)"), r"\(\d{2}\)");
    }

    #[test]
    fn test_render_and_match() {
        let t = NaiveDate::from_ymd_opt(2021, 3, 5)
            .unwrap()
            .and_hms_opt(4, 7, 9)
            .unwrap();

        let format = Granularity::Minute.format();
        let rendered = format.render(&t);
        assert_eq!(rendered, "2021-03-05-04-07");

        let regex = format.regex().unwrap();
        assert!(regex.is_match(&rendered));
        assert!(!regex.is_match("2021-3-5-4-7"));
        assert!(!regex.is_match("2021-03-05-04"));
        assert!(!regex.is_match("2021-03-05-04-07-09"));
        assert!(!regex.is_match("x2021-03-05-04-07"));
    }

    #[test]
    fn test_unbounded_renders_nothing() {
        let t = NaiveDate::from_ymd_opt(2021, 3, 5)
            .unwrap()
            .and_hms_opt(4, 7, 9)
            .unwrap();
        let format = Granularity::Unbounded.format();
        assert_eq!(format.render(&t), "");
        assert!(format.regex().unwrap().is_match(""));
        assert_eq!(format.into_parts(), (String::new(), String::new()));
    }
}
