//! Number extraction and suffix formatting for stat widgets
//!
//! The suffix is guessed from the original text ("94%", "$20B+", "300k").
//! The heuristic is deliberately narrow and kept here so each case can be
//! tested on its own.

/// How intermediate counter values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    /// `"{v}%"`
    Percent,
    /// `"${v}B+"`
    Currency,
    /// `"{v}k"`
    Thousands,
    /// `"{v}"`
    Plain,
}

impl StatFormat {
    /// Infer the format from the original text; first match wins
    pub fn infer(original: &str) -> Self {
        if original.contains('%') {
            StatFormat::Percent
        } else if original.contains('$') {
            StatFormat::Currency
        } else if original.contains('k') {
            StatFormat::Thousands
        } else {
            StatFormat::Plain
        }
    }

    pub fn render(self, value: u64) -> String {
        match self {
            StatFormat::Percent => format!("{}%", value),
            StatFormat::Currency => format!("${}B+", value),
            StatFormat::Thousands => format!("{}k", value),
            StatFormat::Plain => value.to_string(),
        }
    }
}

/// Numeric target encoded in a stat's text
///
/// Everything except digits and `.` is stripped, then the longest leading
/// decimal number is parsed. Returns `None` for text with nothing to count
/// (no number, or zero).
pub fn parse_target(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut digits = 0;
    for (i, c) in stripped.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            digits += 1;
        }
        end = i + 1;
    }
    if digits == 0 {
        return None;
    }

    let value: f64 = stripped[..end].trim_end_matches('.').parse().ok()?;
    (value != 0.0 && value.is_finite()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_percent() {
        assert_eq!(StatFormat::infer("94%"), StatFormat::Percent);
        assert_eq!(StatFormat::Percent.render(47), "47%");
    }

    #[test]
    fn test_infer_currency() {
        assert_eq!(StatFormat::infer("$20B+"), StatFormat::Currency);
        assert_eq!(StatFormat::Currency.render(13), "$13B+");
    }

    #[test]
    fn test_infer_thousands() {
        assert_eq!(StatFormat::infer("300k"), StatFormat::Thousands);
        assert_eq!(StatFormat::Thousands.render(150), "150k");
    }

    #[test]
    fn test_infer_plain() {
        assert_eq!(StatFormat::infer("1200"), StatFormat::Plain);
        assert_eq!(StatFormat::Plain.render(7), "7");
    }

    #[test]
    fn test_infer_precedence() {
        // Percent is checked before currency, currency before thousands
        assert_eq!(StatFormat::infer("$5% k"), StatFormat::Percent);
        assert_eq!(StatFormat::infer("$5k"), StatFormat::Currency);
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("94%"), Some(94.0));
        assert_eq!(parse_target("$20B+"), Some(20.0));
        assert_eq!(parse_target("300k"), Some(300.0));
        assert_eq!(parse_target("2.5k"), Some(2.5));
        assert_eq!(parse_target("1,200"), Some(1200.0));
        assert_eq!(parse_target(".5"), Some(0.5));
        assert_eq!(parse_target("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_parse_target_nothing_to_count() {
        assert_eq!(parse_target("N/A"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("."), None);
        assert_eq!(parse_target("0%"), None);
        assert_eq!(parse_target("0.0"), None);
    }
}
