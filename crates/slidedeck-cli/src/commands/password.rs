use anyhow::Result;
use serde::Serialize;

use slidedeck_core::password::{check_password_with, PasswordAssessment};
use slidedeck_core::{AppConfig, Deck};

/// JSON shape of `slidedeck password --json`
#[derive(Serialize)]
struct PasswordReport<'a> {
    length: usize,
    #[serde(flatten)]
    assessment: &'a PasswordAssessment,
}

pub fn run(config: &AppConfig, text: &str, json: bool) -> Result<()> {
    // Labels come from the deck so they match what the presenter shows
    let deck = Deck::load_or_bundled(config.deck_path().as_deref())?;
    let assessment = check_password_with(text, &deck.strings.password);

    if json {
        let report = PasswordReport {
            length: text.chars().count(),
            assessment: &assessment,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_assessment(&assessment));
    }
    Ok(())
}

fn format_assessment(assessment: &PasswordAssessment) -> String {
    if assessment.band.is_none() {
        return "score: 0/100 (empty)".to_string();
    }
    format!(
        "score: {}/100\nstrength: {}\ncolor: {}",
        assessment.score,
        assessment.label,
        assessment.color.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidedeck_core::check_password;

    #[test]
    fn test_format_assessment() {
        assert_eq!(format_assessment(&check_password("")), "score: 0/100 (empty)");
        assert_eq!(
            format_assessment(&check_password("Abc12345!")),
            "score: 90/100\nstrength: Very strong 🚀\ncolor: #00bcd4"
        );
    }

    #[test]
    fn test_json_report() {
        let assessment = check_password("abcdef");
        let report = PasswordReport {
            length: 6,
            assessment: &assessment,
        };
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["length"], 6);
        assert_eq!(value["score"], 20);
        assert_eq!(value["color"], "#ff4d4d");
        assert_eq!(value["band"], "very-weak");
    }
}
