//! Password strength meter
//!
//! Scoring is a pure function of the input text: additive rules, clamped to
//! 100, then mapped onto five bands.

use serde::{Serialize, Serializer};

use crate::deck::PasswordLabels;

/// Meter color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Transparent,
    /// `#rrggbb`
    Hex(&'static str),
}

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::Transparent => "transparent",
            ColorToken::Hex(hex) => *hex,
        }
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthBand {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthBand {
    /// Band for a clamped score; later thresholds override earlier ones
    pub fn from_score(score: u8) -> Self {
        let mut band = StrengthBand::VeryWeak;
        if score > 30 {
            band = StrengthBand::Weak;
        }
        if score > 50 {
            band = StrengthBand::Medium;
        }
        if score > 75 {
            band = StrengthBand::Strong;
        }
        if score >= 90 {
            band = StrengthBand::VeryStrong;
        }
        band
    }

    pub fn color(self) -> ColorToken {
        match self {
            StrengthBand::VeryWeak => ColorToken::Hex("#ff4d4d"),
            StrengthBand::Weak => ColorToken::Hex("#ffad33"),
            StrengthBand::Medium => ColorToken::Hex("#ffeb3b"),
            StrengthBand::Strong => ColorToken::Hex("#00ffa3"),
            StrengthBand::VeryStrong => ColorToken::Hex("#00bcd4"),
        }
    }

    pub fn label(self, labels: &PasswordLabels) -> &str {
        match self {
            StrengthBand::VeryWeak => &labels.very_weak,
            StrengthBand::Weak => &labels.weak,
            StrengthBand::Medium => &labels.medium,
            StrengthBand::Strong => &labels.strong,
            StrengthBand::VeryStrong => &labels.very_strong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordAssessment {
    /// 0..=100, doubles as the meter fill percentage
    pub score: u8,
    pub color: ColorToken,
    pub label: String,
    /// `None` for empty input
    pub band: Option<StrengthBand>,
}

impl PasswordAssessment {
    pub fn empty() -> Self {
        Self {
            score: 0,
            color: ColorToken::Transparent,
            label: String::new(),
            band: None,
        }
    }
}

impl Default for PasswordAssessment {
    fn default() -> Self {
        Self::empty()
    }
}

/// Score `text` with the default labels
pub fn check_password(text: &str) -> PasswordAssessment {
    check_password_with(text, &PasswordLabels::default())
}

/// Score `text`, labelling the band with `labels`
pub fn check_password_with(text: &str, labels: &PasswordLabels) -> PasswordAssessment {
    if text.is_empty() {
        return PasswordAssessment::empty();
    }

    let len = text.chars().count();
    let mut score: u32 = 0;

    if len > 5 {
        score += 20;
    }
    if len > 8 {
        score += 20;
    }
    if len > 12 {
        score += 10;
    }

    if text.chars().any(|c| c.is_ascii_uppercase()) {
        score += 15;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        score += 15;
    }
    if text.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 20;
    }

    let score = score.min(100) as u8;
    let band = StrengthBand::from_score(score);

    PasswordAssessment {
        score,
        color: band.color(),
        label: band.label(labels).to_string(),
        band: Some(band),
    }
}

/// Bound password field: current text plus its latest assessment
#[derive(Debug, Clone, Default)]
pub struct PasswordField {
    value: String,
    assessment: PasswordAssessment,
    labels: PasswordLabels,
}

impl PasswordField {
    pub fn new(labels: PasswordLabels) -> Self {
        Self {
            value: String::new(),
            assessment: PasswordAssessment::empty(),
            labels,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn assessment(&self) -> &PasswordAssessment {
        &self.assessment
    }

    /// Replace the whole value and re-score
    pub fn set_value(&mut self, value: impl Into<String>) -> &PasswordAssessment {
        self.value = value.into();
        self.assessment = check_password_with(&self.value, &self.labels);
        &self.assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let result = check_password("");
        assert_eq!(result.score, 0);
        assert_eq!(result.color, ColorToken::Transparent);
        assert_eq!(result.label, "");
        assert_eq!(result.band, None);
    }

    #[test]
    fn test_lowercase_six_chars() {
        let result = check_password("abcdef");
        assert_eq!(result.score, 20);
        assert_eq!(result.band, Some(StrengthBand::VeryWeak));
        assert_eq!(result.color.as_str(), "#ff4d4d");
    }

    #[test]
    fn test_mixed_nine_chars() {
        // 20 + 20 + 15 + 15 + 20
        let result = check_password("Abc12345!");
        assert_eq!(result.score, 90);
        assert_eq!(result.band, Some(StrengthBand::VeryStrong));
        assert_eq!(result.label, "Very strong 🚀");
        assert_eq!(result.color.as_str(), "#00bcd4");
    }

    #[test]
    fn test_score_clamped_to_100() {
        let result = check_password("Abcdefgh1234!?");
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_short_input_scores_only_classes() {
        assert_eq!(check_password("a").score, 0);
        assert_eq!(check_password("A").score, 15);
        assert_eq!(check_password("A1!").score, 50);
    }

    #[test]
    fn test_non_ascii_counts_as_symbol_and_length_in_chars() {
        let result = check_password("пароль");
        assert_eq!(result.score, 40);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(StrengthBand::from_score(30), StrengthBand::VeryWeak);
        assert_eq!(StrengthBand::from_score(31), StrengthBand::Weak);
        assert_eq!(StrengthBand::from_score(50), StrengthBand::Weak);
        assert_eq!(StrengthBand::from_score(51), StrengthBand::Medium);
        assert_eq!(StrengthBand::from_score(75), StrengthBand::Medium);
        assert_eq!(StrengthBand::from_score(76), StrengthBand::Strong);
        assert_eq!(StrengthBand::from_score(89), StrengthBand::Strong);
        assert_eq!(StrengthBand::from_score(90), StrengthBand::VeryStrong);
    }

    #[test]
    fn test_custom_labels() {
        let labels = PasswordLabels {
            weak: "meh".to_string(),
            ..Default::default()
        };
        // 20 + 15 = 35
        assert_eq!(check_password_with("Abcdef", &labels).label, "meh");
    }

    #[test]
    fn test_field_edits_rescore() {
        let mut field = PasswordField::new(PasswordLabels::default());
        assert_eq!(field.set_value("Abc12345").score, 50);
        assert_eq!(field.set_value("Abc12345!").score, 90);
        field.set_value("Abc12345");
        assert_eq!(field.value(), "Abc12345");
        assert_eq!(field.assessment().score, 50);
        field.set_value("");
        assert_eq!(*field.assessment(), PasswordAssessment::empty());
    }
}
