use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parsed and validated presentation
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub strings: DeckStrings,
    /// Quiz hints keyed by question id
    pub hints: BTreeMap<String, String>,
    pub slides: Vec<Slide>,
}

/// One full-viewport panel
#[derive(Debug, Clone)]
pub struct Slide {
    /// 0-based position, fixed for the session
    pub index: usize,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Slide {
    pub fn has_stats(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b.kind, BlockKind::Stat { .. }))
    }

    pub fn has_password(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b.kind, BlockKind::Password { .. }))
    }

    pub fn has_start(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b.kind, BlockKind::Start { .. }))
    }

    pub fn animate_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.animate).count()
    }
}

/// A content block inside a slide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub kind: BlockKind,
    /// Reveal this block when its slide scrolls into view
    #[serde(default)]
    pub animate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Heading {
        text: String,
    },
    Text {
        text: String,
    },
    Bullet {
        text: String,
    },
    /// Numeric widget; the target is encoded in the displayed text
    Stat {
        value: String,
        #[serde(default)]
        label: String,
    },
    Quiz {
        /// Ordinal identifier used for hint lookup
        id: String,
        prompt: String,
        options: Vec<QuizOptionSpec>,
    },
    /// Running "score / total" line
    QuizResult,
    Password {
        #[serde(default)]
        placeholder: String,
    },
    /// Control that jumps to the second slide
    Start {
        #[serde(default)]
        label: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOptionSpec {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

/// Localized display strings, treated as opaque text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckStrings {
    #[serde(default = "default_correct")]
    pub quiz_correct: String,
    #[serde(default = "default_incorrect")]
    pub quiz_incorrect: String,
    #[serde(default = "default_result_prefix")]
    pub quiz_result_prefix: String,
    #[serde(default = "default_start_label")]
    pub start_label: String,
    #[serde(default)]
    pub password: PasswordLabels,
}

impl Default for DeckStrings {
    fn default() -> Self {
        Self {
            quiz_correct: default_correct(),
            quiz_incorrect: default_incorrect(),
            quiz_result_prefix: default_result_prefix(),
            start_label: default_start_label(),
            password: PasswordLabels::default(),
        }
    }
}

/// Labels for the five password strength bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordLabels {
    #[serde(default = "default_very_weak")]
    pub very_weak: String,
    #[serde(default = "default_weak")]
    pub weak: String,
    #[serde(default = "default_medium")]
    pub medium: String,
    #[serde(default = "default_strong")]
    pub strong: String,
    #[serde(default = "default_very_strong")]
    pub very_strong: String,
}

impl Default for PasswordLabels {
    fn default() -> Self {
        Self {
            very_weak: default_very_weak(),
            weak: default_weak(),
            medium: default_medium(),
            strong: default_strong(),
            very_strong: default_very_strong(),
        }
    }
}

fn default_correct() -> String { "✅ Correct answer".to_string() }
fn default_incorrect() -> String {
    "❌ Wrong answer. Think before sharing, or opening an attachment you are unsure of".to_string()
}
fn default_result_prefix() -> String { "Current score: ".to_string() }
fn default_start_label() -> String { "Start ▸".to_string() }
fn default_very_weak() -> String { "Very weak 😱".to_string() }
fn default_weak() -> String { "Weak 😐".to_string() }
fn default_medium() -> String { "Medium 🤔".to_string() }
fn default_strong() -> String { "Strong 🔥".to_string() }
fn default_very_strong() -> String { "Very strong 🚀".to_string() }
