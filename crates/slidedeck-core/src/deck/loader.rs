use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::models::{Block, BlockKind, Deck, DeckStrings, Slide};
use crate::{Error, Result};

/// Deck compiled into the binary
const BUNDLED_DECK: &str = include_str!("../../decks/phishing.toml");

/// On-disk deck layout
#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    strings: DeckStrings,
    #[serde(default)]
    hints: BTreeMap<String, String>,
    #[serde(default)]
    slides: Vec<SlideFile>,
}

#[derive(Debug, Deserialize)]
struct SlideFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    blocks: Vec<Block>,
}

impl Deck {
    /// Parse and validate a deck from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: DeckFile =
            toml::from_str(content).map_err(|e| Error::DeckParse(e.to_string()))?;

        if file.slides.is_empty() {
            return Err(Error::InvalidDeck("deck has no slides".to_string()));
        }

        let slides: Vec<Slide> = file
            .slides
            .into_iter()
            .enumerate()
            .map(|(index, s)| Slide {
                index,
                title: s.title,
                blocks: s.blocks,
            })
            .collect();

        validate_slides(&slides)?;

        Ok(Self {
            title: file.title,
            strings: file.strings,
            hints: file.hints,
            slides,
        })
    }

    /// Load a deck file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The phishing-awareness deck shipped with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_toml(BUNDLED_DECK)
    }

    /// Load from `path` when given, otherwise the bundled deck
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Total number of quiz questions across all slides
    pub fn quiz_count(&self) -> usize {
        self.slides
            .iter()
            .flat_map(|s| &s.blocks)
            .filter(|b| matches!(b.kind, BlockKind::Quiz { .. }))
            .count()
    }
}

fn validate_slides(slides: &[Slide]) -> Result<()> {
    let mut quiz_ids = HashSet::new();
    let mut password_blocks = 0;

    for slide in slides {
        for block in &slide.blocks {
            match &block.kind {
                BlockKind::Quiz { id, options, .. } => {
                    if options.is_empty() {
                        return Err(Error::InvalidDeck(format!(
                            "quiz '{}' on slide {} has no options",
                            id,
                            slide.index + 1
                        )));
                    }
                    if !quiz_ids.insert(id.clone()) {
                        return Err(Error::InvalidDeck(format!("duplicate quiz id '{}'", id)));
                    }
                    if !options.iter().any(|o| o.correct) {
                        warn!("Quiz '{}' has no correct option", id);
                    }
                }
                BlockKind::Password { .. } => password_blocks += 1,
                _ => {}
            }
        }
    }

    if password_blocks > 1 {
        warn!("Deck has {} password fields, only the first is bound", password_blocks);
    }

    Ok(())
}
