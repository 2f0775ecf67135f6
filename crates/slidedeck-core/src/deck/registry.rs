//! Ordered index of slides and their nav-dot controls
//!
//! Built once from a `Deck` and never mutated: slides are neither added nor
//! removed while presenting.

use super::models::{BlockKind, Deck};

/// Per-slide facts the controllers query
#[derive(Debug, Clone)]
pub struct SlideEntry {
    pub index: usize,
    pub title: String,
    /// Block indices of stat widgets
    pub stat_blocks: Vec<usize>,
    /// Block indices tagged `animate`
    pub animate_blocks: Vec<usize>,
    /// Quiz ordinals (deck-wide order) on this slide
    pub quiz_ordinals: Vec<usize>,
    pub has_start: bool,
    pub has_password: bool,
}

impl SlideEntry {
    pub fn has_stats(&self) -> bool {
        !self.stat_blocks.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SlideRegistry {
    entries: Vec<SlideEntry>,
}

impl SlideRegistry {
    pub fn from_deck(deck: &Deck) -> Self {
        let mut quiz_ordinal = 0;
        let entries = deck
            .slides
            .iter()
            .map(|slide| {
                let mut entry = SlideEntry {
                    index: slide.index,
                    title: slide.title.clone(),
                    stat_blocks: Vec::new(),
                    animate_blocks: Vec::new(),
                    quiz_ordinals: Vec::new(),
                    has_start: false,
                    has_password: false,
                };
                for (block_idx, block) in slide.blocks.iter().enumerate() {
                    if block.animate {
                        entry.animate_blocks.push(block_idx);
                    }
                    match block.kind {
                        BlockKind::Stat { .. } => entry.stat_blocks.push(block_idx),
                        BlockKind::Quiz { .. } => {
                            entry.quiz_ordinals.push(quiz_ordinal);
                            quiz_ordinal += 1;
                        }
                        BlockKind::Start { .. } => entry.has_start = true,
                        BlockKind::Password { .. } => entry.has_password = true,
                        _ => {}
                    }
                }
                entry
            })
            .collect();

        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest valid index (0 for an empty registry)
    #[inline]
    pub fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&SlideEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideEntry> {
        self.entries.iter()
    }

    /// Accessible label for the dot of slide `index`
    pub fn dot_label(&self, index: usize) -> String {
        format!("Slide {}", index + 1)
    }

    /// Slide holding the quiz with the given deck-wide ordinal
    pub fn slide_of_quiz(&self, ordinal: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.quiz_ordinals.contains(&ordinal))
            .map(|e| e.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_from_bundled_deck() {
        let deck = Deck::bundled().unwrap();
        let registry = SlideRegistry::from_deck(&deck);

        assert_eq!(registry.len(), deck.slide_count());
        assert_eq!(registry.last_index(), deck.slide_count() - 1);
        assert!(registry.get(0).unwrap().has_start);
        assert_eq!(registry.get(1).unwrap().stat_blocks, vec![0, 1, 2]);
        assert!(registry.get(1).unwrap().has_stats());
        assert_eq!(registry.dot_label(0), "Slide 1");
        assert!(registry.get(registry.len()).is_none());
    }

    #[test]
    fn test_quiz_ordinals_are_deck_wide() {
        let deck = Deck::from_toml(
            r#"
            [[slides]]
            [[slides.blocks]]
            kind = "quiz"
            id = "a"
            prompt = "?"
            options = [{ text = "x", correct = true }]
            [[slides]]
            [[slides.blocks]]
            kind = "quiz"
            id = "b"
            prompt = "?"
            options = [{ text = "y", correct = true }]
            "#,
        )
        .unwrap();
        let registry = SlideRegistry::from_deck(&deck);
        assert_eq!(registry.get(0).unwrap().quiz_ordinals, vec![0]);
        assert_eq!(registry.get(1).unwrap().quiz_ordinals, vec![1]);
        assert_eq!(registry.slide_of_quiz(1), Some(1));
        assert_eq!(registry.slide_of_quiz(2), None);
    }
}
