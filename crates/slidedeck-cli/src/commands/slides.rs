use anyhow::Result;
use tracing::info;

use slidedeck_core::deck::{BlockKind, Slide};
use slidedeck_core::{AppConfig, Deck};

pub fn run(config: &AppConfig) -> Result<()> {
    let deck_path = config.deck_path();
    let deck = Deck::load_or_bundled(deck_path.as_deref())?;
    match &deck_path {
        Some(path) => info!("Loaded deck {}", path.display()),
        None => info!("Loaded bundled deck"),
    }

    println!(
        "{} ({} slides, {} quiz questions)\n",
        deck.title,
        deck.slide_count(),
        deck.quiz_count()
    );
    for slide in &deck.slides {
        println!("{}", describe_slide(slide));
    }
    Ok(())
}

/// One listing line: number, title and the interactive widgets on the slide
fn describe_slide(slide: &Slide) -> String {
    let mut widgets = Vec::new();

    if slide.has_stats() {
        let values: Vec<&str> = slide
            .blocks
            .iter()
            .filter_map(|b| match &b.kind {
                BlockKind::Stat { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        widgets.push(format!("stats: {}", values.join(", ")));
    }
    let quizzes = slide
        .blocks
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::Quiz { .. }))
        .count();
    if quizzes > 0 {
        widgets.push(format!("quiz x{}", quizzes));
    }
    if slide.has_password() {
        widgets.push("password meter".to_string());
    }
    if slide.has_start() {
        widgets.push("start".to_string());
    }
    if slide.animate_count() > 0 {
        widgets.push(format!("{} animated", slide.animate_count()));
    }

    format!("{:>3}. {:<32} {}", slide.index + 1, slide.title, widgets.join(" | "))
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_bundled_slides() {
        let deck = Deck::bundled().unwrap();
        let lines: Vec<String> = deck.slides.iter().map(describe_slide).collect();

        assert!(lines[0].starts_with("  1. Think Before You Click"));
        assert!(lines[0].ends_with("start | 1 animated"));
        assert!(lines[1].contains("stats: 94%, $20B+, 300k"));
        assert!(lines[3].ends_with("password meter"));
        assert!(lines[4].contains("quiz x3"));
    }
}
