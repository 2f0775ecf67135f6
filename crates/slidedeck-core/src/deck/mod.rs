mod loader;
mod models;
mod registry;

pub use models::{
    Block, BlockKind, Deck, DeckStrings, PasswordLabels, QuizOptionSpec, Slide,
};
pub use registry::{SlideEntry, SlideRegistry};
