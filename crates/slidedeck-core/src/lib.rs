pub mod config;
pub mod error;
pub mod deck;
pub mod nav;
pub mod scroll;
pub mod stats;
pub mod password;
pub mod quiz;
pub mod visibility;
pub mod presentation;

pub use config::{AppConfig, EasingType, NavigationConfig, ScrollConfig};
pub use deck::Deck;
pub use error::{Error, Result};
pub use password::{check_password, PasswordAssessment};
pub use presentation::{InputEvent, Presentation};
