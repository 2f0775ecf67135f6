pub mod config;
pub mod password;
pub mod run;
pub mod slides;
