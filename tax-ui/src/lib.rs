pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod state;
pub mod utils;
pub mod views;

pub use cli::{Cli, execute};
