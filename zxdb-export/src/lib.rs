pub mod cli;
pub mod load_config;
pub mod sqlite;

pub use cli::{run, Cli, Commands};
