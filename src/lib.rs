pub mod cli;
pub mod error;
pub mod models;
pub mod services;

pub use cli::{Cli, Commands};
pub use cli::output::OutputFormat;
pub use models::Config;
