//! CLI module for the document chat tool.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use output::OutputFormat;

/// Interactive question answering over PDF documents.
#[derive(Debug, Parser)]
#[command(name = "dochat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Chat interactively with your documents
    Chat(commands::ChatArgs),

    /// Ask a single question about one or more documents
    Ask(commands::AskArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
