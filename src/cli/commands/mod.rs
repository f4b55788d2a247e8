mod ask;
mod chat;
mod config;

pub use ask::AskArgs;
pub use chat::ChatArgs;
pub use config::ConfigCommand;

pub use ask::handle_ask;
pub use chat::handle_chat;
pub use config::handle_config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::output::Formatter;
use crate::models::{Config, SourceDocument};
use crate::services::{OpenAiChat, OpenAiEmbeddings, ProcessStats, Session};

/// Build a session with the hosted providers from configuration.
fn build_session(config: Config) -> Result<Session> {
    let embedder =
        OpenAiEmbeddings::new(&config.embedding).context("failed to create embedding client")?;
    let completion =
        OpenAiChat::new(&config.completion).context("failed to create completion client")?;
    Ok(Session::new(
        config,
        Arc::new(embedder),
        Arc::new(completion),
    ))
}

/// Read the given PDF files into memory, in argument order.
fn load_documents(paths: &[PathBuf]) -> Result<Vec<SourceDocument>> {
    paths
        .iter()
        .map(|path| {
            SourceDocument::from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))
        })
        .collect()
}

/// Run the process action behind a spinner and report the outcome.
async fn process_documents(
    session: &mut Session,
    paths: &[PathBuf],
    formatter: &dyn Formatter,
    verbose: bool,
) -> Result<ProcessStats> {
    let documents = load_documents(paths)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Processing {} document(s)...", documents.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = session.process(&documents).await;
    spinner.finish_and_clear();

    let stats = result.context("processing failed")?;
    if verbose {
        eprintln!("Timing:");
        eprintln!("  Process: {}ms", stats.duration_ms);
        eprintln!();
    }
    print!("{}", formatter.format_process_stats(&stats));
    Ok(stats)
}
