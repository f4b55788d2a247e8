use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{OutputFormat, get_formatter};
use crate::models::Config;

use super::process_documents;

#[derive(Debug, Args)]
pub struct AskArgs {
    #[arg(required = true, help = "Question to ask about the documents")]
    pub question: String,

    #[arg(
        long = "file",
        short = 'F',
        required = true,
        help = "PDF file to process (repeatable)"
    )]
    pub files: Vec<PathBuf>,
}

/// One-shot: process the given documents, run a single question turn,
/// and render it.
pub async fn handle_ask(args: AskArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let question = args.question.trim();
    if question.is_empty() {
        anyhow::bail!("question cannot be empty");
    }

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let mut session = super::build_session(config)?;

    process_documents(&mut session, &args.files, formatter.as_ref(), verbose).await?;

    session
        .ask(question)
        .await
        .context("question turn failed")?;
    let turn = session
        .last_turn()
        .context("no turn was recorded")?;
    print!("{}", formatter.format_turn(&turn));

    Ok(())
}
