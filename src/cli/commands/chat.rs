use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::output::{Formatter, OutputFormat, get_formatter};
use crate::error::ChatError;
use crate::models::Config;
use crate::services::Session;

use super::process_documents;

#[derive(Debug, Args)]
pub struct ChatArgs {
    #[arg(help = "PDF files to process before the first question")]
    pub files: Vec<PathBuf>,
}

/// Interactive loop: process documents, then answer questions until EOF
/// or `:quit`.
pub async fn handle_chat(args: ChatArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);
    let mut session = super::build_session(config)?;

    if args.files.is_empty() {
        println!(
            "{}",
            formatter.format_message("No documents loaded yet. Use :load <file.pdf> to begin.")
        );
    } else {
        process_documents(&mut session, &args.files, formatter.as_ref(), verbose).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        if line.is_empty() {
            prompt();
            continue;
        }
        if line == ":quit" || line == ":exit" {
            break;
        }
        if line == ":load" || line.starts_with(":load ") {
            let rest = &line[":load".len()..];
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                println!(
                    "{}",
                    formatter.format_error("usage: :load <file.pdf> [<file.pdf>...]")
                );
            } else if let Err(e) =
                process_documents(&mut session, &paths, formatter.as_ref(), verbose).await
            {
                println!("{}", formatter.format_error(&format!("{e:#}")));
            }
            prompt();
            continue;
        }

        answer_question(&mut session, line, formatter.as_ref()).await;
        prompt();
    }

    Ok(())
}

async fn answer_question(session: &mut Session, question: &str, formatter: &dyn Formatter) {
    match session.ask(question).await {
        Ok(_) => {
            if let Some(turn) = session.last_turn() {
                print!("{}", formatter.format_turn(&turn));
            }
        }
        Err(ChatError::NotReady) => {
            println!(
                "{}",
                formatter.format_message("No documents processed yet. Use :load <file.pdf> first.")
            );
        }
        Err(e) => {
            println!("{}", formatter.format_error(&e.to_string()));
        }
    }
}

fn prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}
