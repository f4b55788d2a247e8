use std::fmt::Write as FmtWrite;

use crate::models::ChatTurn;
use crate::services::ProcessStats;

/// Output format for rendered turns and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// Machine-parseable JSON format
    Json,
    /// Documentation-friendly Markdown format
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

pub trait Formatter {
    fn format_turn(&self, turn: &ChatTurn) -> String;
    fn format_process_stats(&self, stats: &ProcessStats) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_turn(&self, turn: &ChatTurn) -> String {
        let mut output = String::new();
        writeln!(output, "You: {}", turn.question.content).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Assistant: {}", turn.answer.content).unwrap();
        output
    }

    fn format_process_stats(&self, stats: &ProcessStats) -> String {
        let mut output = String::new();
        writeln!(output, "Processing Complete").unwrap();
        writeln!(output, "-------------------").unwrap();
        writeln!(output, "Documents:  {}", stats.documents).unwrap();
        writeln!(output, "Characters: {}", stats.characters).unwrap();
        writeln!(output, "Chunks:     {}", stats.chunks).unwrap();
        writeln!(output, "Time:       {}ms", stats.duration_ms).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_turn(&self, turn: &ChatTurn) -> String {
        let mut json = serde_json::to_string_pretty(turn).unwrap_or_default();
        json.push('\n');
        json
    }

    fn format_process_stats(&self, stats: &ProcessStats) -> String {
        let mut json = serde_json::to_string_pretty(stats).unwrap_or_default();
        json.push('\n');
        json
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({ "message": message }).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({ "error": error }).to_string()
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_turn(&self, turn: &ChatTurn) -> String {
        let mut output = String::new();
        writeln!(output, "**You:** {}", turn.question.content).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Assistant:** {}", turn.answer.content).unwrap();
        output
    }

    fn format_process_stats(&self, stats: &ProcessStats) -> String {
        let mut output = String::new();
        writeln!(output, "## Processing Complete").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "- Documents: {}", stats.documents).unwrap();
        writeln!(output, "- Characters: {}", stats.characters).unwrap();
        writeln!(output, "- Chunks: {}", stats.chunks).unwrap();
        writeln!(output, "- Time: {}ms", stats.duration_ms).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("> {}", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("> **Error:** {}", error)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}
