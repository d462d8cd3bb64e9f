//! Analyze command: score a prompt and suggest improvements.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use promptshelf_core::analyzer::{self, AnalysisResult, Priority};
use promptshelf_core::display;

use super::{check_input_size, read_input_file, read_stdin};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// File containing the prompt. Reads stdin when neither FILE nor --text is given.
    pub file: Option<Utf8PathBuf>,

    /// Prompt text to analyze.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Show every triggered suggestion instead of a random sample.
    #[arg(long)]
    pub all: bool,
}

/// Analyze a prompt from a file, `--text`, or stdin.
#[instrument(name = "cmd_analyze", skip_all, fields(file = ?args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, all = args.all, "executing analyze command");

    let content = match (&args.file, args.text) {
        (Some(path), _) => read_input_file(path, max_input)?,
        (None, Some(text)) => {
            check_input_size(&text, "--text", max_input)?;
            text
        }
        (None, None) => read_stdin(max_input)?,
    };

    let result = if args.all {
        analyzer::analyze_unsampled(&content)
    } else {
        analyzer::analyze(&content)
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn readability_label(score: u8) -> String {
    let text = format!("{score}/100");
    if score >= 60 {
        text.green().to_string()
    } else if score >= 30 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

fn priority_label(priority: Priority) -> String {
    let text = format!("{:<6}", priority.as_str());
    match priority {
        Priority::High => text.red().bold().to_string(),
        Priority::Medium => text.yellow().to_string(),
        Priority::Low => text.green().to_string(),
    }
}

/// Render an analysis for the terminal.
pub fn print_result(result: &AnalysisResult) {
    println!(
        "{} {}  {} {}  {} ~{}  {} {}",
        "Words:".cyan(),
        result.word_count,
        "Characters:".cyan(),
        result.character_count,
        "Tokens:".cyan(),
        result.estimated_tokens,
        "Readability:".cyan(),
        readability_label(result.readability_score),
    );

    if result.suggestions.is_empty() {
        println!("\n{}", "No suggestions.".green());
        return;
    }

    println!("\n{}", "Suggestions".bold().underline());
    for suggestion in &result.suggestions {
        println!(
            "  {} {} {:<12} {}",
            display::category_glyph(Some(suggestion.category)),
            priority_label(suggestion.priority),
            suggestion.category.as_str().dimmed(),
            suggestion.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_is_analyzed() {
        let args = AnalyzeArgs {
            text: Some("Write a haiku about autumn leaves.".into()),
            ..AnalyzeArgs::default()
        };
        assert!(cmd_analyze(args, true, None).is_ok());
    }

    #[test]
    fn inline_text_respects_limit() {
        let args = AnalyzeArgs {
            text: Some("Write a haiku about autumn leaves.".into()),
            all: true,
            ..AnalyzeArgs::default()
        };
        assert!(cmd_analyze(args, false, Some(8)).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let args = AnalyzeArgs {
            file: Some(Utf8PathBuf::from("/definitely/not/here.txt")),
            ..AnalyzeArgs::default()
        };
        assert!(cmd_analyze(args, false, None).is_err());
    }
}
