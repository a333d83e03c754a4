/// Story Linter: reports placeholders that would be shown to readers as
/// raw text.
///
/// Usage: story_linter <path> [--participants <n>] [--verbose]

use clap::Parser;
use std::path::Path;
use std::process;
use story_personalizer::core::library::{LintIssue, StoryField, StoryLibrary};
use tracing::error;

#[derive(Parser)]
#[command(name = "story_linter", about = "Find unresolved story placeholders", version)]
struct Cli {
    /// A story file or a directory of `.ron` story files
    path: String,

    /// Lint every story against this cast size instead of its own
    #[arg(short, long)]
    participants: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = Path::new(&cli.path);
    let builder = StoryLibrary::builder();
    let builder = if path.is_dir() {
        builder.stories_dir(&cli.path)
    } else if path.is_file() {
        builder.stories_file(&cli.path)
    } else {
        error!("Path '{}' does not exist", cli.path);
        process::exit(2);
    };

    let library = match builder.build() {
        Ok(lib) => lib,
        Err(e) => {
            error!(error = %e, "Failed to load stories");
            process::exit(2);
        }
    };

    println!("Loaded {} stories", library.len());
    let issues = match cli.participants {
        Some(count) => library.lint_for_cast(count),
        None => library.lint(),
    };

    println!("\n=== Placeholder Lint Report ===\n");
    if issues.is_empty() {
        println!("All checks passed!");
    }
    for issue in &issues {
        println!("ERROR: {}", describe(issue));
    }
    println!("\nSummary: {} unresolved placeholders", issues.len());

    process::exit(if issues.is_empty() { 0 } else { 1 });
}

fn describe(issue: &LintIssue) -> String {
    let field = match issue.field {
        StoryField::Title => "title".to_string(),
        StoryField::Description => "description".to_string(),
        StoryField::Chapter(i) => format!("chapter {}", i + 1),
    };
    format!("story '{}' {}: {}", issue.story, field, issue.token)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
