/// Preview: print a story personalized for a given cast.
///
/// Usage: preview <stories> --story <id> [--participant name:gender]...
///
/// Gender tags are `man`/`pojke`, `kvinna`/`flicka`, or anything else
/// for `hen`.

use clap::Parser;
use std::path::Path;
use std::process;
use story_personalizer::core::library::StoryLibrary;
use story_personalizer::core::reader::ReadingSession;
use story_personalizer::schema::participant::{Gender, Participant, MAX_PARTICIPANTS};
use story_personalizer::schema::story::StoryId;
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "preview", about = "Render a personalized story", version)]
struct Cli {
    /// A story file or a directory of `.ron` story files
    stories: String,

    /// Id of the story to render
    #[arg(short, long)]
    story: String,

    /// Participant as `name:gender`; repeat for more participants
    #[arg(short, long = "participant", value_parser = parse_participant)]
    participants: Vec<Participant>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_participant(arg: &str) -> Result<Participant, String> {
    let (name, tag) = arg.rsplit_once(':').unwrap_or((arg, ""));
    Ok(Participant::new(name, Gender::from_tag(tag)))
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let builder = if Path::new(&cli.stories).is_dir() {
        StoryLibrary::builder().stories_dir(&cli.stories)
    } else {
        StoryLibrary::builder().stories_file(&cli.stories)
    };
    let library = match builder.build() {
        Ok(lib) => lib,
        Err(e) => {
            error!(error = %e, "Failed to load stories");
            process::exit(1);
        }
    };

    let id = StoryId::new(cli.story.as_str());
    let Some(story) = library.get(&id) else {
        error!("No story with id '{}'", id);
        process::exit(1);
    };

    if cli.participants.len() > MAX_PARTICIPANTS {
        warn!(
            count = cli.participants.len(),
            "More participants than the reader supports"
        );
    }
    if story.cast_size() != cli.participants.len().max(1) {
        warn!(
            expected = story.cast_size(),
            given = cli.participants.len(),
            "Cast size differs from the story's participant count"
        );
    }

    let mut session = ReadingSession::new(story, &cli.participants);
    println!("{}\n", session.title());
    loop {
        println!("--- {} ---", session.progress_label());
        println!("{}\n", session.chapter_text());
        if !session.next() {
            break;
        }
    }
}
