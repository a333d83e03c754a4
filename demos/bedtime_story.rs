//! Bedtime story: two siblings, one chapter at a time.

use story_personalizer::core::reader::ReadingSession;
use story_personalizer::schema::participant::{Gender, Participant};
use story_personalizer::schema::story::{Chapter, Story, StoryId};

fn main() {
    let story = Story {
        id: StoryId::new("1"),
        title: "{person1} och {person2} i trollskogen".to_string(),
        name: Some("Trollskogen".to_string()),
        description: "Två syskon går vilse.".to_string(),
        participant_count: Some(2),
        chapters: vec![
            Chapter::new(
                "{person1} tog {hans/hennes1} ficklampa. {person2} höll i {person1s} hand.",
            ),
            Chapter::new(
                "Ett troll tittade på {honom/henne2}. {han/hon2} var inte rädd, \
                 för {han/hon2} var en modig {pojke/flicka2}.",
            ),
            Chapter::new("Till slut hittade de hem och {person1} skrattade för {sig själv1}."),
        ],
    };

    let cast = vec![
        Participant::new("Ali", Gender::from_tag("pojke")),
        Participant::new("Noor", Gender::from_tag("flicka")),
    ];

    let mut session = ReadingSession::new(&story, &cast);
    println!("{}\n", session.title());
    loop {
        println!("{}", session.progress_label());
        println!("{}\n", session.chapter_text());
        if !session.next() {
            break;
        }
    }
}
