/// Reading session: one story, one cast, one chapter at a time.

use crate::core::personalize::Cast;
use crate::schema::participant::Participant;
use crate::schema::story::{Story, StoryId};

/// Shown in place of a chapter when the story has none.
pub const EMPTY_CHAPTER_TEXT: &str = "Ingen text.";

/// Tracks the current chapter of a story being read and renders its
/// text for the session's cast.
#[derive(Debug, Clone)]
pub struct ReadingSession<'a> {
    story: &'a Story,
    cast: Cast<'a>,
    current: usize,
}

impl<'a> ReadingSession<'a> {
    pub fn new(story: &'a Story, participants: &'a [Participant]) -> Self {
        Self {
            story,
            cast: Cast::new(participants),
            current: 0,
        }
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story.id
    }

    pub fn title(&self) -> String {
        self.cast.personalize(&self.story.title)
    }

    pub fn description(&self) -> String {
        self.cast.personalize(&self.story.description)
    }

    /// Personalized text of the current chapter.
    pub fn chapter_text(&self) -> String {
        match self.story.chapters.get(self.current) {
            Some(chapter) => self.cast.personalize(&chapter.content),
            None => EMPTY_CHAPTER_TEXT.to_string(),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn chapter_count(&self) -> usize {
        self.story.chapters.len()
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.chapter_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Advance one chapter. Returns false at the last chapter.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one chapter. Returns false at the first chapter.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `chapter`, clamped to the story's range.
    pub fn go_to(&mut self, chapter: usize) {
        self.current = chapter.min(self.chapter_count().saturating_sub(1));
    }

    /// "Kapitel 2/5"
    pub fn progress_label(&self) -> String {
        format!("Kapitel {}/{}", self.current + 1, self.chapter_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::participant::Gender;
    use crate::schema::story::Chapter;

    fn make_story(chapters: &[&str]) -> Story {
        Story {
            id: StoryId::new("4"),
            title: "{person1} och skatten".to_string(),
            name: None,
            description: "{namn} letar efter {hans/hennes} skatt.".to_string(),
            participant_count: Some(1),
            chapters: chapters.iter().map(|c| Chapter::new(*c)).collect(),
        }
    }

    #[test]
    fn renders_title_and_chapters() {
        let story = make_story(&["{namn} grävde.", "{pronomen} hittade guld!"]);
        let cast = vec![Participant::new("Ali", Gender::Masculine)];
        let mut session = ReadingSession::new(&story, &cast);

        assert_eq!(session.title(), "Ali och skatten");
        assert_eq!(session.description(), "Ali letar efter hans skatt.");
        assert_eq!(session.chapter_text(), "Ali grävde.");
        assert_eq!(session.progress_label(), "Kapitel 1/2");

        assert!(session.next());
        assert_eq!(session.chapter_text(), "han hittade guld!");
        assert_eq!(session.progress_label(), "Kapitel 2/2");
    }

    #[test]
    fn navigation_clamps() {
        let story = make_story(&["ett", "två", "tre"]);
        let mut session = ReadingSession::new(&story, &[]);

        assert!(!session.has_previous());
        assert!(!session.previous());
        assert_eq!(session.current(), 0);

        assert!(session.next());
        assert!(session.next());
        assert!(!session.has_next());
        assert!(!session.next());
        assert_eq!(session.current(), 2);

        assert!(session.previous());
        assert_eq!(session.current(), 1);

        session.go_to(99);
        assert_eq!(session.current(), 2);
    }

    #[test]
    fn story_without_chapters() {
        let story = make_story(&[]);
        let mut session = ReadingSession::new(&story, &[]);
        assert_eq!(session.chapter_text(), EMPTY_CHAPTER_TEXT);
        assert_eq!(session.chapter_count(), 0);
        assert!(!session.next());
        session.go_to(3);
        assert_eq!(session.current(), 0);
    }

    #[test]
    fn empty_cast_reads_as_kim() {
        let story = make_story(&["{namn} log."]);
        let session = ReadingSession::new(&story, &[]);
        assert_eq!(session.title(), "Kim och skatten");
        assert_eq!(session.chapter_text(), "Kim log.");
    }
}
