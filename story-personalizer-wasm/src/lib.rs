//! WASM bindings for story-personalizer, used by the browser reader.

use wasm_bindgen::prelude::*;

use story_personalizer::core::library::StoryLibrary;
use story_personalizer::core::personalize::personalize as personalize_text;
use story_personalizer::schema::participant::{Gender, Participant};
use story_personalizer::core::reader::ReadingSession;
use story_personalizer::schema::story::StoryId;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct ParticipantInput {
    #[serde(default)]
    name: String,
    #[serde(default)]
    gender: String,
}

#[derive(serde::Serialize)]
struct StoryInfo {
    id: String,
    title: String,
    description: String,
    participant_count: usize,
    chapters: usize,
}

fn parse_participants(json: &str) -> Result<Vec<Participant>, JsError> {
    let inputs: Vec<ParticipantInput> = serde_json::from_str(json)
        .map_err(|e| JsError::new(&format!("Invalid participants JSON: {e}")))?;
    Ok(inputs
        .into_iter()
        .map(|p| Participant::new(p.name, Gender::from_tag(&p.gender)))
        .collect())
}

/// Personalize `text` for a JSON array of `{ "name": .., "gender": .. }`.
#[wasm_bindgen]
pub fn personalize(text: &str, participants_json: &str) -> Result<String, JsError> {
    let participants = parse_participants(participants_json)?;
    Ok(personalize_text(text, &participants))
}

// ---------------------------------------------------------------------------
// ReaderDemo: a story library plus one open reading position
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct ReaderDemo {
    library: StoryLibrary,
    participants: Vec<Participant>,
    open: Option<StoryId>,
    chapter: usize,
}

#[wasm_bindgen]
impl ReaderDemo {
    /// Create a reader over a RON story list for the given cast.
    #[wasm_bindgen(constructor)]
    pub fn new(stories_ron: &str, participants_json: &str) -> Result<ReaderDemo, JsError> {
        let library = StoryLibrary::parse_ron(stories_ron)
            .map_err(|e| JsError::new(&format!("Story parse error: {e}")))?;
        let participants = parse_participants(participants_json)?;
        Ok(ReaderDemo {
            library,
            participants,
            open: None,
            chapter: 0,
        })
    }

    /// Return a JSON array describing every story.
    pub fn stories(&self) -> Result<String, JsError> {
        let infos: Vec<StoryInfo> = self
            .library
            .stories()
            .iter()
            .map(|s| StoryInfo {
                id: s.id.to_string(),
                title: personalize_text(&s.title, &self.participants),
                description: personalize_text(&s.description, &self.participants),
                participant_count: s.cast_size(),
                chapters: s.chapters.len(),
            })
            .collect();
        serde_json::to_string(&infos)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Open a story at its first chapter.
    pub fn open(&mut self, id: &str) -> Result<(), JsError> {
        let id = StoryId::new(id);
        if self.library.get(&id).is_none() {
            return Err(JsError::new(&format!("Unknown story: {id}")));
        }
        self.open = Some(id);
        self.chapter = 0;
        Ok(())
    }

    pub fn title(&self) -> Result<String, JsError> {
        Ok(self.session()?.title())
    }

    pub fn chapter(&self) -> Result<String, JsError> {
        Ok(self.session()?.chapter_text())
    }

    /// Advance one chapter; false at the end.
    pub fn next(&mut self) -> Result<bool, JsError> {
        let (moved, current) = {
            let mut session = self.session()?;
            (session.next(), session.current())
        };
        self.chapter = current;
        Ok(moved)
    }

    /// Go back one chapter; false at the start.
    pub fn previous(&mut self) -> Result<bool, JsError> {
        let (moved, current) = {
            let mut session = self.session()?;
            (session.previous(), session.current())
        };
        self.chapter = current;
        Ok(moved)
    }

    /// "Kapitel 1/3"
    pub fn progress(&self) -> Result<String, JsError> {
        Ok(self.session()?.progress_label())
    }
}

// Private helpers
impl ReaderDemo {
    fn session(&self) -> Result<ReadingSession<'_>, JsError> {
        let story = self
            .open
            .as_ref()
            .and_then(|id| self.library.get(id))
            .ok_or_else(|| JsError::new("No story is open"))?;
        let mut session = ReadingSession::new(story, &self.participants);
        session.go_to(self.chapter);
        Ok(session)
    }
}
