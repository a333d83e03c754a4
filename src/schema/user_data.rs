use serde::{Deserialize, Serialize};

use super::participant::{Gender, Participant};
use super::story::StoryId;

/// Display preferences saved alongside the reader's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub auto_save: bool,
    pub show_favorites: bool,
    pub show_read_stories: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_save: true,
            show_favorites: true,
            show_read_stories: true,
        }
    }
}

/// Partial preference update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub auto_save: Option<bool>,
    pub show_favorites: Option<bool>,
    pub show_read_stories: Option<bool>,
}

impl Preferences {
    pub fn apply(&mut self, update: &PreferencesUpdate) {
        if let Some(v) = update.auto_save {
            self.auto_save = v;
        }
        if let Some(v) = update.show_favorites {
            self.show_favorites = v;
        }
        if let Some(v) = update.show_read_stories {
            self.show_read_stories = v;
        }
    }
}

/// Everything the reader remembers about one device's user between
/// sessions. Fields missing from a stored record take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    pub names: Vec<String>,
    pub genders: Vec<Gender>,
    pub favorites: Vec<StoryId>,
    pub read_stories: Vec<StoryId>,
    pub last_read_story: Option<StoryId>,
    pub participant_count: usize,
    pub preferences: Preferences,
}

// A fresh record has one blank name. Blank names render as "" (legacy
// `{namn}` included), so content read before the name form is filled in
// shows gaps rather than the "Kim" used for an empty cast.
impl Default for UserData {
    fn default() -> Self {
        Self {
            names: vec![String::new()],
            genders: vec![Gender::Feminine],
            favorites: Vec::new(),
            read_stories: Vec::new(),
            last_read_story: None,
            participant_count: 1,
            preferences: Preferences::default(),
        }
    }
}

impl UserData {
    pub fn is_favorite(&self, id: &StoryId) -> bool {
        self.favorites.contains(id)
    }

    pub fn is_read(&self, id: &StoryId) -> bool {
        self.read_stories.contains(id)
    }

    /// The saved cast, pairing names with genders by position.
    pub fn participants(&self) -> Vec<Participant> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Participant::new(
                    name.clone(),
                    self.genders.get(i).copied().unwrap_or(Gender::Neutral),
                )
            })
            .collect()
    }
}

/// Summary counts for the reader's profile view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_favorites: usize,
    pub total_read: usize,
    pub participant_count: usize,
    pub last_read: Option<StoryId>,
}
