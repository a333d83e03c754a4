/// Preference persistence: a small key-value store interface and the
/// reader's user-data record kept in it.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::participant::{Gender, Participant};
use crate::schema::story::StoryId;
use crate::schema::user_data::{PreferencesUpdate, UserData, UserStats};

/// Key the user-data record is stored under.
pub const USER_DATA_KEY: &str = "user_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Durable string key-value storage scoped to one device.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store backed by one RON map file, rewritten on every mutation.
///
/// A missing file starts empty. A file that fails to parse is logged
/// and also treated as empty; it is overwritten on the next write.
#[derive(Debug, Clone)]
pub struct RonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl RonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = Self::load_from_disk(&path)?;
        debug!(path = %path.display(), count = entries.len(), "Preference store loaded");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        match ron::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding unreadable preference file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = ron::ser::to_string_pretty(&self.entries, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for RonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Owns the reader's `UserData` and keeps it in sync with a store.
#[derive(Debug)]
pub struct UserDataManager<S: PreferenceStore> {
    store: S,
    user_data: UserData,
}

impl<S: PreferenceStore> UserDataManager<S> {
    /// Load the saved record, or start from defaults if there is none or
    /// it cannot be read.
    pub fn new(store: S) -> Result<Self, StoreError> {
        let user_data = match store.get(USER_DATA_KEY)? {
            Some(saved) => match ron::from_str::<UserData>(&saved) {
                Ok(data) => data,
                Err(e) => {
                    warn!(error = %e, "Could not parse saved user data; using defaults");
                    UserData::default()
                }
            },
            None => UserData::default(),
        };
        Ok(Self { store, user_data })
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `next` and adopt it only once the store accepted it, so a
    /// failed write leaves memory matching the store.
    fn commit(&mut self, next: UserData) -> Result<(), StoreError> {
        let serialized = ron::to_string(&next)?;
        debug!(bytes = serialized.len(), "Saving user data");
        self.store.set(USER_DATA_KEY, serialized)?;
        self.user_data = next;
        Ok(())
    }

    /// Apply `change` to a copy of the record and commit it.
    fn update(&mut self, change: impl FnOnce(&mut UserData)) -> Result<(), StoreError> {
        let mut next = self.user_data.clone();
        change(&mut next);
        self.commit(next)
    }

    pub fn update_names_and_genders(
        &mut self,
        names: Vec<String>,
        genders: Vec<Gender>,
    ) -> Result<(), StoreError> {
        self.update(|data| {
            data.participant_count = names.len();
            data.names = names;
            data.genders = genders;
        })
    }

    pub fn set_participants(&mut self, participants: &[Participant]) -> Result<(), StoreError> {
        let names = participants.iter().map(|p| p.name.clone()).collect();
        let genders = participants.iter().map(|p| p.gender).collect();
        self.update_names_and_genders(names, genders)
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.user_data.participants()
    }

    /// Add or remove `id` from the favorites. Returns the updated list.
    pub fn toggle_favorite(&mut self, id: &StoryId) -> Result<&[StoryId], StoreError> {
        self.update(|data| match data.favorites.iter().position(|f| f == id) {
            Some(pos) => {
                data.favorites.remove(pos);
            }
            None => data.favorites.push(id.clone()),
        })?;
        Ok(&self.user_data.favorites)
    }

    pub fn is_favorite(&self, id: &StoryId) -> bool {
        self.user_data.is_favorite(id)
    }

    pub fn mark_as_read(&mut self, id: &StoryId) -> Result<(), StoreError> {
        if self.user_data.is_read(id) {
            return Ok(());
        }
        self.update(|data| data.read_stories.push(id.clone()))
    }

    pub fn is_read(&self, id: &StoryId) -> bool {
        self.user_data.is_read(id)
    }

    pub fn set_last_read_story(&mut self, id: &StoryId) -> Result<(), StoreError> {
        self.update(|data| data.last_read_story = Some(id.clone()))
    }

    pub fn last_read_story(&self) -> Option<&StoryId> {
        self.user_data.last_read_story.as_ref()
    }

    pub fn update_preferences(&mut self, update: &PreferencesUpdate) -> Result<(), StoreError> {
        self.update(|data| data.preferences.apply(update))
    }

    /// Forget everything, including the stored record.
    pub fn clear_all_data(&mut self) -> Result<(), StoreError> {
        self.store.remove(USER_DATA_KEY)?;
        self.user_data = UserData::default();
        Ok(())
    }

    pub fn export_user_data(&self) -> UserData {
        self.user_data.clone()
    }

    pub fn import_user_data(&mut self, data: UserData) -> Result<(), StoreError> {
        self.commit(data)
    }

    pub fn stats(&self) -> UserStats {
        UserStats {
            total_favorites: self.user_data.favorites.len(),
            total_read: self.user_data.read_stories.len(),
            participant_count: self.user_data.participant_count,
            last_read: self.user_data.last_read_story.clone(),
        }
    }
}
