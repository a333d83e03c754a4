/// Catalog selection: which stories the story picker shows, and in what order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::schema::story::Story;
use crate::schema::user_data::UserData;

/// The picker's view modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryFilter {
    /// Everything, newest first.
    #[default]
    All,
    Favorites,
    Read,
    Unread,
    /// Everything, with the last-read story moved to the front.
    LastRead,
    Latest,
    Oldest,
    /// A single story picked at random.
    Random,
}

impl StoryFilter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Favorites => "favorites",
            Self::Read => "read",
            Self::Unread => "unread",
            Self::LastRead => "last_read",
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Random => "random",
        }
    }

    /// Parse a filter name; unknown names select `All`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "favorites" => Self::Favorites,
            "read" => Self::Read,
            "unread" => Self::Unread,
            "last_read" | "lastread" => Self::LastRead,
            "latest" => Self::Latest,
            "oldest" => Self::Oldest,
            "random" => Self::Random,
            _ => Self::All,
        }
    }
}

/// What the reader asked the picker for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub participant_count: usize,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: StoryFilter,
}

impl CatalogQuery {
    pub fn new(participant_count: usize) -> Self {
        Self {
            participant_count,
            search: String::new(),
            filter: StoryFilter::All,
        }
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = term.to_string();
        self
    }

    pub fn filter(mut self, filter: StoryFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Select and order the stories to show.
///
/// Stories are first narrowed to those written for the query's cast size,
/// then to those matching the search term, then the filter is applied.
pub fn select<'s, R: Rng + ?Sized>(
    stories: &'s [Story],
    query: &CatalogQuery,
    user: &UserData,
    rng: &mut R,
) -> Vec<&'s Story> {
    let needle = query.search.trim().to_lowercase();
    let mut selected: Vec<&Story> = stories
        .iter()
        .filter(|s| s.fits_cast(query.participant_count))
        .filter(|s| needle.is_empty() || s.matches_search(&needle))
        .collect();

    match query.filter {
        StoryFilter::Favorites => selected.retain(|s| user.is_favorite(&s.id)),
        StoryFilter::Read => selected.retain(|s| user.is_read(&s.id)),
        StoryFilter::Unread => selected.retain(|s| !user.is_read(&s.id)),
        StoryFilter::LastRead => {
            if let Some(ref last) = user.last_read_story {
                if let Some(pos) = selected.iter().position(|s| &s.id == last) {
                    let story = selected.remove(pos);
                    selected.insert(0, story);
                }
            }
        }
        StoryFilter::All | StoryFilter::Latest => {
            selected.sort_by_key(|s| std::cmp::Reverse(s.id.sort_key()));
        }
        StoryFilter::Oldest => selected.sort_by_key(|s| s.id.sort_key()),
        StoryFilter::Random => {
            if !selected.is_empty() {
                let pick = selected[rng.gen_range(0..selected.len())];
                selected = vec![pick];
            }
        }
    }

    selected
}
