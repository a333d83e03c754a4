/// Story library: loading stories from RON, lookup, and template linting.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::placeholder::{Segment, Template};
use crate::schema::story::{Chapter, Story, StoryId};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate story id '{0}' in one source")]
    DuplicateId(StoryId),
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),
}

/// Which text of a story a lint issue was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryField {
    Title,
    Description,
    Chapter(usize),
}

/// A placeholder that would render literally for the story's own cast size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub story: StoryId,
    pub field: StoryField,
    pub token: String,
}

/// An ordered collection of stories. Built via `StoryLibrary::builder()`.
#[derive(Debug, Clone, Default)]
pub struct StoryLibrary {
    stories: Vec<Story>,
    seed: u64,
}

/// Builder for constructing a `StoryLibrary`.
pub struct StoryLibraryBuilder {
    stories_dir: Option<String>,
    files: Vec<String>,
    seed: u64,
    /// Directly provided stories (for testing without files).
    stories: Vec<Story>,
}

impl StoryLibrary {
    pub fn builder() -> StoryLibraryBuilder {
        StoryLibraryBuilder {
            stories_dir: None,
            files: Vec::new(),
            seed: 0,
            stories: Vec::new(),
        }
    }

    /// Load a story list from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<StoryLibrary, LibraryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a story list from a RON string.
    pub fn parse_ron(input: &str) -> Result<StoryLibrary, LibraryError> {
        let stories: Vec<Story> = ron::from_str(input)?;
        let mut seen = rustc_hash::FxHashSet::default();
        for story in &stories {
            if !seen.insert(story.id.clone()) {
                return Err(LibraryError::DuplicateId(story.id.clone()));
            }
        }
        Ok(StoryLibrary { stories, seed: 0 })
    }

    /// Merge another library into this one. Stories from `other` replace
    /// stories in `self` with the same id; new ones are appended.
    pub fn merge(&mut self, other: StoryLibrary) {
        for story in other.stories {
            match self.stories.iter_mut().find(|s| s.id == story.id) {
                Some(existing) => *existing = story,
                None => self.stories.push(story),
            }
        }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Seed for the catalog's random view.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| &s.id == id)
    }

    pub fn chapters(&self, id: &StoryId) -> Result<&[Chapter], LibraryError> {
        self.get(id)
            .map(|s| s.chapters.as_slice())
            .ok_or_else(|| LibraryError::StoryNotFound(id.clone()))
    }

    /// Every token in every story that would be left literal for the
    /// story's own participant count.
    pub fn lint(&self) -> Vec<LintIssue> {
        self.lint_with(|story| story.cast_size())
    }

    /// Like `lint`, but judging every story against a cast of `count`.
    pub fn lint_for_cast(&self, count: usize) -> Vec<LintIssue> {
        self.lint_with(|_| count)
    }

    fn lint_with(&self, cast_size: impl Fn(&Story) -> usize) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        for story in &self.stories {
            let count = cast_size(story);
            let mut check = |field: StoryField, text: &str| {
                for segment in Template::parse(text).unresolved(count) {
                    if let Segment::Token { raw, .. } = segment {
                        issues.push(LintIssue {
                            story: story.id.clone(),
                            field,
                            token: raw.clone(),
                        });
                    }
                }
            };
            check(StoryField::Title, &story.title);
            check(StoryField::Description, &story.description);
            for (i, chapter) in story.chapters.iter().enumerate() {
                check(StoryField::Chapter(i), &chapter.content);
            }
        }
        issues
    }
}

impl StoryLibraryBuilder {
    /// Load every `.ron` file in `path`.
    pub fn stories_dir(mut self, path: &str) -> Self {
        self.stories_dir = Some(path.to_string());
        self
    }

    /// Load a single RON story file.
    pub fn stories_file(mut self, path: &str) -> Self {
        self.files.push(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Provide stories directly (for testing without files).
    pub fn with_stories(mut self, stories: Vec<Story>) -> Self {
        self.stories.extend(stories);
        self
    }

    pub fn build(self) -> Result<StoryLibrary, LibraryError> {
        let mut library = StoryLibrary::default();

        if let Some(ref dir) = self.stories_dir {
            if Path::new(dir).exists() {
                load_ron_files_from_dir(dir, |path| {
                    let loaded = StoryLibrary::load_from_ron(path)?;
                    debug!(path = %path.display(), count = loaded.len(), "Loaded story file");
                    library.merge(loaded);
                    Ok(())
                })?;
            }
        }

        for file in &self.files {
            let path = Path::new(file);
            let loaded = StoryLibrary::load_from_ron(path)?;
            debug!(path = %path.display(), count = loaded.len(), "Loaded story file");
            library.merge(loaded);
        }

        // Directly provided stories override files
        library.merge(StoryLibrary {
            stories: self.stories,
            seed: 0,
        });
        library.seed = self.seed;

        Ok(library)
    }
}

/// Load all .ron files from a directory in name order, calling `loader`
/// for each.
fn load_ron_files_from_dir<F>(dir: &str, mut loader: F) -> Result<(), LibraryError>
where
    F: FnMut(&Path) -> Result<(), LibraryError>,
{
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            paths.push(path);
        }
    }
    paths.sort();
    for path in paths {
        loader(&path)?;
    }
    Ok(())
}
