use serde::{Deserialize, Serialize};

/// Largest cast the reader's name form collects.
pub const MAX_PARTICIPANTS: usize = 3;

/// Grammatical gender of a participant, used to resolve pronoun
/// placeholders such as `{han/hon1}` and `{hans/hennes}`.
///
/// Serialized as its canonical tag (`man`, `kvinna`, `hen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    /// han/hans/honom/pojke
    Masculine,
    /// hon/hennes/henne/flicka
    Feminine,
    /// hen
    Neutral,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Feminine
    }
}

impl Gender {
    /// Normalize a gender tag. `man`/`pojke` and `kvinna`/`flicka` are
    /// synonyms; anything else is neutral.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "man" | "pojke" => Self::Masculine,
            "kvinna" | "flicka" => Self::Feminine,
            _ => Self::Neutral,
        }
    }

    /// Canonical tag: "man", "kvinna", "hen".
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Masculine => "man",
            Self::Feminine => "kvinna",
            Self::Neutral => "hen",
        }
    }

    /// Subject pronoun: "han", "hon", "hen".
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Masculine => "han",
            Self::Feminine => "hon",
            Self::Neutral => "hen",
        }
    }

    /// Possessive: "hans", "hennes". Neutral has no substituted form.
    pub fn possessive(&self) -> Option<&'static str> {
        match self {
            Self::Masculine => Some("hans"),
            Self::Feminine => Some("hennes"),
            Self::Neutral => None,
        }
    }

    /// Object pronoun: "honom", "henne". Neutral has no substituted form.
    pub fn object(&self) -> Option<&'static str> {
        match self {
            Self::Masculine => Some("honom"),
            Self::Feminine => Some("henne"),
            Self::Neutral => None,
        }
    }

    /// Child noun: "pojke", "flicka". Neutral has no substituted form.
    pub fn noun(&self) -> Option<&'static str> {
        match self {
            Self::Masculine => Some("pojke"),
            Self::Feminine => Some("flicka"),
            Self::Neutral => None,
        }
    }
}

impl From<String> for Gender {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.tag().to_string()
    }
}

/// One named, gendered actor inserted into a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
}

impl Participant {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
        }
    }

    /// Stand-in for the first participant when none were supplied.
    pub fn fallback() -> Self {
        Self::new("Kim", Gender::Feminine)
    }

    /// The name as entered, or `None` when it is empty or whitespace only.
    pub fn display_name(&self) -> Option<&str> {
        if self.name.trim().is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

/// Pair up parallel name and gender-tag lists, as collected by the
/// reader's name form. Missing genders are neutral.
pub fn participants_from_lists<N, G>(names: &[N], genders: &[G]) -> Vec<Participant>
where
    N: AsRef<str>,
    G: AsRef<str>,
{
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let gender = genders
                .get(i)
                .map(|g| Gender::from_tag(g.as_ref()))
                .unwrap_or(Gender::Neutral);
            Participant::new(name.as_ref(), gender)
        })
        .collect()
}
