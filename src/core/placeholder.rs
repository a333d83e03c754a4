/// Placeholder grammar: tokenizing story text and classifying `{...}` spans.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::personalize::Cast;
use crate::schema::participant::Participant;

/// What a placeholder resolves to for a given participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// `{namn}`, `{personN}`
    Name,
    /// `{personNs}`
    NamePossessive,
    /// `{pronomen}`, `{han/honN}`
    Subject,
    /// `{hans/hennes}`, `{hans/hennesN}`
    Possessive,
    /// `{honom/henne}`, `{honom/henneN}`
    Object,
    /// `{pojke/flicka}`, `{pojke/flickaN}`
    Noun,
    /// `{sig självN}`
    Reflexive,
}

impl Slot {
    /// Replacement text for `participant`, or `None` when this slot has
    /// no form for the participant's gender.
    pub fn resolve<'p>(&self, participant: &'p Participant) -> Option<Cow<'p, str>> {
        match self {
            Self::Name => Some(Cow::Borrowed(participant.display_name().unwrap_or(""))),
            Self::NamePossessive => Some(match participant.display_name() {
                Some(name) => Cow::Owned(format!("{name}s")),
                None => Cow::Borrowed(""),
            }),
            Self::Subject => Some(Cow::Borrowed(participant.gender.subject())),
            Self::Possessive => participant.gender.possessive().map(Cow::Borrowed),
            Self::Object => participant.gender.object().map(Cow::Borrowed),
            Self::Noun => participant.gender.noun().map(Cow::Borrowed),
            Self::Reflexive => Some(Cow::Borrowed("sig själv")),
        }
    }
}

/// A recognized (or unrecognized) placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    /// Un-indexed token referring to the first participant.
    Legacy(Slot),
    /// Token carrying a 1-based participant number.
    Indexed { slot: Slot, index: usize },
    /// Brace-delimited text outside the grammar. Emitted verbatim.
    Unknown,
}

impl Placeholder {
    /// Classify the text between a pair of braces. Matching is
    /// case-insensitive.
    pub fn classify(content: &str) -> Placeholder {
        let lowered = content.to_lowercase();

        let legacy = match lowered.as_str() {
            "namn" => Some(Slot::Name),
            "pronomen" => Some(Slot::Subject),
            "hans/hennes" => Some(Slot::Possessive),
            "honom/henne" => Some(Slot::Object),
            "pojke/flicka" => Some(Slot::Noun),
            _ => None,
        };
        if let Some(slot) = legacy {
            return Placeholder::Legacy(slot);
        }

        match Self::classify_indexed(&lowered) {
            Some((slot, index)) => Placeholder::Indexed { slot, index },
            None => Placeholder::Unknown,
        }
    }

    fn classify_indexed(lowered: &str) -> Option<(Slot, usize)> {
        // `{person2s}`: trailing "s" after the index.
        let (body, genitive) = match lowered.strip_suffix('s') {
            Some(b) if b.ends_with(|c: char| c.is_ascii_digit()) => (b, true),
            _ => (lowered, false),
        };

        let stem_len = body.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (stem, digits) = body.split_at(stem_len);
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }
        let index: usize = digits.parse().ok()?;

        let slot = match (stem, genitive) {
            ("person", false) => Slot::Name,
            ("person", true) => Slot::NamePossessive,
            ("han/hon", false) => Slot::Subject,
            ("hans/hennes", false) => Slot::Possessive,
            ("honom/henne", false) => Slot::Object,
            ("pojke/flicka", false) => Slot::Noun,
            ("sig själv", false) => Slot::Reflexive,
            _ => return None,
        };
        Some((slot, index))
    }

    /// Zero-based position in the cast this placeholder reads from.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Legacy(_) => Some(0),
            Self::Indexed { index, .. } => index.checked_sub(1),
            Self::Unknown => None,
        }
    }

    /// Replacement text, or `None` if the token stays literal.
    pub fn resolve<'c>(&self, cast: &'c Cast<'_>) -> Option<Cow<'c, str>> {
        let slot = match self {
            Self::Legacy(slot) | Self::Indexed { slot, .. } => slot,
            Self::Unknown => return None,
        };
        let participant = cast.get(self.position()?)?;
        slot.resolve(participant)
    }
}

/// A segment of tokenized story text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// A `{...}` span. `raw` includes the braces and is emitted when the
    /// placeholder does not resolve.
    Token { raw: String, placeholder: Placeholder },
}

/// Tokenized story text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Split text into literals and brace-delimited tokens.
    ///
    /// Never fails:
    /// - `{` without a later `}` is literal text
    /// - `{a{b}` treats the first `{` as literal and tokenizes `{b}`
    /// - `{}` and other unknown spans become `Placeholder::Unknown`
    pub fn parse(input: &str) -> Template {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('}') else {
                break;
            };

            // A nearer `{` starts the real token; everything before it is literal.
            if let Some(inner) = after_open[..close].rfind('{') {
                literal_buf.push_str(&rest[..open + 1 + inner]);
                rest = &rest[open + 1 + inner..];
                continue;
            }

            literal_buf.push_str(&rest[..open]);
            if !literal_buf.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
            }

            let content = &after_open[..close];
            segments.push(Segment::Token {
                raw: rest[open..open + close + 2].to_string(),
                placeholder: Placeholder::classify(content),
            });
            rest = &after_open[close + 1..];
        }

        literal_buf.push_str(rest);
        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Template { segments }
    }

    /// Substitute every resolvable token. Unresolved tokens are emitted
    /// verbatim; replacement text is never rescanned.
    pub fn render(&self, cast: &Cast<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token { raw, placeholder } => match placeholder.resolve(cast) {
                    Some(text) => out.push_str(&text),
                    None => out.push_str(raw),
                },
            }
        }
        out
    }

    /// Tokens that stay literal for any cast of `participant_count`:
    /// unknown spans and indexes past the end of the cast.
    pub fn unresolved(&self, participant_count: usize) -> Vec<&Segment> {
        let count = participant_count.max(1);
        self.segments
            .iter()
            .filter(|segment| match segment {
                Segment::Literal(_) => false,
                Segment::Token { placeholder, .. } => match placeholder.position() {
                    Some(pos) => pos >= count,
                    None => true,
                },
            })
            .collect()
    }

    /// Returns true if the text contains no `{...}` spans at all.
    pub fn is_plain(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }
}
