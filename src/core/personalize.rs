/// Personalization engine: participant-specific story text from a shared
/// template.

use std::borrow::Cow;

use crate::core::placeholder::Template;
use crate::schema::participant::Participant;

/// The ordered participant list a story is rendered against.
///
/// An empty list stands in for a single fallback participant so legacy
/// content never renders with holes.
#[derive(Debug, Clone)]
pub struct Cast<'a> {
    participants: Cow<'a, [Participant]>,
}

impl<'a> Cast<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        if participants.is_empty() {
            Self {
                participants: Cow::Owned(vec![Participant::fallback()]),
            }
        } else {
            Self {
                participants: Cow::Borrowed(participants),
            }
        }
    }

    /// Participant at zero-based `position`.
    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.participants.get(position)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false: an empty input list becomes the fallback cast.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Render `text` for this cast.
    pub fn personalize(&self, text: &str) -> String {
        if !text.contains('{') {
            return text.to_string();
        }
        Template::parse(text).render(self)
    }
}

/// Replace every recognized placeholder in `text` with values derived
/// from `participants`. Unknown and out-of-range tokens pass through
/// unchanged.
pub fn personalize(text: &str, participants: &[Participant]) -> String {
    Cast::new(participants).personalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::participant::Gender;

    fn ali_and_noor() -> Vec<Participant> {
        vec![
            Participant::new("Ali", Gender::Masculine),
            Participant::new("Noor", Gender::Feminine),
        ]
    }

    #[test]
    fn plain_text_unchanged() {
        let text = "Solen gick ner.\n\nAlla sov.";
        assert_eq!(personalize(text, &ali_and_noor()), text);
        assert_eq!(personalize(text, &[]), text);
        assert_eq!(personalize("", &ali_and_noor()), "");
    }

    #[test]
    fn legacy_name() {
        let cast = [Participant::new("Alice", Gender::Feminine)];
        assert_eq!(personalize("{namn} sprang hem.", &cast), "Alice sprang hem.");
    }

    #[test]
    fn indexed_names_and_pronouns() {
        assert_eq!(
            personalize(
                "{person1} och {person2} lekte. {han/hon2} skrattade.",
                &ali_and_noor()
            ),
            "Ali och Noor lekte. hon skrattade."
        );
    }

    #[test]
    fn legacy_forms_follow_first_participant() {
        let text = "{pronomen} tog {hans/hennes} mössa och gav den till {honom/henne}. En modig {pojke/flicka}.";
        assert_eq!(
            personalize(text, &ali_and_noor()),
            "han tog hans mössa och gav den till honom. En modig pojke."
        );
        let noor_first = [Participant::new("Noor", Gender::Feminine)];
        assert_eq!(
            personalize(text, &noor_first),
            "hon tog hennes mössa och gav den till henne. En modig flicka."
        );
    }

    #[test]
    fn indexed_grammatical_forms() {
        let text = "{hans/hennes2} bok, {honom/henne1}, {pojke/flicka2}, tvättade {sig själv1}";
        assert_eq!(
            personalize(text, &ali_and_noor()),
            "hennes bok, honom, flicka, tvättade sig själv"
        );
    }

    #[test]
    fn genitive_name() {
        assert_eq!(personalize("{person2s} hatt", &ali_and_noor()), "Noors hatt");
    }

    #[test]
    fn genitive_of_blank_name_is_empty() {
        let cast = [Participant::new("", Gender::Feminine)];
        assert_eq!(personalize("{person1s}", &cast), "");
        assert_eq!(personalize("{person1}", &cast), "");
        assert_eq!(personalize("{namn}", &cast), "");
    }

    #[test]
    fn unknown_gender_tag_uses_hen() {
        let cast = [Participant::new("Sam", Gender::from_tag("drake"))];
        assert_eq!(personalize("{han/hon1} och {pronomen}", &cast), "hen och hen");
    }

    #[test]
    fn neutral_forms_without_vocabulary_stay_literal() {
        let cast = [Participant::new("Sam", Gender::Neutral)];
        assert_eq!(
            personalize("{hans/hennes} {honom/henne1} {pojke/flicka}", &cast),
            "{hans/hennes} {honom/henne1} {pojke/flicka}"
        );
    }

    #[test]
    fn out_of_range_index_left_literal() {
        assert_eq!(personalize("{person3}", &ali_and_noor()), "{person3}");
        assert_eq!(personalize("{han/hon5} sov", &ali_and_noor()), "{han/hon5} sov");
    }

    #[test]
    fn case_insensitive_with_canonical_output() {
        let cast = [Participant::new("Alice", Gender::Feminine)];
        assert_eq!(personalize("{NAMN}/{namn}/{Namn}", &cast), "Alice/Alice/Alice");
        assert_eq!(personalize("{HAN/HON1}", &cast), "hon");
        assert_eq!(personalize("{SIG SJÄLV1}", &cast), "sig själv");
    }

    #[test]
    fn gender_synonyms_render_identically() {
        let text = "{pronomen} {hans/hennes} {honom/henne1} {pojke/flicka1}";
        let a = [Participant::new("Ali", Gender::from_tag("pojke"))];
        let b = [Participant::new("Ali", Gender::from_tag("man"))];
        assert_eq!(personalize(text, &a), personalize(text, &b));
    }

    #[test]
    fn empty_cast_falls_back_to_kim() {
        assert_eq!(
            personalize("{namn} tog {hans/hennes} väska. {person1} log.", &[]),
            "Kim tog hennes väska. Kim log."
        );
        assert_eq!(personalize("{person2}", &[]), "{person2}");
    }

    #[test]
    fn substituted_names_are_not_rescanned() {
        let cast = [Participant::new("{person1}", Gender::Masculine)];
        assert_eq!(personalize("{namn} och {person1}", &cast), "{person1} och {person1}");
    }

    #[test]
    fn unknown_tokens_do_not_stop_processing() {
        let cast = [Participant::new("Alice", Gender::Feminine)];
        assert_eq!(
            personalize("{naamn} {namn} {} {namn", &cast),
            "{naamn} Alice {} {namn"
        );
    }

    #[test]
    fn names_are_inserted_as_given() {
        let cast = [Participant::new(" Ali ", Gender::Masculine)];
        assert_eq!(personalize("[{person1}]", &cast), "[ Ali ]");
        assert_eq!(personalize("[{namn}]", &cast), "[ Ali ]");
        assert_eq!(personalize("[{person1s}]", &cast), "[ Ali s]");
    }

    #[test]
    fn whitespace_only_name_is_blank() {
        let cast = [Participant::new("   ", Gender::Feminine)];
        assert_eq!(personalize("[{person1}][{person1s}]", &cast), "[][]");
    }

    #[test]
    fn whitespace_outside_tokens_preserved() {
        let cast = [Participant::new("Alice", Gender::Feminine)];
        assert_eq!(
            personalize("  {namn}\t\n\n  {namn}  ", &cast),
            "  Alice\t\n\n  Alice  "
        );
    }

    #[test]
    fn deterministic() {
        let text = "{person1} och {person2s} katt. {han/hon1} log.";
        let first = personalize(text, &ali_and_noor());
        for _ in 0..5 {
            assert_eq!(personalize(text, &ali_and_noor()), first);
        }
    }

    #[test]
    fn cast_is_never_empty() {
        let cast = Cast::new(&[]);
        assert_eq!(cast.len(), 1);
        assert!(!cast.is_empty());
        assert_eq!(cast.get(0), Some(&Participant::fallback()));
    }
}
