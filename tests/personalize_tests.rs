/// Personalization integration tests: the engine's public contract.

use story_personalizer::schema::participant::participants_from_lists;
use story_personalizer::{personalize, Gender, Participant};

fn two_friends() -> Vec<Participant> {
    vec![
        Participant::new("Ali", Gender::Masculine),
        Participant::new("Noor", Gender::Feminine),
    ]
}

#[test]
fn placeholder_free_text_is_returned_unchanged() {
    let texts = [
        "",
        "Det var en gång en groda.",
        "Rad ett.\n\nRad två.\n",
        "Klammer } utan början och {utan slut",
        "Okänt {ord} stannar.",
    ];
    let casts = [vec![], two_friends(), vec![Participant::new("Sam", Gender::Neutral)]];
    for text in texts {
        for cast in &casts {
            assert_eq!(personalize(text, cast), text);
        }
    }
}

#[test]
fn legacy_single_participant() {
    let cast = [Participant::new("Alice", Gender::Feminine)];
    assert_eq!(personalize("{namn} sprang hem.", &cast), "Alice sprang hem.");
}

#[test]
fn indexed_multi_participant() {
    assert_eq!(
        personalize(
            "{person1} och {person2} lekte. {han/hon2} skrattade.",
            &two_friends()
        ),
        "Ali och Noor lekte. hon skrattade."
    );
}

#[test]
fn genitive_with_empty_name_has_no_dangling_suffix() {
    let cast = [Participant::new("", Gender::Masculine)];
    assert_eq!(personalize("{person1s}", &cast), "");
}

#[test]
fn unknown_gender_falls_back_to_hen() {
    let cast = participants_from_lists(&["Sam"], &["enhörning"]);
    assert_eq!(cast[0].gender, Gender::Neutral);
    assert_eq!(personalize("{han/hon1} sov.", &cast), "hen sov.");
}

#[test]
fn out_of_range_index_left_literal() {
    assert_eq!(personalize("{person3}", &two_friends()), "{person3}");
}

#[test]
fn case_insensitive_tokens() {
    let cast = [Participant::new("Alice", Gender::Feminine)];
    assert_eq!(personalize("{NAMN}", &cast), personalize("{namn}", &cast));
    assert_eq!(personalize("{NAMN}", &cast), "Alice");
    assert_eq!(personalize("{Hans/Hennes}", &cast), "hennes");
}

#[test]
fn gender_synonyms_are_equivalent() {
    let text = "{pronomen} {hans/hennes} {honom/henne} {pojke/flicka} {han/hon1}";
    let pojke = participants_from_lists(&["Ali"], &["pojke"]);
    let man = participants_from_lists(&["Ali"], &["man"]);
    assert_eq!(personalize(text, &pojke), personalize(text, &man));
    assert_eq!(personalize(text, &man), "han hans honom pojke han");

    let flicka = participants_from_lists(&["Noor"], &["flicka"]);
    let kvinna = participants_from_lists(&["Noor"], &["kvinna"]);
    assert_eq!(personalize(text, &flicka), personalize(text, &kvinna));
}

#[test]
fn three_participants_with_independent_genders() {
    let cast = participants_from_lists(&["Ali", "Noor", "Sam"], &["man", "kvinna", "hen"]);
    assert_eq!(
        personalize("{han/hon1}, {han/hon2}, {han/hon3}; {person3s} båt", &cast),
        "han, hon, hen; Sams båt"
    );
}

#[test]
fn legacy_and_indexed_share_first_participant() {
    assert_eq!(
        personalize("{namn}={person1}, {pronomen}={han/hon1}", &two_friends()),
        "Ali=Ali, han=han"
    );
}

#[test]
fn source_text_is_not_mutated() {
    let text = String::from("{namn} vinkade.");
    let out = personalize(&text, &two_friends());
    assert_eq!(text, "{namn} vinkade.");
    assert_eq!(out, "Ali vinkade.");
}

#[test]
fn engine_is_shareable_across_threads() {
    let cast = std::sync::Arc::new(two_friends());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cast = cast.clone();
            std::thread::spawn(move || personalize("{person2} log.", &cast))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Noor log.");
    }
}
