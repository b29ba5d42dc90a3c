use abcnote::{Duration, Key, Letter, NotationContext, Note, Pitch, PitchClass, Spelling};
use proptest::prelude::*;

const KEYS: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F#", "F", "Bb", "Eb", "Am", "Ddor",
];

fn context_strategy() -> impl Strategy<Value = NotationContext> {
    (
        prop::sample::select(KEYS.to_vec()),
        prop::sample::select(vec![1i64, 2, 4, 8, 16]),
        -1i32..=6,
    )
        .prop_map(|(key, unit, octave_base)| {
            let key: Key = key.parse().unwrap();
            NotationContext::new(key, Duration::new(1, unit))
                .unwrap()
                .with_octave_base(octave_base)
        })
}

fn pitch_strategy() -> impl Strategy<Value = Pitch> {
    (
        prop::sample::select(Letter::ALL.to_vec()),
        -1i8..=1,
        0i32..=9,
    )
        .prop_map(|(letter, alter, octave)| {
            Pitch::from_pitch_class(PitchClass::from_spelling(Spelling::new(letter, alter)), octave)
        })
}

fn note_strategy() -> impl Strategy<Value = Note> {
    (
        prop_oneof![pitch_strategy(), (0i32..120).prop_map(Pitch::new)],
        1i64..=16,
        prop::sample::select(vec![1i64, 2, 3, 4, 8, 16, 32]),
    )
        .prop_map(|(pitch, numer, denom)| {
            Note::new(pitch, Duration::new(numer, denom)).unwrap()
        })
}

proptest! {
    #[test]
    fn decode_reverses_encode(context in context_strategy(), note in note_strategy()) {
        let token = context.encode(&note).unwrap();
        let decoded = context.decode(&token).unwrap();
        prop_assert_eq!(decoded, note, "token {}", token);
    }

    #[test]
    fn encoding_is_stable(context in context_strategy(), note in note_strategy()) {
        let first = context.encode(&note).unwrap();
        let second = context.encode(&context.decode(&first).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn decoded_spelling_survives(context in context_strategy(), pitch in pitch_strategy()) {
        let note = Note::new(pitch, context.unit_duration()).unwrap();
        let decoded = context.decode(&context.encode(&note).unwrap()).unwrap();
        prop_assert_eq!(decoded.name(), note.name());
    }
}
