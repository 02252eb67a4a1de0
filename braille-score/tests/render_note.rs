use braille_score::{
    braille_render::{note_to_braille, transcribe_element, RenderSettings, Trace},
    lookup::BrailleTables,
    primitives::{
        Articulation, Duration, DurationType, MusicalElement, Note, NoteContext, Pitch,
        Rest, Tie, Tuplet,
    },
};
use fraction::Fraction;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn render(element: &MusicalElement) -> String {
    transcribe_element(BrailleTables::standard(), element, &RenderSettings::default())
        .braille
}

fn note(pitch: &str, duration: impl Into<Duration>) -> Note {
    Note::new(pitch.parse::<Pitch>().expect("valid pitch"), duration)
}

#[test]
fn test() {
    init();
    assert_eq!(render(&MusicalElement::note(note("C4", DurationType::Quarter))), "⠐⠹");
    assert_eq!(render(&MusicalElement::note(note("C4", DurationType::Half))), "⠐⠝");
    assert_eq!(render(&MusicalElement::note(note("D#4", DurationType::Quarter))), "⠩⠐⠱");
    assert_eq!(
        render(&MusicalElement::note(note("A2", Duration::new(DurationType::Half, 1)))),
        "⠘⠎⠄"
    );
    assert_eq!(
        render(&MusicalElement::note(note("B-3", DurationType::Whole))),
        "⠣⠸⠾"
    );
    assert_eq!(
        render(&MusicalElement::note(note("F##6", DurationType::Eighth))),
        "⠩⠩⠰⠛"
    );
}

#[test]
fn duration_from_quarter_length() {
    init();
    let dotted_eighth = Duration::from_quarter_length(Fraction::new(3u64, 4u64));
    assert_eq!(render(&MusicalElement::note(note("G4", dotted_eighth))), "⠐⠓⠄");
    let triplet_eighth = Duration::from_quarter_length(Fraction::new(1u64, 3u64));
    let context = NoteContext {
        beam_start: true,
        ..Default::default()
    };
    let element = MusicalElement::Note(note("G4", triplet_eighth), context);
    assert_eq!(render(&element), "⠆⠐⠓");
    let complex = Duration::from_quarter_length(Fraction::new(5u64, 4u64));
    let element = MusicalElement::note(note("G4", complex));
    assert_eq!(render(&element), BrailleTables::standard().symbols.basic_exception);
}

#[test]
fn context_from_json() {
    init();
    let context: NoteContext =
        serde_json::from_str(r#"{"short_slur": true}"#).expect("valid context");
    assert!(context.short_slur);
    assert!(!context.beam_start);
    let mut tied = note("E4", DurationType::Quarter)
        .with_articulation(Articulation::Tenuto)
        .with_articulation(Articulation::Staccatissimo)
        .with_fingering("1");
    tied.set_tie(Tie::Continue);
    let braille = render(&MusicalElement::Note(tied, context));
    // staccatissimo, tenuto, E, finger 1, slur, tie
    assert_eq!(braille, "⠠⠦⠸⠦⠐⠫⠁⠉⠈⠉");
}

#[test]
fn trace_follows_emission_order() {
    init();
    let n = note("D#4", Duration::new(DurationType::Quarter, 0).with_tuplet(Tuplet::triplet()))
        .with_articulation(Articulation::Staccato);
    let context = NoteContext {
        beam_start: true,
        ..Default::default()
    };
    let mut trace = Trace::new();
    let braille = note_to_braille(BrailleTables::standard(), &n, &context, true, true, &mut trace)
        .expect("transcribable");
    assert_eq!(braille, "⠆⠦⠩⠐⠱");
    let symbols: String = trace.entries().iter().map(|e| e.symbols.as_str()).collect();
    assert_eq!(symbols, braille);
    let descriptions: Vec<&str> =
        trace.entries().iter().map(|e| e.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "Triplet",
            "Articulation staccato",
            "Accidental sharp",
            "Octave 4",
            "D quarter"
        ]
    );
}

#[test]
fn rests() {
    init();
    let dotted = MusicalElement::Rest(Rest::new(Duration::new(DurationType::Quarter, 1)));
    assert_eq!(render(&dotted), "⠧⠄");
    assert_eq!(render(&MusicalElement::Rest(Rest::new(DurationType::Whole))), "⠍");
    assert_eq!(render(&MusicalElement::Rest(Rest::new(DurationType::Eighth))), "⠭");
    let complex = Rest::new(Duration::from_quarter_length(Fraction::new(5u64, 4u64)));
    let transcription = transcribe_element(
        BrailleTables::standard(),
        &MusicalElement::Rest(complex),
        &RenderSettings::default(),
    );
    assert_eq!(transcription.braille, "⠜⠦");
    assert!(transcription.error.is_some());
}
