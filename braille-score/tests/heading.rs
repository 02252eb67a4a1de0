use braille_score::{
    braille_render::{BrailleError, Heading, RenderSettings, Trace},
    lookup::BrailleTables,
    primitives::{DurationType, KeySignature, MetronomeMark, TempoText, TimeSignature},
};

fn transcribe(heading: &Heading, settings: &RenderSettings) -> Result<String, BrailleError> {
    let _ = env_logger::builder().is_test(true).try_init();
    heading.transcribe(BrailleTables::standard(), settings, &mut Trace::new())
}

fn blank(cells: usize) -> String {
    "⠀".repeat(cells)
}

#[test]
fn long_heading_is_split() {
    let heading = Heading::default()
        .with_key_signature(KeySignature::new(-3))
        .with_time_signature(TimeSignature::new(4, 4))
        .with_tempo_text(TempoText::new("Andante con moto tranquillo"))
        .with_metronome_mark(MetronomeMark::new(72, DurationType::Quarter));
    let braille = transcribe(&heading, &RenderSettings::default()).unwrap();
    let lines: Vec<&str> = braille.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("{}⠠⠁⠝⠙⠁⠝⠞⠑⠀⠉⠕⠝⠀⠍⠕⠞⠕⠀⠞⠗⠁⠝⠟⠥⠊⠇⠇⠕⠲{}", blank(5), blank(6)),
            format!("{}⠹⠶⠼⠛⠃⠀⠣⠣⠣⠼⠙⠲{}", blank(14), blank(14)),
        ]
    );
}

#[test]
fn line_length_from_settings() {
    let heading = Heading::default().with_time_signature(TimeSignature::cut());
    let settings: RenderSettings =
        serde_json::from_str(r#"{"max_line_length": 10}"#).expect("valid settings");
    assert_eq!(
        transcribe(&heading, &settings).unwrap(),
        format!("{}⠸⠉{}", blank(4), blank(4))
    );
}

#[test]
fn failed_part_gives_placeholder() {
    let heading = Heading::default()
        .with_time_signature(TimeSignature::new(2, 4))
        .with_tempo_text(TempoText::new("Tempo 1"));
    assert_eq!(
        transcribe(&heading, &RenderSettings::default()).unwrap(),
        format!("{}⠜⠦⠀⠼⠃⠲{}", blank(17), blank(17))
    );
}

#[test]
fn nothing_to_show() {
    let settings = RenderSettings::default();
    assert_eq!(
        transcribe(&Heading::default(), &settings),
        Err(BrailleError::EmptyHeading)
    );
    let c_major = Heading::default().with_key_signature(KeySignature::new(0));
    assert_eq!(transcribe(&c_major, &settings), Err(BrailleError::EmptyHeading));
}
