//! Transcription of musical elements into braille music.
//!
//! Encoders are plain functions over the injected [`BrailleTables`]. Each
//! of them returns a [`BrailleResult`] and records its decisions in a
//! [`Trace`]. [`transcribe_element`] and the grouping encoder turn any
//! error into the "untranscribable" placeholder, so a failed element never
//! breaks the braille around it.

use std::fmt;

use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::{lookup::BrailleTables, primitives::MusicalElement};

pub mod expressions;
pub mod grouping;
pub mod heading;
pub mod note;
pub mod octave;
pub mod signatures;
pub mod words;

pub use expressions::{
    barline_to_braille, dynamic_to_braille, metronome_mark_to_braille,
    tempo_text_to_braille, text_expression_to_braille,
};
pub use grouping::{transcribe_note_grouping, ElementGrouping, GroupingTranscription};
pub use heading::Heading;
pub use note::{chord_to_braille, note_to_braille, rest_to_braille};
pub use octave::show_octave_with_note;
pub use signatures::{
    clef_to_braille, key_signature_to_braille, time_signature_to_braille,
    transcribe_signatures,
};
pub use words::{
    fingering_to_braille, instrument_to_braille, number_to_braille, word_to_braille,
};

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum BrailleError {
    #[error("Character `{character}` in `{word}` can not be transcribed to braille")]
    UnsupportedCharacter { character: char, word: String },
    #[error("Can not be transcribed to braille: {0}")]
    UnsupportedSymbol(String),
    #[error("Invalid fingering: `{0}`")]
    InvalidFingering(String),
    #[error("No heading can be made")]
    EmptyHeading,
    #[error("`{0}` is not a braille cell")]
    UnknownSymbol(char),
}
pub type BrailleResult<T> = Result<T, BrailleError>;

/// One decision made while transcribing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TraceEntry {
    pub description: String,
    pub symbols: String,
}

/// Human-readable explanation of a transcription, in emission order.
///
/// The trace never influences the braille: it is returned next to it.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}
impl Trace {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, description: impl Into<String>, symbols: impl Into<String>) {
        self.entries.push(TraceEntry {
            description: description.into(),
            symbols: symbols.into(),
        });
    }
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Append entries of other trace, e.g. of a placeholder note.
    pub fn extend(&mut self, other: Trace) {
        self.entries.extend(other.entries);
    }
}
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            match entry.symbols.is_empty() {
                true => write!(f, "{}", entry.description)?,
                false => write!(f, "{} {}", entry.description, entry.symbols)?,
            }
        }
        Ok(())
    }
}

/// Braille of one element with its explanation.
///
/// When the element could not be transcribed, `braille` holds the
/// placeholder and `error` holds the reason.
#[derive(Debug, PartialEq, Clone)]
pub struct Transcription {
    pub braille: String,
    pub trace: Trace,
    pub error: Option<BrailleError>,
}
impl Transcription {
    pub fn new(braille: impl Into<String>, trace: Trace) -> Self {
        Self {
            braille: braille.into(),
            trace,
            error: None,
        }
    }

    /// Wrap the encoder result, degrading an error to the placeholder.
    pub fn from_result(
        tables: &BrailleTables,
        subject: impl fmt::Display,
        result: BrailleResult<String>,
        mut trace: Trace,
    ) -> Self {
        match result {
            Ok(braille) => Self::new(braille, trace),
            Err(error) => {
                log::warn!("{subject}: {error}");
                let placeholder = tables.symbols.basic_exception.clone();
                trace.push(format!("{subject} None"), placeholder.as_str());
                Self {
                    braille: placeholder,
                    trace,
                    error: Some(error),
                }
            }
        }
    }
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Options of one transcription pass.
///
/// Missing fields of a deserialized settings object take their defaults.
///
/// # Example
/// ```
/// # use braille_score::braille_render::RenderSettings;
/// let settings = RenderSettings::default();
/// assert!(settings.descending_chords);
/// assert!(!settings.show_clef_signs);
/// assert!(settings.upper_first_in_note_fingering);
/// assert_eq!(settings.max_line_length, 40);
/// ```
#[derive(Debug, Derivative, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct RenderSettings {
    #[derivative(Default(value = "true"))]
    pub descending_chords: bool,
    pub show_clef_signs: bool,
    #[derivative(Default(value = "true"))]
    pub upper_first_in_note_fingering: bool,
    #[derivative(Default(value = "40"))]
    pub max_line_length: usize,
}
impl RenderSettings {
    pub fn new(
        descending_chords: bool,
        show_clef_signs: bool,
        upper_first_in_note_fingering: bool,
    ) -> Self {
        Self {
            descending_chords,
            show_clef_signs,
            upper_first_in_note_fingering,
            ..Default::default()
        }
    }
}

/// Element kinds which can be transcribed standalone.
///
/// Notes and chords show their octave, clefs take the usual suffix, key
/// signatures are given without cancellation and dynamics and text
/// expressions are preceded by the word sign.
pub trait RendersToBraille {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String>;
}

impl RendersToBraille for MusicalElement {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        match self {
            Self::Note(note, context) => note_to_braille(
                tables,
                note,
                context,
                true,
                settings.upper_first_in_note_fingering,
                trace,
            ),
            Self::Rest(rest) => rest.render_braille(tables, settings, trace),
            Self::Chord(chord) => chord.render_braille(tables, settings, trace),
            Self::Clef(clef) => clef.render_braille(tables, settings, trace),
            Self::KeySignature(ks) => ks.render_braille(tables, settings, trace),
            Self::TimeSignature(ts) => ts.render_braille(tables, settings, trace),
            Self::Dynamic(dynamic) => dynamic.render_braille(tables, settings, trace),
            Self::TextExpression(text) => text.render_braille(tables, settings, trace),
            Self::TempoText(text) => text.render_braille(tables, settings, trace),
            Self::MetronomeMark(mark) => mark.render_braille(tables, settings, trace),
            Self::Barline(barline) => barline.render_braille(tables, settings, trace),
        }
    }
}

/// Transcribe a standalone element.
///
/// Never fails: an untranscribable element gives the placeholder.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{transcribe_element, RenderSettings},
/// #     lookup::BrailleTables,
/// #     primitives::{DurationType, MusicalElement, Note, Rest},
/// # };
/// let tables = BrailleTables::standard();
/// let settings = RenderSettings::default();
/// let note = MusicalElement::note(Note::new("C4".parse().unwrap(), DurationType::Quarter));
/// assert_eq!(transcribe_element(tables, &note, &settings).braille, "⠐⠹");
/// let rest = MusicalElement::Rest(Rest::new(DurationType::Longa));
/// let transcription = transcribe_element(tables, &rest, &settings);
/// assert_eq!(transcription.braille, "⠜⠦");
/// assert!(transcription.error.is_some());
/// ```
pub fn transcribe_element(
    tables: &BrailleTables,
    element: &MusicalElement,
    settings: &RenderSettings,
) -> Transcription {
    let mut trace = Trace::new();
    let result = element.render_braille(tables, settings, &mut trace);
    Transcription::from_result(tables, element, result, trace)
}

#[cfg(test)]
mod tests {
    use super::{transcribe_element, RenderSettings, RendersToBraille, Trace};
    use crate::{
        lookup::BrailleTables,
        primitives::{
            Barline, BarlineStyle, Clef, DurationType, KeySignature, MetronomeMark,
            MusicalElement, Rest, TimeSignature,
        },
    };

    #[test]
    fn standalone_elements() {
        let tables = BrailleTables::standard();
        let settings = RenderSettings::default();
        let cases = [
            (MusicalElement::Clef(Clef::treble()), "⠜⠌⠇"),
            (MusicalElement::KeySignature(KeySignature::new(4)), "⠼⠙⠩"),
            (MusicalElement::TimeSignature(TimeSignature::new(12, 8)), "⠼⠁⠃⠦"),
            (MusicalElement::Barline(Barline::new(BarlineStyle::Final)), "⠣⠅"),
        ];
        for (element, expected) in cases {
            let transcription = transcribe_element(tables, &element, &settings);
            assert_eq!(transcription.braille, expected, "{element}");
            assert!(transcription.is_ok());
        }
    }

    #[test]
    fn element_kinds_render_on_their_own() {
        let tables = BrailleTables::standard();
        let settings = RenderSettings::default();
        let mut trace = Trace::new();
        let rest = Rest::new(DurationType::Half);
        assert_eq!(rest.render_braille(tables, &settings, &mut trace).unwrap(), "⠥");
        let mark = MetronomeMark::new(60, DurationType::Quarter);
        assert_eq!(
            mark.render_braille(tables, &settings, &mut trace).unwrap(),
            "⠹⠶⠼⠋⠚"
        );
        let element = MusicalElement::TimeSignature(TimeSignature::cut());
        assert_eq!(
            element.render_braille(tables, &settings, &mut trace).unwrap(),
            TimeSignature::cut().render_braille(tables, &settings, &mut trace).unwrap()
        );
    }

    #[test]
    fn failure_keeps_error_and_trace() {
        let tables = BrailleTables::standard();
        let element = MusicalElement::Barline(Barline::new(BarlineStyle::Tick));
        let transcription =
            transcribe_element(tables, &element, &RenderSettings::default());
        assert_eq!(transcription.braille, tables.symbols.basic_exception);
        assert!(!transcription.is_ok());
        assert_eq!(
            transcription.trace.to_string(),
            "Barline tick None ⠜⠦"
        );
    }

    #[test]
    fn trace_display() {
        let mut trace = Trace::new();
        assert!(trace.is_empty());
        trace.push("Octave 4", "⠐");
        trace.push("C quarter", "⠹");
        assert_eq!(trace.to_string(), "Octave 4 ⠐\nC quarter ⠹");
        assert_eq!(trace.entries().len(), 2);
    }
}
