//! Transcription of an element grouping.
//!
//! The grouping encoder walks the elements in order, carrying the last
//! sounding pitch for the octave heuristic. A word (dynamic, text
//! expression) or a shown clef interrupts the music: the next pitch shows
//! its octave, and if the next symbol could be read as part of the word,
//! dot 3 separates them.

use serde::{Deserialize, Serialize};

use super::{
    chord_to_braille, clef_to_braille, dynamic_to_braille, note_to_braille,
    show_octave_with_note, text_expression_to_braille, BrailleResult, RenderSettings,
    RendersToBraille, Trace, Transcription,
};
use crate::{
    cell::BrailleCell,
    lookup::BrailleTables,
    primitives::{MusicalElement, Pitch},
};

/// Ordered elements of one braille segment and the settings to render them.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct ElementGrouping {
    pub elements: Vec<MusicalElement>,
    #[serde(default)]
    pub settings: RenderSettings,
}
impl ElementGrouping {
    pub fn new(elements: impl IntoIterator<Item = MusicalElement>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            settings: RenderSettings::default(),
        }
    }
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }
    pub fn push(&mut self, element: MusicalElement) -> &mut Self {
        self.elements.push(element);
        self
    }
}
impl FromIterator<MusicalElement> for ElementGrouping {
    fn from_iter<T: IntoIterator<Item = MusicalElement>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Braille of a grouping together with the transcription of every element.
///
/// `braille` is the concatenation of the elements' braille, a separating
/// dot 3 being attributed to the element it follows.
#[derive(Debug, PartialEq, Clone)]
pub struct GroupingTranscription {
    pub braille: String,
    pub elements: Vec<Transcription>,
}
impl GroupingTranscription {
    pub fn has_errors(&self) -> bool {
        self.elements.iter().any(|t| !t.is_ok())
    }
}

/// Transcribe every element of the grouping.
///
/// Never fails: an untranscribable element gives the placeholder, and
/// elements which do not belong to a note grouping (signatures, tempo) are
/// skipped with a warning.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{transcribe_note_grouping, ElementGrouping},
/// #     lookup::BrailleTables,
/// #     primitives::{DurationType, Dynamic, MusicalElement, Note},
/// # };
/// let note = |p: &str| MusicalElement::note(Note::new(p.parse().unwrap(), DurationType::Quarter));
/// let grouping = ElementGrouping::new([
///     note("C4"),
///     note("E4"),
///     MusicalElement::Dynamic(Dynamic::new("p")),
///     note("E5"),
/// ]);
/// let transcription = transcribe_note_grouping(BrailleTables::standard(), &grouping, true);
/// assert_eq!(transcription.braille, "⠐⠹⠫⠜⠏⠄⠨⠫");
/// ```
pub fn transcribe_note_grouping(
    tables: &BrailleTables,
    grouping: &ElementGrouping,
    show_leading_octave: bool,
) -> GroupingTranscription {
    let settings = &grouping.settings;
    let mut show_leading_octave = show_leading_octave;
    let mut previous_pitch: Option<Pitch> = None;
    let mut previous_element: Option<&MusicalElement> = None;
    let mut transcriptions: Vec<Transcription> = Vec::new();

    for element in grouping.elements.iter() {
        let mut trace = Trace::new();
        let result: Option<BrailleResult<String>> = match element {
            MusicalElement::Note(note, context) => {
                let show =
                    octave_shown(previous_pitch.as_ref(), show_leading_octave, &note.pitch);
                previous_pitch = Some(note.pitch.clone());
                Some(note_to_braille(
                    tables,
                    note,
                    context,
                    show,
                    settings.upper_first_in_note_fingering,
                    &mut trace,
                ))
            }
            MusicalElement::Chord(chord) => {
                let written = chord.written_pitch(settings.descending_chords);
                let show = written.map_or(show_leading_octave, |p| {
                    octave_shown(previous_pitch.as_ref(), show_leading_octave, p)
                });
                if let Some(pitch) = written {
                    previous_pitch = Some(pitch.clone());
                }
                Some(chord_to_braille(
                    tables,
                    chord,
                    settings.descending_chords,
                    show,
                    &mut trace,
                ))
            }
            MusicalElement::Rest(rest) => {
                Some(rest.render_braille(tables, settings, &mut trace))
            }
            MusicalElement::Barline(barline) => {
                Some(barline.render_braille(tables, settings, &mut trace))
            }
            MusicalElement::Dynamic(dynamic) => {
                previous_pitch = None;
                show_leading_octave = true;
                Some(dynamic_to_braille(tables, dynamic, true, &mut trace))
            }
            MusicalElement::TextExpression(text) => {
                previous_pitch = None;
                show_leading_octave = true;
                Some(text_expression_to_braille(tables, text, true, &mut trace))
            }
            MusicalElement::Clef(clef) => match settings.show_clef_signs {
                true => {
                    previous_pitch = None;
                    show_leading_octave = true;
                    Some(clef_to_braille(tables, clef, false, &mut trace))
                }
                false => None,
            },
            MusicalElement::KeySignature(_)
            | MusicalElement::TimeSignature(_)
            | MusicalElement::TempoText(_)
            | MusicalElement::MetronomeMark(_) => {
                log::warn!("{element} not transcribed to braille");
                trace.push(format!("{element} not transcribed"), "");
                None
            }
        };
        let transcription = match result {
            Some(result) => Transcription::from_result(tables, element, result, trace),
            None => Transcription::new("", trace),
        };

        if let (Some(previous), Some(first)) =
            (previous_element, transcription.braille.chars().next())
        {
            if needs_separation(previous, element, settings) && is_ambiguous(first) {
                if let Some(last) = transcriptions.last_mut() {
                    log::debug!("dot 3 between {previous} and {element}");
                    let dot = &tables.symbols.dot;
                    last.braille.push_str(dot);
                    last.trace.push("Dot 3", dot.as_str());
                }
            }
        }
        transcriptions.push(transcription);
        previous_element = Some(element);
    }

    GroupingTranscription {
        braille: transcriptions.iter().map(|t| t.braille.as_str()).collect(),
        elements: transcriptions,
    }
}

fn octave_shown(previous: Option<&Pitch>, show_leading_octave: bool, pitch: &Pitch) -> bool {
    let show = match previous {
        None => show_leading_octave,
        Some(_) => show_octave_with_note(previous, pitch),
    };
    log::debug!("{pitch}: show octave: {show}");
    show
}

/// Whether the previous element ends in a word which the current one could
/// be mistaken for a part of.
fn needs_separation(
    previous: &MusicalElement,
    current: &MusicalElement,
    settings: &RenderSettings,
) -> bool {
    let current_is_word = matches!(
        current,
        MusicalElement::Dynamic(_) | MusicalElement::TextExpression(_)
    );
    match previous {
        MusicalElement::Clef(_) => settings.show_clef_signs,
        MusicalElement::Dynamic(_) => !current_is_word,
        // abbreviations already end with dot 3
        MusicalElement::TextExpression(text) => {
            !text.ends_with_period() && !current_is_word
        }
        _ => false,
    }
}

/// A cell with dot 4 directly after a word reads as a letter.
fn is_ambiguous(cell: char) -> bool {
    BrailleCell::from_unicode(cell).map_or(false, |cell| cell.dot_rows().0.right)
}
