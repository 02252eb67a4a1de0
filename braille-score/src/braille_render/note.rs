//! Notes, rests and chords.
//!
//! A note is brailled as
//! `[slurs] [triplet] [articulations] [accidental] [octave] name [dots]
//! [fingering] [slurs] [tie]`, where only the name with its duration
//! category is obligatory. Chords braille one note and express the other
//! pitches as intervals from it.

use itertools::Itertools;

use super::{
    fingering_to_braille, BrailleError, BrailleResult, RenderSettings, RendersToBraille,
    Trace,
};
use crate::{
    lookup::BrailleTables,
    primitives::{Chord, DurationType, Note, NoteContext, Pitch, Rest},
};

fn push(trans: &mut String, trace: &mut Trace, description: String, glyph: &str) {
    trans.push_str(glyph);
    trace.push(description, glyph);
}

/// Braille of a single note.
///
/// Only a missing name or duration glyph fails the note. Missing
/// articulations, accidentals, octaves and fingerings are skipped with a
/// warning.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{note_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::{Duration, DurationType, Note, NoteContext},
/// # };
/// let tables = BrailleTables::standard();
/// let note = Note::new("A2".parse().unwrap(), Duration::new(DurationType::Half, 1));
/// let mut trace = Trace::new();
/// let braille =
///     note_to_braille(tables, &note, &NoteContext::default(), true, true, &mut trace);
/// assert_eq!(braille.unwrap(), "⠘⠎⠄");
/// ```
pub fn note_to_braille(
    tables: &BrailleTables,
    note: &Note,
    context: &NoteContext,
    show_octave: bool,
    upper_first_in_fingering: bool,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let symbols = &tables.symbols;
    let pitch = &note.pitch;
    let mut trans = String::new();

    if context.begin_long_bracket_slur {
        push(
            &mut trans,
            trace,
            "Opening bracket slur".into(),
            &symbols.opening_bracket_slur,
        );
    } else if context.begin_long_double_slur {
        push(
            &mut trans,
            trace,
            "Opening double slur".into(),
            &symbols.opening_double_slur,
        );
    }
    let bracket_slur_restarts =
        context.begin_long_bracket_slur && context.end_long_bracket_slur;
    if bracket_slur_restarts {
        push(
            &mut trans,
            trace,
            "Closing bracket slur".into(),
            &symbols.closing_bracket_slur,
        );
    }

    let mut beam_continue = context.beam_continue;
    if note.duration.is_triplet() {
        if context.beam_start {
            push(&mut trans, trace, "Triplet".into(), &symbols.triplet);
        } else if beam_continue {
            // the triplet keeps its own duration glyph
            beam_continue = false;
        }
    }

    // staccato and staccatissimo come before other signs of execution
    let (staccatos, others): (Vec<_>, Vec<_>) = note
        .articulations
        .iter()
        .partition(|artc| artc.is_staccato_like());
    let others = others.into_iter().sorted_by(|a, b| a.name().cmp(b.name()));
    for artc in staccatos.into_iter().chain(others) {
        match tables.before_note_expr.get(artc.name()) {
            Some(glyph) => push(
                &mut trans,
                trace,
                format!("Articulation {}", artc.name()),
                glyph,
            ),
            None => log::warn!(
                "Articulation {} of note {pitch} can not be transcribed to braille",
                artc.name()
            ),
        }
    }

    if let Some(accidental) = pitch.accidental {
        if pitch.accidental_display != Some(false) {
            match tables.accidentals.get(&accidental) {
                Some(glyph) => push(
                    &mut trans,
                    trace,
                    format!("Accidental {accidental}"),
                    glyph,
                ),
                None => log::warn!(
                    "Accidental {accidental} of note {pitch} can not be \
                    transcribed to braille"
                ),
            }
        }
    }

    if show_octave {
        match tables.octaves.get(&pitch.octave) {
            Some(glyph) => {
                push(&mut trans, trace, format!("Octave {}", pitch.octave), glyph)
            }
            None => log::warn!(
                "Octave {} of note {pitch} can not be transcribed to braille",
                pitch.octave
            ),
        }
    }

    let notes_in_step = tables.pitch_name_to_notes.get(&pitch.step).ok_or_else(|| {
        trace.push(format!("Name {} None", pitch.step), "");
        BrailleError::UnsupportedSymbol(format!("name {} of note {pitch}", pitch.step))
    })?;
    let duration = &note.duration;
    let missing_duration = |kind: DurationType| {
        BrailleError::UnsupportedSymbol(format!("duration {kind} of note {pitch}"))
    };
    if duration.grace {
        let glyph = notes_in_step
            .get(&DurationType::Eighth)
            .ok_or_else(|| missing_duration(DurationType::Eighth))?;
        push(
            &mut trans,
            trace,
            format!("{} eighth Gracenote--not supported", pitch.step),
            glyph,
        );
    } else {
        let (kind, description) = match beam_continue {
            true => (DurationType::Eighth, format!("{} beam", pitch.step)),
            false => (duration.kind, format!("{} {}", pitch.step, duration.kind)),
        };
        let glyph = notes_in_step.get(&kind).ok_or_else(|| {
            trace.push(format!("Duration {} None", duration.kind), "");
            missing_duration(duration.kind)
        })?;
        push(&mut trans, trace, description, glyph);
        for _ in 0..duration.dots {
            push(&mut trans, trace, "Dot".into(), &symbols.dot);
        }
    }

    if let Some(fingering) = &note.fingering {
        match fingering_to_braille(tables, fingering, upper_first_in_fingering) {
            Ok(glyph) => push(&mut trans, trace, format!("Fingering {fingering}"), &glyph),
            Err(err) => log::warn!("Fingering of note {pitch}: {err}"),
        }
    }

    if context.short_slur {
        push(
            &mut trans,
            trace,
            "Opening single slur".into(),
            &symbols.opening_single_slur,
        );
    }
    if !bracket_slur_restarts {
        if context.end_long_double_slur {
            push(
                &mut trans,
                trace,
                "Closing double slur".into(),
                &symbols.closing_double_slur,
            );
        } else if context.end_long_bracket_slur {
            push(
                &mut trans,
                trace,
                "Closing bracket slur".into(),
                &symbols.closing_bracket_slur,
            );
        }
    }

    if note.continues_tie() {
        push(&mut trans, trace, "Tie".into(), &symbols.tie);
    }
    Ok(trans)
}

/// Braille of a rest: glyph of the duration category and its dots.
pub fn rest_to_braille(
    tables: &BrailleTables,
    rest: &Rest,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let kind = rest.duration.kind;
    let mut trans = tables
        .rests
        .get(&kind)
        .ok_or_else(|| BrailleError::UnsupportedSymbol(format!("rest of duration {kind}")))?
        .clone();
    trace.push(format!("Rest {kind}"), trans.as_str());
    for _ in 0..rest.duration.dots {
        push(&mut trans, trace, "Dot".into(), &tables.symbols.dot);
    }
    Ok(trans)
}

/// Braille of a chord.
///
/// The highest pitch (or the lowest, when not `descending`) is brailled as
/// a note with the chord duration, every other pitch as the generic
/// interval from it. Intervals beyond an octave are folded and take an
/// octave mark when the distance from the neighbouring pitch is an octave
/// or more.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{chord_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::{Chord, DurationType, Pitch},
/// # };
/// let tables = BrailleTables::standard();
/// let chord = Chord::new(
///     ["C4", "E5"].map(|p| p.parse::<Pitch>().unwrap()),
///     DurationType::Whole,
/// );
/// let braille = chord_to_braille(tables, &chord, true, true, &mut Trace::new());
/// assert_eq!(braille.unwrap(), "⠨⠯⠐⠬");
/// ```
pub fn chord_to_braille(
    tables: &BrailleTables,
    chord: &Chord,
    descending: bool,
    show_octave: bool,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let mut pitches: Vec<&Pitch> = chord.pitches.iter().collect();
    pitches.sort();
    let direction = match descending {
        true => {
            pitches.reverse();
            "Descending"
        }
        false => "Ascending",
    };
    let base = *pitches
        .first()
        .ok_or_else(|| BrailleError::UnsupportedSymbol("chord without pitches".into()))?;

    let base_note = Note::new(base.clone(), chord.duration.clone());
    let mut note_trace = Trace::new();
    let base_braille = note_to_braille(
        tables,
        &base_note,
        &NoteContext::default(),
        show_octave,
        true,
        &mut note_trace,
    );
    trace.push(format!("{direction} Chord:"), "");
    trace.extend(note_trace);
    let mut trans = base_braille?;

    for (idx, (previous, current)) in pitches.iter().tuple_windows().enumerate() {
        let mut distance = base.generic_interval(current);
        if distance > 8 {
            distance = distance % 8 + 1;
            if idx == 0 || previous.generic_interval(current) >= 8 {
                match tables.octaves.get(&current.octave) {
                    Some(glyph) => push(
                        &mut trans,
                        trace,
                        format!("Octave {}", current.octave),
                        glyph,
                    ),
                    None => log::warn!(
                        "Octave {} of chord pitch {current} can not be \
                        transcribed to braille",
                        current.octave
                    ),
                }
            }
        }
        let glyph = tables.intervals.get(&distance).ok_or_else(|| {
            BrailleError::UnsupportedSymbol(format!(
                "interval {distance} from {base} to {current}"
            ))
        })?;
        push(&mut trans, trace, format!("Interval {distance}"), glyph);
    }
    Ok(trans)
}

impl RendersToBraille for Rest {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        rest_to_braille(tables, self, trace)
    }
}

impl RendersToBraille for Chord {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        chord_to_braille(tables, self, settings.descending_chords, true, trace)
    }
}
