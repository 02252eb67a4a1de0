//! Elements, from which braille is transcribed.
//!
//! These types are the boundary to the host notation model: they carry only
//! what the encoders read (step, octave and accidental of pitches, duration
//! categories, signature numbers, texts). Measures and lines are assumed to
//! be split already; a caller hands over one ordered grouping at a time.

pub mod duration;
pub mod element;
pub mod pitch;

pub use duration::{Duration, DurationType, Tuplet};
pub use element::{
    Articulation, Barline, BarlineStyle, Chord, Clef, ClefSign, Dynamic,
    KeySignature, MetronomeMark, MusicalElement, Note, NoteContext, Rest,
    TempoText, TextExpression, Tie, TimeSignature, TimeSymbol,
};
pub use pitch::{Accidental, Pitch, Step};
