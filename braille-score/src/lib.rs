//! Transcription of musical notation elements into six-dot braille music.
//!
//! Elements (notes, chords, rests, clefs, signatures, expressions,
//! barlines) are transcribed one grouping at a time into a string of
//! Unicode braille cells, which can be re-encoded as Braille ASCII for
//! embossers.
//!
//! ```
//! use braille_score::{
//!     braille_render::{transcribe_note_grouping, ElementGrouping},
//!     cell::unicode_to_ascii,
//!     lookup::BrailleTables,
//!     primitives::{Chord, DurationType, MusicalElement, Note, Pitch},
//! };
//!
//! let p = |s: &str| s.parse::<Pitch>().unwrap();
//! let grouping = ElementGrouping::new([
//!     MusicalElement::note(Note::new(p("D#4"), DurationType::Quarter)),
//!     MusicalElement::Chord(Chord::new([p("G4"), p("B4"), p("D5"), p("G5")], DurationType::Whole)),
//! ]);
//! let braille = transcribe_note_grouping(BrailleTables::standard(), &grouping, true).braille;
//! assert_eq!(braille, "⠩⠐⠱⠨⠷⠼⠴⠤");
//! assert_eq!(unicode_to_ascii(&braille).unwrap(), "%\":.(#0-");
//! ```

pub mod braille_render;
pub mod cell;
pub mod lookup;
pub mod primitives;
