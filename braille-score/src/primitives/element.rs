//! Musical elements handed to the braille encoders.
//!
//! Elements are plain read-only values. Everything that only matters while
//! a note is being encoded (slurs, beams) lives in [`NoteContext`], which is
//! supplied next to the note and never stored anywhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Duration, DurationType, Pitch};

/// One item of an element grouping.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum MusicalElement {
    Note(Note, NoteContext),
    Rest(Rest),
    Chord(Chord),
    Clef(Clef),
    KeySignature(KeySignature),
    TimeSignature(TimeSignature),
    Dynamic(Dynamic),
    TextExpression(TextExpression),
    TempoText(TempoText),
    MetronomeMark(MetronomeMark),
    Barline(Barline),
}
impl MusicalElement {
    /// Note without any slur or beam relations.
    pub fn note(note: Note) -> Self {
        Self::Note(note, NoteContext::default())
    }
}
impl fmt::Display for MusicalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note(note, _) => write!(f, "Note {}", note.pitch),
            Self::Rest(rest) => write!(f, "Rest {}", rest.duration.kind),
            Self::Chord(chord) => {
                let pitches: Vec<String> =
                    chord.pitches.iter().map(|p| p.to_string()).collect();
                write!(f, "Chord {}", pitches.join(" "))
            }
            Self::Clef(clef) => write!(f, "{clef}"),
            Self::KeySignature(ks) => write!(f, "Key Signature {}", ks.sharps),
            Self::TimeSignature(ts) => {
                write!(f, "Time Signature {}/{}", ts.numerator, ts.denominator)
            }
            Self::Dynamic(d) => write!(f, "Dynamic {}", d.value),
            Self::TextExpression(t) => write!(f, "Text Expression {}", t.content),
            Self::TempoText(t) => write!(f, "Tempo Text {}", t.text),
            Self::MetronomeMark(m) => write!(f, "Metronome Mark {}", m.number),
            Self::Barline(b) => write!(f, "Barline {}", b.style),
        }
    }
}

/// Slur and beam relations of one note, valid for one encoding call.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteContext {
    pub begin_long_bracket_slur: bool,
    pub end_long_bracket_slur: bool,
    pub begin_long_double_slur: bool,
    pub end_long_double_slur: bool,
    pub short_slur: bool,
    pub beam_start: bool,
    pub beam_continue: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Tie {
    Start,
    Continue,
    Stop,
}

/// Signs of execution printed before a note.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Articulation {
    Staccato,
    Staccatissimo,
    Accent,
    StrongAccent,
    Tenuto,
    DetachedLegato,
    Spiccato,
    DownBow,
    UpBow,
    Harmonic,
    Stopped,
    Other(String),
}
impl Articulation {
    pub fn name(&self) -> &str {
        match self {
            Self::Staccato => "staccato",
            Self::Staccatissimo => "staccatissimo",
            Self::Accent => "accent",
            Self::StrongAccent => "strong accent",
            Self::Tenuto => "tenuto",
            Self::DetachedLegato => "detached legato",
            Self::Spiccato => "spiccato",
            Self::DownBow => "down bow",
            Self::UpBow => "up bow",
            Self::Harmonic => "harmonic",
            Self::Stopped => "stopped",
            Self::Other(name) => name.as_str(),
        }
    }
    /// Staccato and staccatissimo are brailled before other articulations.
    pub fn is_staccato_like(&self) -> bool {
        matches!(self, Self::Staccato | Self::Staccatissimo)
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    pub pitch: Pitch,
    pub duration: Duration,
    pub articulations: Vec<Articulation>,
    /// Fingering string, e.g. `"3"`, `"2-1"`, `"2,x"` or `"5|4"`.
    pub fingering: Option<String>,
    pub tie: Option<Tie>,
}
impl Note {
    pub fn new(pitch: Pitch, duration: impl Into<Duration>) -> Self {
        Self {
            pitch,
            duration: duration.into(),
            articulations: Vec::new(),
            fingering: None,
            tie: None,
        }
    }
    pub fn with_articulation(mut self, articulation: Articulation) -> Self {
        self.articulations.push(articulation);
        self
    }
    pub fn with_fingering(mut self, fingering: impl Into<String>) -> Self {
        self.fingering = Some(fingering.into());
        self
    }
    pub fn set_tie(&mut self, tie: impl Into<Option<Tie>>) -> &mut Self {
        self.tie = tie.into();
        self
    }
    /// Tied onward: a tie sign follows the note.
    pub fn continues_tie(&self) -> bool {
        matches!(self.tie, Some(Tie::Start | Tie::Continue))
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Rest {
    pub duration: Duration,
}
impl Rest {
    pub fn new(duration: impl Into<Duration>) -> Self {
        Self {
            duration: duration.into(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Chord {
    pub pitches: Vec<Pitch>,
    pub duration: Duration,
}
impl Chord {
    pub fn new(
        pitches: impl IntoIterator<Item = Pitch>,
        duration: impl Into<Duration>,
    ) -> Self {
        Self {
            pitches: pitches.into_iter().collect(),
            duration: duration.into(),
        }
    }
    /// Highest pitch for descending chords, lowest for ascending.
    pub fn written_pitch(&self, descending: bool) -> Option<&Pitch> {
        match descending {
            true => self.pitches.iter().max(),
            false => self.pitches.iter().min(),
        }
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub enum ClefSign {
    G,
    F,
    C,
    Percussion,
    Tab,
    /// No clef at all: transcribes to nothing.
    None,
}
impl ClefSign {
    /// Line of the sign when none is given: G2, C3, F4.
    pub fn usual_line(&self) -> Option<u8> {
        match self {
            Self::G => Some(2),
            Self::C => Some(3),
            Self::F => Some(4),
            Self::Percussion | Self::Tab | Self::None => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Clef {
    pub sign: ClefSign,
    pub line: Option<u8>,
}
impl Clef {
    pub fn new(sign: ClefSign, line: impl Into<Option<u8>>) -> Self {
        Self {
            sign,
            line: line.into(),
        }
    }
    pub fn treble() -> Self {
        Self::new(ClefSign::G, 2)
    }
    pub fn bass() -> Self {
        Self::new(ClefSign::F, 4)
    }
    pub fn alto() -> Self {
        Self::new(ClefSign::C, 3)
    }
    pub fn tenor() -> Self {
        Self::new(ClefSign::C, 4)
    }
    pub fn no_clef() -> Self {
        Self::new(ClefSign::None, None)
    }
    /// Given line, or the usual line of the sign.
    pub fn resolved_line(&self) -> Option<u8> {
        self.line.or_else(|| self.sign.usual_line())
    }
    /// Only treble and bass clefs may take the "change of hand" suffix.
    pub fn is_treble_or_bass(&self) -> bool {
        matches!(
            (self.sign, self.resolved_line()),
            (ClefSign::G, Some(2)) | (ClefSign::F, Some(4))
        )
    }
    pub fn name(&self) -> Option<&'static str> {
        let name = match (self.sign, self.resolved_line()?) {
            (ClefSign::G, 1) => "French Violin",
            (ClefSign::G, 2) => "Treble",
            (ClefSign::C, 1) => "Soprano",
            (ClefSign::C, 2) => "Mezzo-soprano",
            (ClefSign::C, 3) => "Alto",
            (ClefSign::C, 4) => "Tenor",
            (ClefSign::C, 5) => "C-baritone",
            (ClefSign::F, 3) => "F-baritone",
            (ClefSign::F, 4) => "Bass",
            (ClefSign::F, 5) => "Sub-bass",
            _ => return None,
        };
        Some(name)
    }
}
impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Clef {:?} {}", self.sign, line),
            None => write!(f, "Clef {:?}", self.sign),
        }
    }
}

/// Positive numbers are sharps, negative are flats.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct KeySignature {
    pub sharps: i8,
}
impl KeySignature {
    pub fn new(sharps: i8) -> Self {
        Self { sharps }
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub enum TimeSymbol {
    Common,
    Cut,
    SingleNumber,
    Normal,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
    pub symbol: TimeSymbol,
}
impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
            symbol: TimeSymbol::Normal,
        }
    }
    pub fn common() -> Self {
        Self {
            symbol: TimeSymbol::Common,
            ..Self::new(4, 4)
        }
    }
    pub fn cut() -> Self {
        Self {
            symbol: TimeSymbol::Cut,
            ..Self::new(2, 2)
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Dynamic {
    pub value: String,
}
impl Dynamic {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TextExpression {
    pub content: String,
}
impl TextExpression {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
    /// Abbreviations ending with a period need no separating dot 3.
    pub fn ends_with_period(&self) -> bool {
        self.content.ends_with('.')
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TempoText {
    pub text: String,
}
impl TempoText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MetronomeMark {
    pub referent: Duration,
    pub number: u32,
}
impl MetronomeMark {
    pub fn new(number: u32, referent: impl Into<Duration>) -> Self {
        Self {
            referent: referent.into(),
            number,
        }
    }
}
impl Default for MetronomeMark {
    fn default() -> Self {
        Self::new(60, DurationType::Quarter)
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub enum BarlineStyle {
    Regular,
    Dotted,
    Dashed,
    Heavy,
    Double,
    Final,
    HeavyLight,
    HeavyHeavy,
    Tick,
    Short,
    None,
}
impl fmt::Display for BarlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Regular => "regular",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::Heavy => "heavy",
            Self::Double => "double",
            Self::Final => "final",
            Self::HeavyLight => "heavy-light",
            Self::HeavyHeavy => "heavy-heavy",
            Self::Tick => "tick",
            Self::Short => "short",
            Self::None => "none",
        };
        f.write_str(s)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Barline {
    pub style: BarlineStyle,
}
impl Barline {
    pub fn new(style: BarlineStyle) -> Self {
        Self { style }
    }
}

#[cfg(test)]
mod tests {
    use super::{Chord, Clef, ClefSign, Note, Tie};
    use crate::primitives::{DurationType, Pitch};

    #[test]
    fn chord_written_pitch() {
        let chord = Chord::new(
            ["G4", "B4", "D5", "G5"].map(|p| p.parse::<Pitch>().unwrap()),
            DurationType::Whole,
        );
        assert_eq!(chord.written_pitch(true), Some(&"G5".parse().unwrap()));
        assert_eq!(chord.written_pitch(false), Some(&"G4".parse().unwrap()));
    }

    #[test]
    fn clef_kinds() {
        assert!(Clef::treble().is_treble_or_bass());
        assert!(Clef::bass().is_treble_or_bass());
        assert!(!Clef::alto().is_treble_or_bass());
        assert!(Clef::new(ClefSign::G, None).is_treble_or_bass());
        assert!(!Clef::new(ClefSign::G, 1).is_treble_or_bass());
        assert_eq!(Clef::new(ClefSign::F, None).name(), Some("Bass"));
        assert_eq!(Clef::new(ClefSign::C, 1).name(), Some("Soprano"));
        assert_eq!(Clef::no_clef().name(), None);
    }

    #[test]
    fn tie_continuation() {
        let mut note = Note::new("C4".parse().unwrap(), DurationType::Half);
        assert!(!note.continues_tie());
        note.set_tie(Tie::Start);
        assert!(note.continues_tie());
        note.set_tie(Tie::Stop);
        assert!(!note.continues_tie());
    }
}
