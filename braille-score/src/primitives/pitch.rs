//! Pitch as the braille encoders see it: a diatonic step, an octave and
//! an optional accidental.
//!
//! Only the pieces needed for transcription are modelled: the step picks
//! the note glyph, the octave picks the octave mark, and the diatonic
//! position gives generic intervals for chords and the octave heuristic.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::braille_render::BrailleError;

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}
impl Step {
    /// Position of the step inside an octave, C = 0.
    pub fn index(&self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 1,
            Self::E => 2,
            Self::F => 3,
            Self::G => 4,
            Self::A => 5,
            Self::B => 6,
        }
    }
    /// Semitones above C of the natural step.
    pub fn semitones(&self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }
}
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::A => "A",
            Self::B => "B",
        };
        f.write_str(s)
    }
}
impl TryFrom<char> for Step {
    type Error = BrailleError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            'F' => Ok(Self::F),
            'G' => Ok(Self::G),
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            x => Err(BrailleError::UnsupportedSymbol(format!("step {x}"))),
        }
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub enum Accidental {
    Natural,
    Sharp,
    DoubleSharp,
    TripleSharp,
    Flat,
    DoubleFlat,
    TripleFlat,
    HalfSharp,
    HalfFlat,
}
impl Accidental {
    /// Alteration in quarter tones.
    pub fn alter_quarters(&self) -> i32 {
        match self {
            Self::Natural => 0,
            Self::Sharp => 2,
            Self::DoubleSharp => 4,
            Self::TripleSharp => 6,
            Self::Flat => -2,
            Self::DoubleFlat => -4,
            Self::TripleFlat => -6,
            Self::HalfSharp => 1,
            Self::HalfFlat => -1,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Sharp => "sharp",
            Self::DoubleSharp => "double-sharp",
            Self::TripleSharp => "triple-sharp",
            Self::Flat => "flat",
            Self::DoubleFlat => "double-flat",
            Self::TripleFlat => "triple-flat",
            Self::HalfSharp => "half-sharp",
            Self::HalfFlat => "half-flat",
        }
    }
}
impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sounding pitch of a note or chord member.
///
/// `accidental_display` mirrors the display status of a printed
/// accidental: `Some(false)` suppresses the accidental sign, `None` and
/// `Some(true)` show it.
///
/// # Example
/// ```
/// # use braille_score::primitives::{Pitch, Step, Accidental};
/// let ds4: Pitch = "D#4".parse().unwrap();
/// assert_eq!(ds4.step, Step::D);
/// assert_eq!(ds4.octave, 4);
/// assert_eq!(ds4.accidental, Some(Accidental::Sharp));
/// let eb4: Pitch = "E-4".parse().unwrap();
/// assert_eq!(eb4.accidental, Some(Accidental::Flat));
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct Pitch {
    pub step: Step,
    pub octave: i8,
    pub accidental: Option<Accidental>,
    pub accidental_display: Option<bool>,
}
impl Pitch {
    pub fn new(step: Step, octave: i8) -> Self {
        Self {
            step,
            octave,
            accidental: None,
            accidental_display: None,
        }
    }
    pub fn with_accidental(mut self, accidental: Accidental) -> Self {
        self.accidental = Some(accidental);
        self
    }
    pub fn set_accidental_display(&mut self, display: bool) -> &mut Self {
        self.accidental_display = Some(display);
        self
    }

    /// Number of diatonic steps from C0.
    pub fn diatonic_number(&self) -> i32 {
        self.octave as i32 * 7 + self.step.index()
    }

    /// Pitch space position in quarter tones, C4 = 120.
    pub fn quarter_tones(&self) -> i32 {
        let semis = (self.octave as i32 + 1) * 12 + self.step.semitones();
        semis * 2 + self.accidental.map_or(0, |acc| acc.alter_quarters())
    }

    /// Undirected generic interval: unison = 1, second = 2, octave = 8.
    ///
    /// # Example
    /// ```
    /// # use braille_score::primitives::Pitch;
    /// let c4: Pitch = "C4".parse().unwrap();
    /// let e5: Pitch = "E5".parse().unwrap();
    /// assert_eq!(c4.generic_interval(&e5), 10);
    /// assert_eq!(e5.generic_interval(&c4), 10);
    /// ```
    pub fn generic_interval(&self, other: &Pitch) -> u8 {
        let distance = (self.diatonic_number() - other.diatonic_number()).abs();
        (distance + 1).min(u8::MAX as i32) as u8
    }
}
impl Default for Pitch {
    /// Middle C.
    fn default() -> Self {
        Self::new(Step::C, 4)
    }
}
impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.quarter_tones()
            .cmp(&other.quarter_tones())
            .then_with(|| self.diatonic_number().cmp(&other.diatonic_number()))
            .then_with(|| self.accidental.cmp(&other.accidental))
            .then_with(|| self.accidental_display.cmp(&other.accidental_display))
    }
}
impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acc = match self.accidental {
            None => "",
            Some(Accidental::Natural) => "n",
            Some(Accidental::Sharp) => "#",
            Some(Accidental::DoubleSharp) => "##",
            Some(Accidental::TripleSharp) => "###",
            Some(Accidental::Flat) => "-",
            Some(Accidental::DoubleFlat) => "--",
            Some(Accidental::TripleFlat) => "---",
            Some(Accidental::HalfSharp) => "~",
            Some(Accidental::HalfFlat) => "`",
        };
        write!(f, "{}{}{}", self.step, acc, self.octave)
    }
}
impl FromStr for Pitch {
    type Err = BrailleError;

    /// Parses `<step><accidental><octave>`, where the accidental is written
    /// as `#`, `##`, `###`, `-`, `--`, `---`, `n`, `~` or `` ` ``.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BrailleError::UnsupportedSymbol(format!("pitch {s}"));
        let mut chars = s.chars();
        let step = Step::try_from(chars.next().ok_or_else(invalid)?)?;
        let rest = chars.as_str();
        let split = rest
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (acc, octave) = rest.split_at(split);
        let accidental = match acc {
            "" => None,
            "n" => Some(Accidental::Natural),
            "#" => Some(Accidental::Sharp),
            "##" => Some(Accidental::DoubleSharp),
            "###" => Some(Accidental::TripleSharp),
            "-" => Some(Accidental::Flat),
            "--" => Some(Accidental::DoubleFlat),
            "---" => Some(Accidental::TripleFlat),
            "~" => Some(Accidental::HalfSharp),
            "`" => Some(Accidental::HalfFlat),
            _ => return Err(invalid()),
        };
        let octave: i8 = octave.parse().map_err(|_| invalid())?;
        Ok(Self {
            step,
            octave,
            accidental,
            accidental_display: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Accidental, Pitch, Step};

    fn p(s: &str) -> Pitch {
        s.parse().expect("valid pitch")
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(p("C4"), Pitch::new(Step::C, 4));
        assert_eq!(
            p("B--3"),
            Pitch::new(Step::B, 3).with_accidental(Accidental::DoubleFlat)
        );
        assert_eq!(p("F#5").to_string(), "F#5");
        assert!("H4".parse::<Pitch>().is_err());
        assert!("C".parse::<Pitch>().is_err());
        assert!("C?4".parse::<Pitch>().is_err());
    }

    #[test]
    fn ordering_follows_pitch_space() {
        let mut pitches = vec![p("G5"), p("C4"), p("B#3"), p("E-4")];
        pitches.sort();
        // enharmonic ties fall back to the diatonic position
        assert_eq!(pitches, vec![p("B#3"), p("C4"), p("E-4"), p("G5")]);
    }

    #[test]
    fn generic_intervals() {
        assert_eq!(p("C4").generic_interval(&p("C4")), 1);
        assert_eq!(p("C4").generic_interval(&p("D4")), 2);
        assert_eq!(p("C#4").generic_interval(&p("D-4")), 2);
        assert_eq!(p("G5").generic_interval(&p("G4")), 8);
        assert_eq!(p("B3").generic_interval(&p("C4")), 2);
    }
}
