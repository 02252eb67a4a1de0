//! Braille music symbol tables.
//!
//! The tables are an injected, read-only resource: every encoder takes a
//! `&BrailleTables`. [`BrailleTables::standard`] gives the shared tables
//! for English-language braille music; a caller can clone and alter them.
//!
//! Glyphs are written as dot numbers, so `1456` is the cell with dots
//! 1, 4, 5 and 6 raised (⠹), and `0` is the blank cell.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    cell::BrailleCell,
    primitives::{Accidental, BarlineStyle, ClefSign, DurationType, Step, TimeSymbol},
};

static STANDARD: Lazy<BrailleTables> = Lazy::new(BrailleTables::build_standard);

/// Named single-purpose signs.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbols {
    pub space: String,
    pub number: String,
    pub dot: String,
    pub tie: String,
    pub uppercase: String,
    pub metronome: String,
    pub word: String,
    pub triplet: String,
    pub opening_single_slur: String,
    pub opening_double_slur: String,
    pub closing_double_slur: String,
    pub opening_bracket_slur: String,
    pub closing_bracket_slur: String,
    pub finger_change: String,
    pub first_set_missing_fingermark: String,
    pub second_set_missing_fingermark: String,
    /// Placeholder for anything which can not be transcribed.
    pub basic_exception: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClefTable {
    pub prefix: String,
    pub bodies: HashMap<(ClefSign, u8), String>,
    pub suffix: String,
    /// Suffix for a clef in the part of the other hand.
    pub change_suffix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrailleTables {
    pub pitch_name_to_notes: HashMap<Step, HashMap<DurationType, String>>,
    pub rests: HashMap<DurationType, String>,
    pub accidentals: HashMap<Accidental, String>,
    pub octaves: HashMap<i8, String>,
    pub intervals: HashMap<u8, String>,
    pub key_signatures: HashMap<i8, String>,
    pub naturals: HashMap<u8, String>,
    pub numbers: HashMap<char, String>,
    pub beat_units: HashMap<u32, String>,
    pub time_symbols: HashMap<TimeSymbol, String>,
    pub alphabet: HashMap<char, String>,
    pub finger_marks: HashMap<String, String>,
    pub before_note_expr: HashMap<String, String>,
    pub text_expressions: HashMap<String, String>,
    pub barlines: HashMap<BarlineStyle, String>,
    pub clefs: ClefTable,
    pub symbols: Symbols,
}
impl BrailleTables {
    /// Shared standard tables, built on first use.
    pub fn standard() -> &'static BrailleTables {
        &STANDARD
    }

    fn build_standard() -> Self {
        Self {
            pitch_name_to_notes: pitch_name_to_notes(),
            rests: rests(),
            accidentals: HashMap::from([
                (Accidental::Natural, cells(&[16])),
                (Accidental::Sharp, cells(&[146])),
                (Accidental::Flat, cells(&[126])),
                (Accidental::DoubleSharp, cells(&[146, 146])),
                (Accidental::DoubleFlat, cells(&[126, 126])),
                (Accidental::TripleSharp, cells(&[146, 146, 146])),
                (Accidental::TripleFlat, cells(&[126, 126, 126])),
                (Accidental::HalfSharp, cells(&[4, 146])),
                (Accidental::HalfFlat, cells(&[4, 126])),
            ]),
            octaves: HashMap::from([
                (0, cells(&[4, 4])),
                (1, cells(&[4])),
                (2, cells(&[45])),
                (3, cells(&[456])),
                (4, cells(&[5])),
                (5, cells(&[46])),
                (6, cells(&[56])),
                (7, cells(&[6])),
                (8, cells(&[6, 6])),
            ]),
            intervals: HashMap::from([
                (2, cells(&[34])),
                (3, cells(&[346])),
                (4, cells(&[3456])),
                (5, cells(&[35])),
                (6, cells(&[356])),
                (7, cells(&[25])),
                (8, cells(&[36])),
            ]),
            key_signatures: HashMap::from([
                (-7, cells(&[3456, 1245, 126])),
                (-6, cells(&[3456, 124, 126])),
                (-5, cells(&[3456, 15, 126])),
                (-4, cells(&[3456, 145, 126])),
                (-3, cells(&[126, 126, 126])),
                (-2, cells(&[126, 126])),
                (-1, cells(&[126])),
                (0, String::new()),
                (1, cells(&[146])),
                (2, cells(&[146, 146])),
                (3, cells(&[146, 146, 146])),
                (4, cells(&[3456, 145, 146])),
                (5, cells(&[3456, 15, 146])),
                (6, cells(&[3456, 124, 146])),
                (7, cells(&[3456, 1245, 146])),
            ]),
            naturals: HashMap::from([
                (0, String::new()),
                (1, cells(&[16])),
                (2, cells(&[16, 16])),
                (3, cells(&[16, 16, 16])),
                (4, cells(&[3456, 145, 16])),
                (5, cells(&[3456, 15, 16])),
                (6, cells(&[3456, 124, 16])),
                (7, cells(&[3456, 1245, 16])),
            ]),
            numbers: HashMap::from([
                ('0', cells(&[245])),
                ('1', cells(&[1])),
                ('2', cells(&[12])),
                ('3', cells(&[14])),
                ('4', cells(&[145])),
                ('5', cells(&[15])),
                ('6', cells(&[124])),
                ('7', cells(&[1245])),
                ('8', cells(&[125])),
                ('9', cells(&[24])),
            ]),
            beat_units: HashMap::from([
                (1, cells(&[2])),
                (2, cells(&[23])),
                (4, cells(&[256])),
                (8, cells(&[236])),
                (16, cells(&[2, 235])),
                (32, cells(&[25, 23])),
                (64, cells(&[235, 256])),
            ]),
            time_symbols: HashMap::from([
                (TimeSymbol::Common, cells(&[46, 14])),
                (TimeSymbol::Cut, cells(&[456, 14])),
            ]),
            alphabet: alphabet(),
            finger_marks: [("1", 1), ("2", 12), ("3", 123), ("4", 2), ("5", 13)]
                .into_iter()
                .map(|(mark, dots)| (mark.to_string(), cells(&[dots])))
                .collect(),
            before_note_expr: [
                ("staccato", vec![236]),
                ("staccatissimo", vec![6, 236]),
                ("accent", vec![46, 236]),
                ("strong accent", vec![56, 236]),
                ("tenuto", vec![456, 236]),
                ("detached legato", vec![5, 236]),
                ("down bow", vec![126, 12]),
                ("up bow", vec![126, 3]),
            ]
            .into_iter()
            .map(|(name, dots)| (name.to_string(), cells(&dots)))
            .collect(),
            text_expressions: [
                ("cresc.", vec![345, 14, 1235, 3]),
                ("decresc.", vec![345, 145, 15, 14, 1235, 3]),
                ("dim.", vec![345, 145, 24, 134, 3]),
            ]
            .into_iter()
            .map(|(name, dots)| (name.to_string(), cells(&dots)))
            .collect(),
            barlines: HashMap::from([
                (BarlineStyle::Final, cells(&[126, 13])),
                (BarlineStyle::Double, cells(&[126, 13, 3])),
                (BarlineStyle::Dashed, cells(&[345])),
                (BarlineStyle::Heavy, cells(&[123])),
            ]),
            clefs: clefs(),
            symbols: Symbols {
                space: cells(&[0]),
                number: cells(&[3456]),
                dot: cells(&[3]),
                tie: cells(&[4, 14]),
                uppercase: cells(&[6]),
                metronome: cells(&[2356]),
                word: cells(&[345]),
                triplet: cells(&[23]),
                opening_single_slur: cells(&[14]),
                opening_double_slur: cells(&[14, 14]),
                closing_double_slur: cells(&[14]),
                opening_bracket_slur: cells(&[56, 12]),
                closing_bracket_slur: cells(&[45, 23]),
                finger_change: cells(&[14]),
                first_set_missing_fingermark: cells(&[6]),
                second_set_missing_fingermark: cells(&[3]),
                basic_exception: cells(&[345, 236]),
            },
        }
    }
}
impl Default for BrailleTables {
    fn default() -> Self {
        STANDARD.clone()
    }
}

/// Cell from dot numbers written as decimal digits.
fn cell(dots: u32) -> char {
    let digits: Vec<u8> = dots
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    BrailleCell::from_dots(&digits).to_unicode()
}

fn cells(dots: &[u32]) -> String {
    dots.iter().map(|d| cell(*d)).collect()
}

fn pitch_name_to_notes() -> HashMap<Step, HashMap<DurationType, String>> {
    // eighth-note forms; quarter adds dot 6, half dot 3, whole both
    let steps = [
        (Step::C, 145),
        (Step::D, 15),
        (Step::E, 124),
        (Step::F, 1245),
        (Step::G, 125),
        (Step::A, 24),
        (Step::B, 245),
    ];
    steps
        .into_iter()
        .map(|(step, eighth)| {
            let quarter = eighth * 10 + 6;
            let half = with_dot_3(eighth);
            let whole = half * 10 + 6;
            let notes = HashMap::from([
                (DurationType::Breve, cells(&[whole, 45, 14, whole])),
                (DurationType::Whole, cells(&[whole])),
                (DurationType::Half, cells(&[half])),
                (DurationType::Quarter, cells(&[quarter])),
                (DurationType::Eighth, cells(&[eighth])),
                (DurationType::N16th, cells(&[whole])),
                (DurationType::N32nd, cells(&[half])),
                (DurationType::N64th, cells(&[quarter])),
                (DurationType::N128th, cells(&[eighth])),
            ]);
            (step, notes)
        })
        .collect()
}

/// Insert dot 3 into a dot number whose digits are sorted.
fn with_dot_3(dots: u32) -> u32 {
    let mut digits: Vec<char> = dots.to_string().chars().collect();
    digits.push('3');
    digits.sort();
    digits.into_iter().collect::<String>().parse().unwrap_or(dots)
}

fn rests() -> HashMap<DurationType, String> {
    HashMap::from([
        (DurationType::Breve, cells(&[134, 45, 14, 134])),
        (DurationType::Whole, cells(&[134])),
        (DurationType::Half, cells(&[136])),
        (DurationType::Quarter, cells(&[1236])),
        (DurationType::Eighth, cells(&[1346])),
        (DurationType::N16th, cells(&[134])),
        (DurationType::N32nd, cells(&[136])),
        (DurationType::N64th, cells(&[1236])),
        (DurationType::N128th, cells(&[1346])),
    ])
}

fn alphabet() -> HashMap<char, String> {
    let letters = [
        1, 12, 14, 145, 15, 124, 1245, 125, 24, 245, 13, 123, 134, 1345, 135,
        1234, 12345, 1235, 234, 2345, 136, 1236, 2456, 1346, 13456, 1356,
    ];
    let mut alphabet: HashMap<char, String> = ('a'..='z')
        .zip(letters)
        .map(|(letter, dots)| (letter, cells(&[dots])))
        .collect();
    alphabet.extend([
        (',', cells(&[2])),
        (';', cells(&[23])),
        (':', cells(&[25])),
        ('.', cells(&[256])),
        ('!', cells(&[235])),
        ('?', cells(&[236])),
        ('(', cells(&[2356])),
        (')', cells(&[2356])),
        ('\'', cells(&[3])),
        ('-', cells(&[36])),
    ]);
    alphabet
}

fn clefs() -> ClefTable {
    // a line other than the usual one is marked with the octave sign of
    // the same number
    let line_marks = [(1u8, 4u32), (2, 45), (3, 456), (4, 5), (5, 46)];
    let signs = [(ClefSign::G, 34, 2u8), (ClefSign::C, 346, 3), (ClefSign::F, 3456, 4)];
    let mut bodies = HashMap::new();
    for (sign, body, usual_line) in signs {
        for (line, mark) in line_marks {
            let glyph = match line == usual_line {
                true => cells(&[body]),
                false => cells(&[body, mark]),
            };
            bodies.insert((sign, line), glyph);
        }
    }
    ClefTable {
        prefix: cells(&[345]),
        bodies,
        suffix: cells(&[123]),
        change_suffix: cells(&[13]),
    }
}

#[cfg(test)]
mod tests {
    use super::BrailleTables;
    use crate::primitives::{ClefSign, DurationType, Step};

    #[test]
    fn note_glyphs() {
        let tables = BrailleTables::standard();
        let c = &tables.pitch_name_to_notes[&Step::C];
        assert_eq!(c[&DurationType::Quarter], "⠹");
        assert_eq!(c[&DurationType::Half], "⠝");
        assert_eq!(c[&DurationType::Whole], "⠽");
        assert_eq!(c[&DurationType::Eighth], "⠙");
        let g = &tables.pitch_name_to_notes[&Step::G];
        assert_eq!(g[&DurationType::Whole], "⠷");
        assert_eq!(g[&DurationType::N16th], "⠷");
        assert!(!c.contains_key(&DurationType::Longa));
    }

    #[test]
    fn signs() {
        let tables = BrailleTables::standard();
        assert_eq!(tables.key_signatures[&4], "⠼⠙⠩");
        assert_eq!(tables.key_signatures[&-2], "⠣⠣");
        assert_eq!(tables.naturals[&3], "⠡⠡⠡");
        assert_eq!(tables.octaves[&4], "⠐");
        assert_eq!(tables.clefs.bodies[&(ClefSign::C, 4)], "⠬⠐");
        assert_eq!(tables.clefs.bodies[&(ClefSign::G, 2)], "⠌");
        assert_eq!(tables.symbols.space, "\u{2800}");
        assert_eq!(tables.symbols.basic_exception, "⠜⠦");
    }
}
