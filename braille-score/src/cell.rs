//! Six-dot braille cells and their text encodings.
//!
//! A cell is stored as a six bit dot pattern, bit `n - 1` standing for dot
//! `n`. Dots 1-2-3 form the left column, dots 4-5-6 the right one:
//!
//! ```text
//! 1 4
//! 2 5
//! 3 6
//! ```
//!
//! Every pattern has exactly one code point in the Unicode braille block
//! (`U+2800` + pattern) and one character of North American Braille ASCII.
//!
//! # Example
//! ```
//! # use braille_score::cell::{ascii_to_unicode, unicode_to_ascii};
//! assert_eq!(unicode_to_ascii("⠩⠐⠙").unwrap(), "%\"D");
//! assert_eq!(ascii_to_unicode(",andante").unwrap(), "⠠⠁⠝⠙⠁⠝⠞⠑");
//! ```

use std::fmt;

use crate::braille_render::{BrailleError, BrailleResult};

const UNICODE_BASE: u32 = 0x2800;

/// Braille ASCII characters indexed by dot pattern.
const ASCII_TABLE: &[u8; 64] =
    b" A1B'K2L@CIF/MSP\"E3H9O6R^DJG>NTQ,*5<-U8V.%[$+X!&;:4\\0Z7(_?W]#Y)=";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct BrailleCell(u8);
impl BrailleCell {
    /// Cell from a six-bit pattern; higher bits are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11_1111)
    }
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Cell from its raised dots, numbered 1 to 6.
    ///
    /// ```
    /// # use braille_score::cell::BrailleCell;
    /// assert_eq!(BrailleCell::from_dots(&[1, 4, 5, 6]).to_unicode(), '⠹');
    /// ```
    pub fn from_dots(dots: &[u8]) -> Self {
        let bits = dots
            .iter()
            .filter(|dot| (1..=6).contains(*dot))
            .fold(0u8, |acc, dot| acc | 1 << (dot - 1));
        Self(bits)
    }
    pub fn has_dot(&self, dot: u8) -> bool {
        (1..=6).contains(&dot) && self.0 & (1 << (dot - 1)) != 0
    }
    pub fn dots(&self) -> Vec<u8> {
        (1..=6).filter(|dot| self.has_dot(*dot)).collect()
    }

    pub fn to_unicode(&self) -> char {
        // all 64 code points from U+2800 are assigned braille patterns
        char::from_u32(UNICODE_BASE + self.0 as u32).unwrap_or('\u{2800}')
    }
    pub fn from_unicode(ch: char) -> BrailleResult<Self> {
        let code = ch as u32;
        match code.checked_sub(UNICODE_BASE) {
            Some(bits) if bits < 64 => Ok(Self(bits as u8)),
            _ => Err(BrailleError::UnknownSymbol(ch)),
        }
    }

    /// Canonical (upper case) Braille ASCII character.
    pub fn to_ascii(&self) -> char {
        ASCII_TABLE[self.0 as usize] as char
    }
    /// Case-insensitive: `a` and `A` are the same cell.
    pub fn from_ascii(ch: char) -> BrailleResult<Self> {
        let upper = ch.to_ascii_uppercase();
        ASCII_TABLE
            .iter()
            .position(|c| *c as char == upper)
            .map(|idx| Self(idx as u8))
            .ok_or(BrailleError::UnknownSymbol(ch))
    }

    /// Dot rows from top to bottom: (1-4, 2-5, 3-6).
    pub fn dot_rows(&self) -> (DotPair, DotPair, DotPair) {
        (
            DotPair::new(self.has_dot(1), self.has_dot(4)),
            DotPair::new(self.has_dot(2), self.has_dot(5)),
            DotPair::new(self.has_dot(3), self.has_dot(6)),
        )
    }
}
impl fmt::Display for BrailleCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_unicode())
    }
}
impl TryFrom<char> for BrailleCell {
    type Error = BrailleError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_unicode(value)
    }
}

/// One row of a cell. Displays as `00`, `01`, `10` or `11`, left dot first.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DotPair {
    pub left: bool,
    pub right: bool,
}
impl DotPair {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }
}
impl fmt::Display for DotPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.left as u8, self.right as u8)
    }
}

pub fn cell_to_ascii(cell: BrailleCell) -> char {
    cell.to_ascii()
}
pub fn ascii_to_cell(ch: char) -> BrailleResult<BrailleCell> {
    BrailleCell::from_ascii(ch)
}
pub fn cell_dot_rows(cell: BrailleCell) -> (DotPair, DotPair, DotPair) {
    cell.dot_rows()
}

/// Braille unicode to Braille ASCII, line by line.
pub fn unicode_to_ascii(braille: &str) -> BrailleResult<String> {
    map_lines(braille, |ch| Ok(BrailleCell::from_unicode(ch)?.to_ascii()))
}

/// Braille ASCII to braille unicode, line by line.
///
/// This is not a text translator: characters are mapped to cells one to
/// one, so a literal period becomes dots 4-6 and not a braille period.
pub fn ascii_to_unicode(ascii: &str) -> BrailleResult<String> {
    map_lines(ascii, |ch| Ok(BrailleCell::from_ascii(ch)?.to_unicode()))
}

fn map_lines(
    text: &str,
    map: impl Fn(char) -> BrailleResult<char>,
) -> BrailleResult<String> {
    let lines = text
        .split('\n')
        .map(|line| line.chars().map(&map).collect::<BrailleResult<String>>())
        .collect::<BrailleResult<Vec<String>>>()?;
    Ok(lines.join("\n"))
}

/// Render braille unicode as dot pictures.
///
/// Each braille line gives three text lines, one per dot row, cells
/// separated by two spaces. Braille lines are separated by an empty line.
///
/// # Example
/// ```
/// # use braille_score::cell::unicode_to_symbols;
/// assert_eq!(
///     unicode_to_symbols("⠜", 'o', '·').unwrap(),
///     "·o\n·o\no·"
/// );
/// ```
pub fn unicode_to_symbols(
    braille: &str,
    filled: char,
    empty: char,
) -> BrailleResult<String> {
    let pair = |p: DotPair| {
        let side = |raised: bool| if raised { filled } else { empty };
        format!("{}{}", side(p.left), side(p.right))
    };
    let mut blocks = Vec::new();
    for line in braille.lines() {
        let mut rows: [Vec<String>; 3] = Default::default();
        for ch in line.chars() {
            let (top, middle, bottom) = BrailleCell::from_unicode(ch)?.dot_rows();
            rows[0].push(pair(top));
            rows[1].push(pair(middle));
            rows[2].push(pair(bottom));
        }
        blocks.push(
            rows.iter()
                .map(|row| row.join("  "))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    Ok(blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::{
        ascii_to_cell, ascii_to_unicode, cell_dot_rows, cell_to_ascii,
        unicode_to_ascii, BrailleCell, DotPair,
    };
    use crate::braille_render::BrailleError;

    #[test]
    fn every_cell_round_trips() {
        for bits in 0..64u8 {
            let cell = BrailleCell::from_bits(bits);
            assert_eq!(ascii_to_cell(cell_to_ascii(cell)), Ok(cell));
            assert_eq!(BrailleCell::from_unicode(cell.to_unicode()), Ok(cell));
        }
    }

    #[test]
    fn ascii_is_a_bijection() {
        let mut seen: Vec<char> =
            (0..64u8).map(|b| BrailleCell::from_bits(b).to_ascii()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn ascii_decode_ignores_case() {
        assert_eq!(ascii_to_cell('d'), ascii_to_cell('D'));
        assert_eq!(ascii_to_cell('a').unwrap().dots(), vec![1]);
        assert_eq!(ascii_to_cell('~'), Err(BrailleError::UnknownSymbol('~')));
    }

    #[test]
    fn dot_rows() {
        // dots 3-4-5
        let word_sign = BrailleCell::from_unicode('⠜').unwrap();
        let (top, middle, bottom) = cell_dot_rows(word_sign);
        assert_eq!(top, DotPair::new(false, true));
        assert_eq!(middle.to_string(), "01");
        assert_eq!(bottom.to_string(), "10");
    }

    #[test]
    fn strings() {
        assert_eq!(unicode_to_ascii("\u{2800}").unwrap(), " ");
        assert_eq!(unicode_to_ascii("⠣⠐⠋").unwrap(), "<\"F");
        assert_eq!(
            ascii_to_unicode("#A\n#B").unwrap(),
            "⠼⠁\n⠼⠃".to_string()
        );
        assert!(unicode_to_ascii("abc").is_err());
    }

    #[test]
    fn line_breaks_are_kept() {
        assert_eq!(unicode_to_ascii("⠁\n").unwrap(), "A\n");
        assert_eq!(ascii_to_unicode("A\n\nB").unwrap(), "⠁\n\n⠃");
        assert_eq!(ascii_to_unicode(&unicode_to_ascii("⠁\n").unwrap()).unwrap(), "⠁\n");
        assert_eq!(unicode_to_ascii("").unwrap(), "");
        assert!(unicode_to_ascii("⠁\r\n").is_err());
    }
}
