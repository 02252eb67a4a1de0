//! Words, numbers and finger marks.

use itertools::Itertools;

use super::{BrailleError, BrailleResult};
use crate::lookup::BrailleTables;

/// Literal word, letter by letter.
///
/// Normal words put the capital sign before an upper case letter. Inside a
/// text expression letters are folded to lower case and a period becomes
/// dot 3.
///
/// # Example
/// ```
/// # use braille_score::{braille_render::word_to_braille, lookup::BrailleTables};
/// let tables = BrailleTables::standard();
/// assert_eq!(word_to_braille(tables, "Andante", false).unwrap(), "⠠⠁⠝⠙⠁⠝⠞⠑");
/// assert_eq!(word_to_braille(tables, "rall.", true).unwrap(), "⠗⠁⠇⠇⠄");
/// ```
pub fn word_to_braille(
    tables: &BrailleTables,
    word: &str,
    is_text_expression: bool,
) -> BrailleResult<String> {
    let unsupported = |character: char| BrailleError::UnsupportedCharacter {
        character,
        word: word.to_string(),
    };
    let mut trans = String::new();
    for letter in word.chars() {
        if is_text_expression && letter == '.' {
            trans.push_str(&tables.symbols.dot);
            continue;
        }
        if letter.is_uppercase() && !is_text_expression {
            trans.push_str(&tables.symbols.uppercase);
        }
        let lower = letter.to_lowercase().next().unwrap_or(letter);
        let glyph = tables
            .alphabet
            .get(&lower)
            .ok_or_else(|| unsupported(letter))?;
        trans.push_str(glyph);
    }
    Ok(trans)
}

/// Decimal digits of the number, optionally behind the number sign.
pub fn number_to_braille(
    tables: &BrailleTables,
    number: u32,
    with_number_sign: bool,
) -> BrailleResult<String> {
    let digits = number.to_string();
    let mut trans = String::new();
    if with_number_sign {
        trans.push_str(&tables.symbols.number);
    }
    for digit in digits.chars() {
        let glyph = tables.numbers.get(&digit).ok_or_else(|| {
            BrailleError::UnsupportedCharacter {
                character: digit,
                word: digits.clone(),
            }
        })?;
        trans.push_str(glyph);
    }
    Ok(trans)
}

/// Instrument name, words joined by the braille space.
pub fn instrument_to_braille(tables: &BrailleTables, name: &str) -> BrailleResult<String> {
    let words = name
        .split_whitespace()
        .map(|word| word_to_braille(tables, word, false))
        .collect::<BrailleResult<Vec<String>>>()?;
    Ok(words.join(&tables.symbols.space))
}

/// Fingering of a note.
///
/// Grammar, where each `token` is a finger mark or a change `a-b`:
/// - `token`
/// - `token|token`: choice of fingerings;
/// - `token,token`: partial fingering, one side may be `x` for a missing
///   mark.
///
/// Choices are brailled upper fingering first, unless `upper_first` is
/// false. A missing mark gives a placeholder which depends on its written
/// position, so it is chosen before the order is swapped.
///
/// # Example
/// ```
/// # use braille_score::{braille_render::fingering_to_braille, lookup::BrailleTables};
/// let tables = BrailleTables::standard();
/// assert_eq!(fingering_to_braille(tables, "1-2|3-4", true).unwrap(), "⠁⠉⠃⠇⠉⠂");
/// assert_eq!(fingering_to_braille(tables, "2,1", false).unwrap(), "⠁⠃");
/// assert!(fingering_to_braille(tables, "6", true).is_err());
/// ```
pub fn fingering_to_braille(
    tables: &BrailleTables,
    fingering: &str,
    upper_first: bool,
) -> BrailleResult<String> {
    let invalid = || BrailleError::InvalidFingering(fingering.to_string());
    let fingering = fingering.trim();
    if fingering.is_empty() {
        return Err(invalid());
    }
    let (separator, may_be_absent) = match (fingering.contains('|'), fingering.contains(',')) {
        (true, true) => return Err(invalid()),
        (true, false) => ('|', false),
        (false, true) => (',', true),
        (false, false) => return transcribe_token(tables, fingering).ok_or_else(invalid),
    };
    let (first, second) = fingering
        .split(separator)
        .map(str::trim)
        .collect_tuple()
        .ok_or_else(invalid)?;
    let symbols = &tables.symbols;
    let side = |token: &str, missing: &String| -> BrailleResult<String> {
        match token {
            "x" if may_be_absent => Ok(missing.clone()),
            _ => transcribe_token(tables, token).ok_or_else(invalid),
        }
    };
    if may_be_absent && first == "x" && second == "x" {
        return Err(invalid());
    }
    let first = side(first, &symbols.first_set_missing_fingermark)?;
    let second = side(second, &symbols.second_set_missing_fingermark)?;
    Ok(match upper_first {
        true => first + &second,
        false => second + &first,
    })
}

/// A single mark or a change of fingers on a held note.
fn transcribe_token(tables: &BrailleTables, token: &str) -> Option<String> {
    let mark = |m: &str| tables.finger_marks.get(m.trim()).cloned();
    match token.split_once('-') {
        None => mark(token),
        Some((from, to)) => {
            Some(mark(from)? + &tables.symbols.finger_change + &mark(to)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        fingering_to_braille, instrument_to_braille, number_to_braille,
        word_to_braille,
    };
    use crate::{braille_render::BrailleError, lookup::BrailleTables};

    #[test]
    fn words() {
        let tables = BrailleTables::standard();
        assert_eq!(word_to_braille(tables, "Fagott", false).unwrap(), "⠠⠋⠁⠛⠕⠞⠞");
        // no capital sign in text expressions
        assert_eq!(word_to_braille(tables, "Dolce", true).unwrap(), "⠙⠕⠇⠉⠑");
        assert_eq!(
            word_to_braille(tables, "a&b", false),
            Err(BrailleError::UnsupportedCharacter {
                character: '&',
                word: "a&b".to_string()
            })
        );
    }

    #[test]
    fn numbers() {
        let tables = BrailleTables::standard();
        assert_eq!(number_to_braille(tables, 12, true).unwrap(), "⠼⠁⠃");
        assert_eq!(number_to_braille(tables, 7, true).unwrap(), "⠼⠛");
        assert_eq!(number_to_braille(tables, 37, false).unwrap(), "⠉⠛");
        assert_eq!(number_to_braille(tables, 0, false).unwrap(), "⠚");
    }

    #[test]
    fn instruments() {
        let tables = BrailleTables::standard();
        assert_eq!(instrument_to_braille(tables, "Bassoon").unwrap(), "⠠⠃⠁⠎⠎⠕⠕⠝");
        assert_eq!(
            instrument_to_braille(tables, "Bass Clarinet").unwrap(),
            "⠠⠃⠁⠎⠎⠀⠠⠉⠇⠁⠗⠊⠝⠑⠞"
        );
    }

    #[test]
    fn fingering_order() {
        let tables = BrailleTables::standard();
        assert_eq!(fingering_to_braille(tables, "2,1", true).unwrap(), "⠃⠁");
        assert_eq!(fingering_to_braille(tables, "2,1", false).unwrap(), "⠁⠃");
        assert_eq!(fingering_to_braille(tables, "5|4", true).unwrap(), "⠅⠂");
        assert_eq!(fingering_to_braille(tables, "3", true).unwrap(), "⠇");
        assert_eq!(fingering_to_braille(tables, "2-1", true).unwrap(), "⠃⠉⠁");
    }

    #[test]
    fn missing_marks_keep_written_position() {
        let tables = BrailleTables::standard();
        assert_eq!(fingering_to_braille(tables, "x,2", true).unwrap(), "⠠⠃");
        assert_eq!(fingering_to_braille(tables, "x,2", false).unwrap(), "⠃⠠");
        assert_eq!(fingering_to_braille(tables, "3,x", true).unwrap(), "⠇⠄");
    }

    #[test]
    fn invalid_fingerings() {
        let tables = BrailleTables::standard();
        for fingering in ["6", "", "x|2", "1,2,3", "1|2|3", "1-2-3", "x,x", "1,2|3", "a"] {
            assert_eq!(
                fingering_to_braille(tables, fingering, true),
                Err(BrailleError::InvalidFingering(fingering.to_string())),
                "{fingering}"
            );
        }
    }
}
