//! Dynamics, text and tempo expressions, metronome marks and barlines.

use super::{
    note_to_braille, number_to_braille, word_to_braille, BrailleError, BrailleResult,
    RenderSettings, RendersToBraille, Trace,
};
use crate::{
    lookup::BrailleTables,
    primitives::{
        Barline, Dynamic, MetronomeMark, Note, NoteContext, Pitch, TempoText,
        TextExpression,
    },
};

/// Cells reserved at the end of a tempo text line.
const LINE_RESERVE: usize = 6;

/// Words of an expression, optionally opened by the word sign and, when
/// there is more than one word, closed by it.
fn expression_words(
    tables: &BrailleTables,
    text: &str,
    precede_by_word_sign: bool,
    close_multi_word: bool,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let symbols = &tables.symbols;
    let words = text
        .split_whitespace()
        .map(|word| word_to_braille(tables, word, true))
        .collect::<BrailleResult<Vec<_>>>()?;
    let mut trans = String::new();
    if precede_by_word_sign {
        trans.push_str(&symbols.word);
        trace.push("Word", symbols.word.as_str());
    }
    trans.push_str(&words.join(&symbols.space));
    if close_multi_word && words.len() > 1 {
        trans.push_str(&symbols.word);
    }
    Ok(trans)
}

/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{dynamic_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::Dynamic,
/// # };
/// let tables = BrailleTables::standard();
/// let mut trace = Trace::new();
/// assert_eq!(dynamic_to_braille(tables, &Dynamic::new("f"), true, &mut trace).unwrap(), "⠜⠋");
/// assert_eq!(dynamic_to_braille(tables, &Dynamic::new("pp"), true, &mut trace).unwrap(), "⠜⠏⠏");
/// ```
pub fn dynamic_to_braille(
    tables: &BrailleTables,
    dynamic: &Dynamic,
    precede_by_word_sign: bool,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let value = dynamic.value.as_str();
    if let Some(glyph) = tables.text_expressions.get(value) {
        trace.push(format!("Dynamic {value}"), glyph.as_str());
        return Ok(glyph.clone());
    }
    let trans = expression_words(tables, value, precede_by_word_sign, false, trace)?;
    trace.push(format!("Dynamic {value}"), trans.as_str());
    Ok(trans)
}

/// Text expression: a known abbreviation, or its words in the word sign.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{text_expression_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::TextExpression,
/// # };
/// let tables = BrailleTables::standard();
/// let mut trace = Trace::new();
/// let text = TextExpression::new("dim. e rall.");
/// assert_eq!(
///     text_expression_to_braille(tables, &text, true, &mut trace).unwrap(),
///     "⠜⠙⠊⠍⠄⠀⠑⠀⠗⠁⠇⠇⠄⠜"
/// );
/// ```
pub fn text_expression_to_braille(
    tables: &BrailleTables,
    text_expression: &TextExpression,
    precede_by_word_sign: bool,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let content = text_expression.content.as_str();
    if let Some(glyph) = tables.text_expressions.get(content) {
        trace.push(format!("Text Expression {content}"), glyph.as_str());
        return Ok(glyph.clone());
    }
    let trans = expression_words(tables, content, precede_by_word_sign, true, trace)?;
    trace.push(format!("Text Expression {content}"), trans.as_str());
    Ok(trans)
}

/// Tempo text, not centered.
///
/// Every comma-separated phrase starts a new line, long phrases are
/// wrapped to `max_line_length` less six cells. Lines of a phrase end with
/// a comma, the text with a literary period.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{tempo_text_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::TempoText,
/// # };
/// let tables = BrailleTables::standard();
/// let text = TempoText::new("Andante molto grazioso");
/// assert_eq!(
///     tempo_text_to_braille(tables, &text, 40, &mut Trace::new()).unwrap(),
///     "⠠⠁⠝⠙⠁⠝⠞⠑⠀⠍⠕⠇⠞⠕⠀⠛⠗⠁⠵⠊⠕⠎⠕⠲"
/// );
/// ```
pub fn tempo_text_to_braille(
    tables: &BrailleTables,
    tempo_text: &TempoText,
    max_line_length: usize,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let punctuation = |mark: char| {
        tables.alphabet.get(&mark).ok_or_else(|| BrailleError::UnsupportedCharacter {
            character: mark,
            word: tempo_text.text.clone(),
        })
    };
    let comma = punctuation(',')?;
    let period = punctuation('.')?;
    let space = &tables.symbols.space;
    let limit = max_line_length.saturating_sub(LINE_RESERVE);

    let mut phrases = Vec::new();
    for phrase in tempo_text.text.split(',') {
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut cells = 0;
        for word in phrase.split_whitespace() {
            let braille_word = word_to_braille(tables, word, false)?;
            let word_cells = braille_word.chars().count();
            if cells > 0 && cells + word_cells + 1 > limit {
                lines.push(std::mem::take(&mut line));
                cells = 0;
            }
            if cells > 0 {
                line.push_str(space);
                cells += 1;
            }
            line.push_str(&braille_word);
            cells += word_cells;
        }
        lines.push(line);
        phrases.push(lines.join("\n"));
    }
    let trans = phrases.join(&format!("{comma}\n")) + period;
    trace.push(format!("Tempo Text {}", tempo_text.text), trans.as_str());
    Ok(trans)
}

/// Middle C of the referent duration, metronome sign and the number.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{metronome_mark_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::{DurationType, MetronomeMark},
/// # };
/// let tables = BrailleTables::standard();
/// let mark = MetronomeMark::new(80, DurationType::Half);
/// assert_eq!(
///     metronome_mark_to_braille(tables, &mark, &mut Trace::new()).unwrap(),
///     "⠝⠶⠼⠓⠚"
/// );
/// ```
pub fn metronome_mark_to_braille(
    tables: &BrailleTables,
    metronome_mark: &MetronomeMark,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let metro_note = Note::new(Pitch::default(), metronome_mark.referent.clone());
    let mut note_trace = Trace::new();
    let note = note_to_braille(
        tables,
        &metro_note,
        &NoteContext::default(),
        false,
        true,
        &mut note_trace,
    );
    trace.push("Metronome Note", "");
    trace.extend(note_trace);
    let mut trans = note?;
    let symbol = &tables.symbols.metronome;
    trans.push_str(symbol);
    trace.push("Metronome symbol", symbol.as_str());
    let number = number_to_braille(tables, metronome_mark.number, true)?;
    trace.push(
        format!("Metronome number {}", metronome_mark.number),
        number.as_str(),
    );
    Ok(trans + &number)
}

pub fn barline_to_braille(
    tables: &BrailleTables,
    barline: &Barline,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let glyph = tables.barlines.get(&barline.style).ok_or_else(|| {
        BrailleError::UnsupportedSymbol(format!("barline {}", barline.style))
    })?;
    trace.push(format!("Barline {}", barline.style), glyph.as_str());
    Ok(glyph.clone())
}

impl RendersToBraille for Dynamic {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        dynamic_to_braille(tables, self, true, trace)
    }
}

impl RendersToBraille for TextExpression {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        text_expression_to_braille(tables, self, true, trace)
    }
}

impl RendersToBraille for TempoText {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        tempo_text_to_braille(tables, self, settings.max_line_length, trace)
    }
}

impl RendersToBraille for MetronomeMark {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        metronome_mark_to_braille(tables, self, trace)
    }
}

impl RendersToBraille for Barline {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        barline_to_braille(tables, self, trace)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        barline_to_braille, dynamic_to_braille, metronome_mark_to_braille,
        tempo_text_to_braille, text_expression_to_braille,
    };
    use crate::{
        braille_render::{BrailleError, Trace},
        lookup::BrailleTables,
        primitives::{
            Barline, BarlineStyle, Duration, DurationType, Dynamic, MetronomeMark,
            TempoText, TextExpression,
        },
    };

    #[test]
    fn text_expressions() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let mut text = |content: &str, precede: bool| {
            text_expression_to_braille(
                tables,
                &TextExpression::new(content),
                precede,
                &mut trace,
            )
        };
        assert_eq!(text("dolce", true).unwrap(), "⠜⠙⠕⠇⠉⠑");
        assert_eq!(text("dolce", false).unwrap(), "⠙⠕⠇⠉⠑");
        assert_eq!(text("cresc.", true).unwrap(), "⠜⠉⠗⠄");
        assert_eq!(text("dim. e rall.", false).unwrap(), "⠙⠊⠍⠄⠀⠑⠀⠗⠁⠇⠇⠄⠜");
        assert!(matches!(
            text("poco a poco 1", true),
            Err(BrailleError::UnsupportedCharacter { character: '1', .. })
        ));
    }

    #[test]
    fn dynamics() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let dynamic = Dynamic::new("mf");
        assert_eq!(
            dynamic_to_braille(tables, &dynamic, false, &mut trace).unwrap(),
            "⠍⠋"
        );
        let dim = Dynamic::new("dim.");
        assert_eq!(
            dynamic_to_braille(tables, &dim, true, &mut trace).unwrap(),
            "⠜⠙⠊⠍⠄"
        );
        assert_eq!(trace.entries().last().unwrap().description, "Dynamic dim.");
    }

    #[test]
    fn tempo_text_lines() {
        let tables = BrailleTables::standard();
        let text = TempoText::new("Lento assai, cantante e tranquillo");
        assert_eq!(
            tempo_text_to_braille(tables, &text, 40, &mut Trace::new()).unwrap(),
            "⠠⠇⠑⠝⠞⠕⠀⠁⠎⠎⠁⠊⠂\n⠉⠁⠝⠞⠁⠝⠞⠑⠀⠑⠀⠞⠗⠁⠝⠟⠥⠊⠇⠇⠕⠲"
        );
    }

    #[test]
    fn tempo_text_wraps() {
        let tables = BrailleTables::standard();
        let text = TempoText::new("Andante molto grazioso");
        // 8 + 1 + 5 cells fit in 20 - 6, the third word does not
        assert_eq!(
            tempo_text_to_braille(tables, &text, 20, &mut Trace::new()).unwrap(),
            "⠠⠁⠝⠙⠁⠝⠞⠑⠀⠍⠕⠇⠞⠕\n⠛⠗⠁⠵⠊⠕⠎⠕⠲"
        );
    }

    #[test]
    fn metronome_marks() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let eighth = MetronomeMark::new(135, DurationType::Eighth);
        assert_eq!(
            metronome_mark_to_braille(tables, &eighth, &mut trace).unwrap(),
            "⠙⠶⠼⠁⠉⠑"
        );
        let dotted = MetronomeMark::new(60, Duration::new(DurationType::Quarter, 1));
        assert_eq!(
            metronome_mark_to_braille(tables, &dotted, &mut trace).unwrap(),
            "⠹⠄⠶⠼⠋⠚"
        );
    }

    #[test]
    fn barlines() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let mut barline = |style| barline_to_braille(tables, &Barline::new(style), &mut trace);
        assert_eq!(barline(BarlineStyle::Final).unwrap(), "⠣⠅");
        assert_eq!(barline(BarlineStyle::Double).unwrap(), "⠣⠅⠄");
        assert_eq!(barline(BarlineStyle::Dashed).unwrap(), "⠜");
        assert_eq!(barline(BarlineStyle::Heavy).unwrap(), "⠇");
        assert!(barline(BarlineStyle::Regular).is_err());
    }
}
