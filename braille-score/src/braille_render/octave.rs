use crate::primitives::Pitch;

/// Whether the current pitch needs an octave mark after the previous one.
///
/// - seconds and thirds never take the mark;
/// - sixths and wider always take it;
/// - fourths and fifths take it only when the octave changes.
///
/// Without a previous pitch (start of a line, after a signature change or
/// a music hyphen) the mark is always shown.
///
/// # Example
/// ```
/// # use braille_score::{braille_render::show_octave_with_note, primitives::Pitch};
/// let p = |s: &str| s.parse::<Pitch>().unwrap();
/// assert!(!show_octave_with_note(Some(&p("C4")), &p("E4")));
/// assert!(show_octave_with_note(Some(&p("C4")), &p("A4")));
/// assert!(!show_octave_with_note(Some(&p("C4")), &p("F4")));
/// assert!(show_octave_with_note(Some(&p("A4")), &p("E5")));
/// assert!(show_octave_with_note(None, &p("C4")));
/// ```
pub fn show_octave_with_note(previous: Option<&Pitch>, current: &Pitch) -> bool {
    let previous = match previous {
        None => return true,
        Some(p) => p,
    };
    match previous.generic_interval(current) {
        g if g >= 6 => true,
        4 | 5 => previous.octave != current.octave,
        _ => false,
    }
}
