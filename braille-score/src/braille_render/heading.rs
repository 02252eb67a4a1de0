//! Centered heading of a piece or a movement.

use super::{
    key_signature_to_braille, metronome_mark_to_braille, tempo_text_to_braille,
    time_signature_to_braille, BrailleError, BrailleResult, RenderSettings, Trace,
};
use crate::{
    lookup::BrailleTables,
    primitives::{KeySignature, MetronomeMark, TempoText, TimeSignature},
};

/// Cells which are kept free around a one-line heading.
const MARGIN: usize = 6;

/// Tempo text, metronome mark, key and time signature of a heading.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{Heading, RenderSettings, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::{DurationType, KeySignature, MetronomeMark, TempoText, TimeSignature},
/// # };
/// let heading = Heading::default()
///     .with_key_signature(KeySignature::new(5))
///     .with_time_signature(TimeSignature::new(3, 8))
///     .with_tempo_text(TempoText::new("Allegretto"))
///     .with_metronome_mark(MetronomeMark::new(135, DurationType::Eighth));
/// let braille = heading
///     .transcribe(BrailleTables::standard(), &RenderSettings::default(), &mut Trace::new())
///     .unwrap();
/// let margin = "⠀".repeat(7);
/// assert_eq!(
///     braille,
///     format!("{margin}⠠⠁⠇⠇⠑⠛⠗⠑⠞⠞⠕⠲⠀⠙⠶⠼⠁⠉⠑⠀⠼⠑⠩⠼⠉⠦{margin}")
/// );
/// ```
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Heading {
    pub key_signature: Option<KeySignature>,
    pub time_signature: Option<TimeSignature>,
    pub tempo_text: Option<TempoText>,
    pub metronome_mark: Option<MetronomeMark>,
}
impl Heading {
    pub fn with_key_signature(mut self, key_signature: KeySignature) -> Self {
        self.key_signature = Some(key_signature);
        self
    }
    pub fn with_time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = Some(time_signature);
        self
    }
    pub fn with_tempo_text(mut self, tempo_text: TempoText) -> Self {
        self.tempo_text = Some(tempo_text);
        self
    }
    pub fn with_metronome_mark(mut self, metronome_mark: MetronomeMark) -> Self {
        self.metronome_mark = Some(metronome_mark);
        self
    }

    fn is_empty(&self) -> bool {
        self.key_signature.is_none()
            && self.time_signature.is_none()
            && self.tempo_text.is_none()
            && self.metronome_mark.is_none()
    }

    /// Lay the heading out, centered on lines of `settings.max_line_length`.
    ///
    /// Everything goes on one line when it fits with six cells to spare.
    /// Otherwise the tempo text lines come first, then the metronome mark
    /// with the signatures on a line of their own.
    pub fn transcribe(
        &self,
        tables: &BrailleTables,
        settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        if self.is_empty() {
            return Err(BrailleError::EmptyHeading);
        }
        let width = settings.max_line_length;
        let space = tables.symbols.space.as_str();

        let tempo = self.tempo_text.as_ref().map(|text| {
            let result = tempo_text_to_braille(tables, text, width, trace);
            degrade(tables, "Tempo Text", result)
        });

        let mut other = Vec::new();
        if let Some(mark) = &self.metronome_mark {
            let result = metronome_mark_to_braille(tables, mark, trace);
            other.push(degrade(tables, "Metronome Mark", result));
        }
        // key and time signatures degrade separately
        let key_signature = self
            .key_signature
            .filter(|ks| ks.sharps != 0 || self.time_signature.is_some());
        let mut signatures = String::new();
        if let Some(ks) = &key_signature {
            let result = key_signature_to_braille(tables, ks, None, trace);
            signatures.push_str(&degrade(tables, "Key Signature", result));
        }
        if let Some(ts) = &self.time_signature {
            let result = time_signature_to_braille(tables, ts, trace);
            signatures.push_str(&degrade(tables, "Time Signature", result));
        }
        match key_signature.is_some() || self.time_signature.is_some() {
            true => other.push(signatures),
            false => log::debug!("heading without key or time signature"),
        }
        let other = other.join(space);

        let tempo = match (tempo, other.is_empty()) {
            (None, true) => return Err(BrailleError::EmptyHeading),
            (None, false) => return Ok(center(&other, width, space)),
            (Some(tempo), true) => {
                let lines = tempo.lines().map(|line| center(line, width, space));
                return Ok(lines.collect::<Vec<_>>().join("\n"));
            }
            (Some(tempo), false) => tempo,
        };
        let mut lines: Vec<&str> = tempo.lines().collect();
        lines.push(&other);
        let one_line = lines.join(space);
        if one_line.chars().count() <= width.saturating_sub(MARGIN) {
            return Ok(center(&one_line, width, space));
        }
        Ok(lines
            .into_iter()
            .map(|line| center(line, width, space))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn degrade(tables: &BrailleTables, subject: &str, result: BrailleResult<String>) -> String {
    result.unwrap_or_else(|err| {
        log::warn!("{subject}: {err}");
        tables.symbols.basic_exception.clone()
    })
}

/// Center like Python's `str.center`: with odd margin and odd width the
/// extra cell goes to the left.
fn center(line: &str, width: usize, fill: &str) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{line}{}", fill.repeat(left), fill.repeat(margin - left))
}
