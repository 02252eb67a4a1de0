//! Clefs, key and time signatures.

use super::{
    number_to_braille, BrailleError, BrailleResult, RenderSettings, RendersToBraille,
    Trace,
};
use crate::{
    lookup::BrailleTables,
    primitives::{Clef, ClefSign, KeySignature, TimeSignature, TimeSymbol},
};

/// Braille of a clef: prefix, sign with line, suffix.
///
/// `change_suffix` asks for the "other hand" suffix, which exists only for
/// treble and bass clefs. A clef without sign gives an empty string.
pub fn clef_to_braille(
    tables: &BrailleTables,
    clef: &Clef,
    change_suffix: bool,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let line = match clef.sign {
        ClefSign::None => return Ok(String::new()),
        _ => clef
            .resolved_line()
            .ok_or_else(|| BrailleError::UnsupportedSymbol(clef.to_string()))?,
    };
    let clefs = &tables.clefs;
    let body = clefs
        .bodies
        .get(&(clef.sign, line))
        .ok_or_else(|| BrailleError::UnsupportedSymbol(clef.to_string()))?;
    let suffix = match change_suffix && clef.is_treble_or_bass() {
        true => &clefs.change_suffix,
        false => &clefs.suffix,
    };
    let trans = format!("{}{}{}", clefs.prefix, body, suffix);
    let name = clef.name().unwrap_or("Unnamed");
    trace.push(format!("{name} Clef"), trans.as_str());
    Ok(trans)
}

/// Naturals which cancel the outgoing key before the incoming one.
fn cancellation(incoming: i8, outgoing: i8) -> u8 {
    let (abs_in, abs_out) = (incoming.unsigned_abs(), outgoing.unsigned_abs());
    if incoming == 0 || outgoing == 0 || incoming.signum() != outgoing.signum() {
        abs_out
    } else if abs_out >= abs_in {
        abs_out - abs_in
    } else {
        0
    }
}

/// Braille of a key signature, with cancellation of the outgoing one.
///
/// A key of the other side of zero cancels all outgoing accidentals, a
/// smaller key of the same side cancels the difference.
///
/// # Example
/// ```
/// # use braille_score::{
/// #     braille_render::{key_signature_to_braille, Trace},
/// #     lookup::BrailleTables,
/// #     primitives::KeySignature,
/// # };
/// let tables = BrailleTables::standard();
/// let mut trace = Trace::new();
/// let c_major = KeySignature::new(0);
/// let e_flat_major = KeySignature::new(-3);
/// assert_eq!(
///     key_signature_to_braille(tables, &c_major, Some(&e_flat_major), &mut trace).unwrap(),
///     "⠡⠡⠡"
/// );
/// ```
pub fn key_signature_to_braille(
    tables: &BrailleTables,
    key_signature: &KeySignature,
    outgoing: Option<&KeySignature>,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let incoming = key_signature.sharps;
    let ks_braille = tables.key_signatures.get(&incoming).ok_or_else(|| {
        BrailleError::UnsupportedSymbol(format!("key signature of {incoming} sharps"))
    })?;
    let kind = match incoming > 0 {
        true => "sharp(s)",
        false => "flat(s)",
    };
    let description = format!("Key Signature {} {kind}", incoming.unsigned_abs());
    let outgoing = match outgoing {
        None => {
            trace.push(description, ks_braille.as_str());
            return Ok(ks_braille.clone());
        }
        Some(ks) => ks.sharps,
    };
    let naturals = cancellation(incoming, outgoing);
    match tables.naturals.get(&naturals) {
        Some(glyph) => {
            trace.push(format!("Key Signature {outgoing} naturals"), glyph.as_str());
            trace.push(description, ks_braille.as_str());
            Ok(format!("{glyph}{ks_braille}"))
        }
        None => {
            log::warn!(
                "Cancellation of outgoing key signature of {outgoing} sharps \
                can not be transcribed to braille"
            );
            trace.push(format!("Key Signature {outgoing} naturals None"), "");
            trace.push(description, ks_braille.as_str());
            Ok(ks_braille.clone())
        }
    }
}

/// Braille of a time signature.
///
/// Common and cut time have their own signs, other signatures are the
/// numerator as a number over the denominator as a lower-cell beat unit.
pub fn time_signature_to_braille(
    tables: &BrailleTables,
    time_signature: &TimeSignature,
    trace: &mut Trace,
) -> BrailleResult<String> {
    if let Some(glyph) = tables.time_symbols.get(&time_signature.symbol) {
        trace.push(
            format!("Time Signature {:?}", time_signature.symbol),
            glyph.as_str(),
        );
        return Ok(glyph.clone());
    }
    let TimeSignature {
        numerator,
        denominator,
        symbol,
    } = *time_signature;
    let mut trans = number_to_braille(tables, numerator, true)?;
    if symbol != TimeSymbol::SingleNumber {
        let beat_unit = tables.beat_units.get(&denominator).ok_or_else(|| {
            BrailleError::UnsupportedSymbol(format!(
                "time signature {numerator}/{denominator}"
            ))
        })?;
        trans.push_str(beat_unit);
    }
    trace.push(
        format!("Time Signature {numerator}/{denominator}"),
        trans.as_str(),
    );
    Ok(trans)
}

/// Key signature (with cancellation) followed by time signature.
///
/// Fails with [`BrailleError::EmptyHeading`] when there is nothing to show:
/// no time signature and either no key signature or C major with no key to
/// cancel.
pub fn transcribe_signatures(
    tables: &BrailleTables,
    key_signature: Option<&KeySignature>,
    time_signature: Option<&TimeSignature>,
    outgoing: Option<&KeySignature>,
    trace: &mut Trace,
) -> BrailleResult<String> {
    let nothing_to_show = match (key_signature, time_signature) {
        (_, Some(_)) => false,
        (None, None) => true,
        (Some(ks), None) => ks.sharps == 0 && outgoing.is_none(),
    };
    if nothing_to_show {
        return Err(BrailleError::EmptyHeading);
    }
    let mut trans = String::new();
    if let Some(ks) = key_signature {
        trans.push_str(&key_signature_to_braille(tables, ks, outgoing, trace)?);
    }
    if let Some(ts) = time_signature {
        trans.push_str(&time_signature_to_braille(tables, ts, trace)?);
    }
    Ok(trans)
}

impl RendersToBraille for Clef {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        clef_to_braille(tables, self, false, trace)
    }
}

impl RendersToBraille for KeySignature {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        key_signature_to_braille(tables, self, None, trace)
    }
}

impl RendersToBraille for TimeSignature {
    fn render_braille(
        &self,
        tables: &BrailleTables,
        _settings: &RenderSettings,
        trace: &mut Trace,
    ) -> BrailleResult<String> {
        time_signature_to_braille(tables, self, trace)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        cancellation, clef_to_braille, key_signature_to_braille,
        time_signature_to_braille, transcribe_signatures,
    };
    use crate::{
        braille_render::{BrailleError, Trace},
        lookup::BrailleTables,
        primitives::{Clef, ClefSign, KeySignature, TimeSignature, TimeSymbol},
    };

    fn clef(clef: Clef, change: bool) -> Result<String, BrailleError> {
        clef_to_braille(BrailleTables::standard(), &clef, change, &mut Trace::new())
    }

    #[test]
    fn clefs() {
        assert_eq!(clef(Clef::treble(), false).unwrap(), "⠜⠌⠇");
        assert_eq!(clef(Clef::bass(), false).unwrap(), "⠜⠼⠇");
        assert_eq!(clef(Clef::tenor(), false).unwrap(), "⠜⠬⠐⠇");
        assert_eq!(clef(Clef::new(ClefSign::C, 1), false).unwrap(), "⠜⠬⠈⠇");
        assert_eq!(clef(Clef::no_clef(), false).unwrap(), "");
        assert!(clef(Clef::new(ClefSign::Percussion, None), false).is_err());
        assert!(clef(Clef::new(ClefSign::G, 7), false).is_err());
    }

    #[test]
    fn change_suffix_only_for_treble_and_bass() {
        assert_eq!(clef(Clef::treble(), true).unwrap(), "⠜⠌⠅");
        assert_eq!(clef(Clef::bass(), true).unwrap(), "⠜⠼⠅");
        assert_eq!(clef(Clef::alto(), true).unwrap(), "⠜⠬⠇");
        assert_eq!(clef(Clef::new(ClefSign::G, None), true).unwrap(), "⠜⠌⠅");
        assert_eq!(clef(Clef::new(ClefSign::F, None), false).unwrap(), "⠜⠼⠇");
    }

    #[test]
    fn cancellations() {
        assert_eq!(cancellation(0, -3), 3);
        assert_eq!(cancellation(2, 5), 3);
        assert_eq!(cancellation(5, 2), 0);
        assert_eq!(cancellation(-1, 4), 4);
        // equal keys of opposite sides cancel every outgoing accidental
        assert_eq!(cancellation(2, -2), 2);
        assert_eq!(cancellation(-4, 4), 4);
    }

    #[test]
    fn key_signatures() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let ks = |sharps| KeySignature::new(sharps);
        assert_eq!(
            key_signature_to_braille(tables, &ks(4), None, &mut trace).unwrap(),
            "⠼⠙⠩"
        );
        assert_eq!(
            key_signature_to_braille(tables, &ks(2), Some(&ks(-2)), &mut trace)
                .unwrap(),
            "⠡⠡⠩⠩"
        );
        assert_eq!(
            key_signature_to_braille(tables, &ks(1), Some(&ks(4)), &mut trace)
                .unwrap(),
            "⠡⠡⠡⠩"
        );
        assert!(key_signature_to_braille(tables, &ks(9), None, &mut trace).is_err());
        // outgoing key out of table drops cancellation only
        assert_eq!(
            key_signature_to_braille(tables, &ks(1), Some(&ks(-9)), &mut trace)
                .unwrap(),
            "⠩"
        );
    }

    #[test]
    fn time_signatures() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let mut ts = |ts: TimeSignature| time_signature_to_braille(tables, &ts, &mut trace);
        assert_eq!(ts(TimeSignature::new(4, 4)).unwrap(), "⠼⠙⠲");
        assert_eq!(ts(TimeSignature::new(3, 4)).unwrap(), "⠼⠉⠲");
        assert_eq!(ts(TimeSignature::new(12, 8)).unwrap(), "⠼⠁⠃⠦");
        assert_eq!(ts(TimeSignature::common()).unwrap(), "⠨⠉");
        assert_eq!(ts(TimeSignature::cut()).unwrap(), "⠸⠉");
        let single = TimeSignature {
            symbol: TimeSymbol::SingleNumber,
            ..TimeSignature::new(3, 4)
        };
        assert_eq!(ts(single).unwrap(), "⠼⠉");
        assert!(ts(TimeSignature::new(5, 3)).is_err());
    }

    #[test]
    fn signatures() {
        let tables = BrailleTables::standard();
        let mut trace = Trace::new();
        let key = KeySignature::new(5);
        let time = TimeSignature::new(3, 8);
        assert_eq!(
            transcribe_signatures(tables, Some(&key), Some(&time), None, &mut trace)
                .unwrap(),
            "⠼⠑⠩⠼⠉⠦"
        );
        let c_major = KeySignature::new(0);
        let outgoing = KeySignature::new(-3);
        assert_eq!(
            transcribe_signatures(tables, Some(&c_major), None, Some(&outgoing), &mut trace)
                .unwrap(),
            "⠡⠡⠡"
        );
        assert_eq!(
            transcribe_signatures(tables, Some(&c_major), None, None, &mut trace),
            Err(BrailleError::EmptyHeading)
        );
        assert_eq!(
            transcribe_signatures(tables, None, None, None, &mut trace),
            Err(BrailleError::EmptyHeading)
        );
    }
}
