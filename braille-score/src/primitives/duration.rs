//! Note-length classes used to pick duration glyphs.
//!
//! Braille music encodes a note's length in the same cell as its name, so
//! the encoders need a duration *category* (quarter, eighth…) and the
//! number of augmentation dots, rather than an absolute length.
//! `Duration::from_quarter_length` derives both from a quarter-note based
//! [`Fraction`].

use std::fmt;

use fraction::Fraction;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub enum DurationType {
    Maxima,
    Longa,
    Breve,
    Whole,
    Half,
    Quarter,
    Eighth,
    N16th,
    N32nd,
    N64th,
    N128th,
    N256th,
    /// A length which is not expressible by one glyph.
    Complex,
    Zero,
}
impl DurationType {
    /// Length in quarter notes of the undotted category.
    pub fn quarter_length(&self) -> Option<Fraction> {
        let (num, denom) = match self {
            Self::Maxima => (32u64, 1u64),
            Self::Longa => (16, 1),
            Self::Breve => (8, 1),
            Self::Whole => (4, 1),
            Self::Half => (2, 1),
            Self::Quarter => (1, 1),
            Self::Eighth => (1, 2),
            Self::N16th => (1, 4),
            Self::N32nd => (1, 8),
            Self::N64th => (1, 16),
            Self::N128th => (1, 32),
            Self::N256th => (1, 64),
            Self::Complex | Self::Zero => return None,
        };
        Some(Fraction::new(num, denom))
    }
}
impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Maxima => "maxima",
            Self::Longa => "longa",
            Self::Breve => "breve",
            Self::Whole => "whole",
            Self::Half => "half",
            Self::Quarter => "quarter",
            Self::Eighth => "eighth",
            Self::N16th => "16th",
            Self::N32nd => "32nd",
            Self::N64th => "64th",
            Self::N128th => "128th",
            Self::N256th => "256th",
            Self::Complex => "complex",
            Self::Zero => "zero",
        };
        f.write_str(s)
    }
}

/// Categories tried by [`Duration::from_quarter_length`], longest first.
const SIMPLE_TYPES: [DurationType; 11] = [
    DurationType::Longa,
    DurationType::Breve,
    DurationType::Whole,
    DurationType::Half,
    DurationType::Quarter,
    DurationType::Eighth,
    DurationType::N16th,
    DurationType::N32nd,
    DurationType::N64th,
    DurationType::N128th,
    DurationType::N256th,
];
const MAX_DOTS: u8 = 3;

/// `actual` notes in the time of `normal` ones.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Tuplet {
    pub actual: u32,
    pub normal: u32,
}
impl Tuplet {
    pub fn new(actual: u32, normal: u32) -> Self {
        Self { actual, normal }
    }
    pub fn triplet() -> Self {
        Self::new(3, 2)
    }
    pub fn is_triplet(&self) -> bool {
        self.actual == 3 && self.normal == 2
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct Duration {
    pub kind: DurationType,
    pub dots: u8,
    pub tuplet: Option<Tuplet>,
    /// Grace notes take no time and are always shown as eighths.
    pub grace: bool,
}
impl Duration {
    pub fn new(kind: DurationType, dots: u8) -> Self {
        Self {
            kind,
            dots,
            tuplet: None,
            grace: false,
        }
    }
    pub fn with_tuplet(mut self, tuplet: Tuplet) -> Self {
        self.tuplet = Some(tuplet);
        self
    }
    pub fn grace(mut self) -> Self {
        self.grace = true;
        self
    }
    pub fn is_triplet(&self) -> bool {
        self.tuplet.map_or(false, |t| t.is_triplet())
    }

    /// Find category, dots and triplet for the given quarter length.
    ///
    /// # Example
    /// ```
    /// # use fraction::Fraction;
    /// # use braille_score::primitives::{Duration, DurationType, Tuplet};
    /// assert_eq!(
    ///     Duration::from_quarter_length(Fraction::new(3u64, 2u64)),
    ///     Duration::new(DurationType::Quarter, 1)
    /// );
    /// assert_eq!(
    ///     Duration::from_quarter_length(Fraction::new(1u64, 3u64)),
    ///     Duration::new(DurationType::Eighth, 0).with_tuplet(Tuplet::triplet())
    /// );
    /// assert_eq!(
    ///     Duration::from_quarter_length(Fraction::new(5u64, 4u64)).kind,
    ///     DurationType::Complex
    /// );
    /// ```
    pub fn from_quarter_length(quarter_length: Fraction) -> Self {
        if quarter_length == Fraction::new(0u64, 1u64) {
            return Self::new(DurationType::Zero, 0);
        }
        if let Some((kind, dots)) = find_dotted(quarter_length) {
            return Self::new(kind, dots);
        }
        // triplets are recognised only on undotted categories
        let in_triplet = quarter_length * Fraction::new(3u64, 2u64);
        if let Some(kind) = SIMPLE_TYPES
            .into_iter()
            .find(|kind| kind.quarter_length() == Some(in_triplet))
        {
            return Self::new(kind, 0).with_tuplet(Tuplet::triplet());
        }
        Self::new(DurationType::Complex, 0)
    }

    /// Length in quarter notes, if category is simple.
    pub fn quarter_length(&self) -> Option<Fraction> {
        let mut length = self.kind.quarter_length()?;
        let mut addition = length;
        for _ in 0..self.dots {
            addition = addition * Fraction::new(1u64, 2u64);
            length = length + addition;
        }
        if let Some(tuplet) = self.tuplet {
            length =
                length * Fraction::new(tuplet.normal as u64, tuplet.actual as u64);
        }
        Some(length)
    }
}
impl From<DurationType> for Duration {
    fn from(kind: DurationType) -> Self {
        Self::new(kind, 0)
    }
}
impl Default for Duration {
    fn default() -> Self {
        Self::new(DurationType::Quarter, 0)
    }
}

fn find_dotted(quarter_length: Fraction) -> Option<(DurationType, u8)> {
    for kind in SIMPLE_TYPES {
        let base = kind.quarter_length()?;
        let mut length = base;
        let mut addition = base;
        for dots in 0..=MAX_DOTS {
            if length == quarter_length {
                return Some((kind, dots));
            }
            addition = addition * Fraction::new(1u64, 2u64);
            length = length + addition;
        }
    }
    None
}
