//! Hangul character algebra.
//!
//! Classification of Unicode Hangul code points and the syllable encoding
//! arithmetic. This is the only module that knows the numeric layout of the
//! Hangul blocks; everything else asks these functions.
//!
//! Code points are plain `u32` values with `0` meaning "absent", so a
//! syllable without a trailing consonant is `SyllableParts { trailing: 0, .. }`.

use crate::tables;
use serde::{Deserialize, Serialize};

/// First precomposed syllable (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Last precomposed syllable (힣).
pub const SYLLABLE_LAST: u32 = 0xD7A3;
/// First conjoinable leading consonant (ᄀ).
pub const LEADING_BASE: u32 = 0x1100;
/// First conjoinable vowel (ᅡ).
pub const VOWEL_BASE: u32 = 0x1161;
/// One below the first conjoinable trailing consonant.
pub const TRAILING_BASE: u32 = 0x11A7;

pub const LEADING_COUNT: u32 = 19;
pub const VOWEL_COUNT: u32 = 21;
pub const TRAILING_COUNT: u32 = 28;

pub const LEADING_FILLER: u32 = 0x115F;
pub const VOWEL_FILLER: u32 = 0x1160;

/// Classification of a code point, derived from its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JamoClass {
    Leading,
    Vowel,
    Trailing,
    Syllable,
    Compatibility,
    Other,
}

/// Position a compatibility jamo is meant to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JamoUsage {
    Leading,
    Vowel,
    Trailing,
}

/// Classify a code point by range membership.
pub fn classify(c: u32) -> JamoClass {
    match c {
        0x1100..=0x115F | 0xA960..=0xA97C => JamoClass::Leading,
        0x1160..=0x11A7 | 0xD7B0..=0xD7C6 => JamoClass::Vowel,
        0x11A8..=0x11FF | 0xD7CB..=0xD7FB => JamoClass::Trailing,
        SYLLABLE_BASE..=SYLLABLE_LAST => JamoClass::Syllable,
        0x3131..=0x318E => JamoClass::Compatibility,
        _ => JamoClass::Other,
    }
}

/// Whether `c` is a canonical combining jamo of `class` that the syllable
/// formula accepts. Fillers and archaic jamo are not conjoinable.
pub fn is_conjoinable(c: u32, class: JamoClass) -> bool {
    match class {
        JamoClass::Leading => (LEADING_BASE..LEADING_BASE + LEADING_COUNT).contains(&c),
        JamoClass::Vowel => (VOWEL_BASE..VOWEL_BASE + VOWEL_COUNT).contains(&c),
        JamoClass::Trailing => (TRAILING_BASE + 1..TRAILING_BASE + TRAILING_COUNT).contains(&c),
        _ => false,
    }
}

pub fn is_jamo(c: u32) -> bool {
    matches!(
        classify(c),
        JamoClass::Leading | JamoClass::Vowel | JamoClass::Trailing
    )
}

pub fn is_syllable(c: u32) -> bool {
    classify(c) == JamoClass::Syllable
}

/// The three positions of a syllable block. `0` marks an empty position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SyllableParts {
    pub leading: u32,
    pub vowel: u32,
    pub trailing: u32,
}

impl SyllableParts {
    pub fn new(leading: u32, vowel: u32, trailing: u32) -> Self {
        Self { leading, vowel, trailing }
    }

    pub fn is_empty(&self) -> bool {
        self.leading == 0 && self.vowel == 0 && self.trailing == 0
    }

    /// Every occupied position holds a jamo of the matching class.
    pub fn is_valid(&self) -> bool {
        let fits = |c: u32, class: JamoClass| c == 0 || classify(c) == class;
        fits(self.leading, JamoClass::Leading)
            && fits(self.vowel, JamoClass::Vowel)
            && fits(self.trailing, JamoClass::Trailing)
    }

    /// Occupied positions in leading, vowel, trailing order.
    pub fn jamo(&self) -> impl Iterator<Item = u32> {
        [self.leading, self.vowel, self.trailing]
            .into_iter()
            .filter(|&c| c != 0)
    }
}

/// Encode a syllable. Returns 0 unless leading and vowel are conjoinable and
/// a non-zero trailing is conjoinable too.
pub fn compose(leading: u32, vowel: u32, trailing: u32) -> u32 {
    if !is_conjoinable(leading, JamoClass::Leading) || !is_conjoinable(vowel, JamoClass::Vowel) {
        return 0;
    }
    let trailing_index = if trailing == 0 {
        0
    } else if is_conjoinable(trailing, JamoClass::Trailing) {
        trailing - TRAILING_BASE
    } else {
        return 0;
    };

    let leading_index = leading - LEADING_BASE;
    let vowel_index = vowel - VOWEL_BASE;
    SYLLABLE_BASE + (leading_index * VOWEL_COUNT + vowel_index) * TRAILING_COUNT + trailing_index
}

/// Compose from a parts triple; invalid parts yield 0.
pub fn compose_parts(parts: &SyllableParts) -> u32 {
    if !parts.is_valid() {
        return 0;
    }
    compose(parts.leading, parts.vowel, parts.trailing)
}

/// Split a precomposed syllable into its jamo. Anything outside the syllable
/// block decomposes to empty parts.
pub fn decompose(syllable: u32) -> SyllableParts {
    if !is_syllable(syllable) {
        return SyllableParts::default();
    }
    let index = syllable - SYLLABLE_BASE;
    let trailing_index = index % TRAILING_COUNT;
    let vowel_index = (index / TRAILING_COUNT) % VOWEL_COUNT;
    let leading_index = index / (TRAILING_COUNT * VOWEL_COUNT);

    SyllableParts {
        leading: LEADING_BASE + leading_index,
        vowel: VOWEL_BASE + vowel_index,
        trailing: if trailing_index == 0 {
            0
        } else {
            TRAILING_BASE + trailing_index
        },
    }
}

/// Combining jamo → compatibility jamo, or `c` itself when there is none.
pub fn to_compatibility_form(c: u32) -> u32 {
    tables::TO_COMPATIBILITY.get(&c).copied().unwrap_or(c)
}

/// Compatibility jamo → combining jamo for the given position.
///
/// Input outside the compatibility block is returned unchanged. A
/// compatibility jamo that cannot occupy `usage` (ㄳ as a leading consonant,
/// ㅏ as a trailing one) yields 0.
pub fn from_compatibility_form(c: u32, usage: JamoUsage) -> u32 {
    if classify(c) != JamoClass::Compatibility {
        return c;
    }
    let mapped = match usage {
        JamoUsage::Leading => tables::COMPATIBILITY_TO_LEADING.get(&c).copied(),
        JamoUsage::Trailing => tables::COMPATIBILITY_TO_TRAILING.get(&c).copied(),
        JamoUsage::Vowel => match c {
            0x314F..=0x3163 => Some(c - 0x314F + VOWEL_BASE),
            0x3164 => Some(VOWEL_FILLER),
            _ => None,
        },
    };
    mapped.unwrap_or(0)
}

/// Trailing consonant that sounds like the leading consonant `c`; 0 for
/// ㄸ, ㅃ, ㅉ and anything that is not a leading consonant.
pub fn leading_to_trailing(c: u32) -> u32 {
    tables::LEADING_TO_TRAILING.get(&c).copied().unwrap_or(0)
}

/// Inverse of [`leading_to_trailing`] for simple trailing consonants.
pub fn trailing_to_leading(c: u32) -> u32 {
    tables::TRAILING_TO_LEADING.get(&c).copied().unwrap_or(0)
}

/// Split a trailing consonant for reuse by the following syllable.
///
/// Returns `(kept, leading)` where `kept` stays in the current syllable (0 if
/// nothing remains) and `leading` opens the next one. `None` when `c` has
/// no leading counterpart.
pub fn split_trailing(c: u32) -> Option<(u32, u32)> {
    if let Some(&(kept, moved)) = tables::SPLIT_TRAILING.get(&c) {
        return Some((kept, moved));
    }
    match trailing_to_leading(c) {
        0 => None,
        leading => Some((0, leading)),
    }
}

pub fn combine_leading(first: u32, second: u32) -> u32 {
    tables::LEADING_COMBINATIONS.get(&(first, second)).copied().unwrap_or(0)
}

pub fn combine_vowel(first: u32, second: u32) -> u32 {
    tables::VOWEL_COMBINATIONS.get(&(first, second)).copied().unwrap_or(0)
}

pub fn combine_trailing(first: u32, second: u32) -> u32 {
    tables::TRAILING_COMBINATIONS.get(&(first, second)).copied().unwrap_or(0)
}
