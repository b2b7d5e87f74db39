//! Composition buffer holding the syllable being typed.
//!
//! The buffer keeps three named slots (leading, vowel, trailing) and an
//! overflow run of jamo appended after the slots were closed. `push` applies
//! the orthographic combination rules; `pop` undoes one jamo at a time,
//! which is all backspace needs.

use crate::jamo::{self, JamoClass, SyllableParts};
use crate::HangulError;

/// In-progress syllable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionBuffer {
    parts: SyllableParts,
    overflow: Vec<u32>,
}

impl CompositionBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a jamo to the buffer.
    ///
    /// Returns `false` and leaves the buffer untouched when the jamo cannot
    /// be placed; the caller then commits this buffer and starts a new one.
    pub fn push(&mut self, jamo: u32) -> bool {
        self.try_push(jamo).unwrap_or(false)
    }

    /// Like [`push`](Self::push), but a code point that is not a combining
    /// jamo at all is an error instead of a plain rejection.
    pub fn try_push(&mut self, jamo: u32) -> Result<bool, HangulError> {
        let class = jamo::classify(jamo);
        if !matches!(class, JamoClass::Leading | JamoClass::Vowel | JamoClass::Trailing) {
            return Err(HangulError::InvalidJamo(jamo));
        }
        if !self.overflow.is_empty() {
            return Ok(false);
        }
        Ok(match class {
            JamoClass::Leading => self.push_leading(jamo),
            JamoClass::Vowel => self.push_vowel(jamo),
            _ => self.push_trailing(jamo),
        })
    }

    fn push_leading(&mut self, jamo: u32) -> bool {
        let parts = &mut self.parts;
        if parts.leading == 0 {
            parts.leading = jamo;
            return true;
        }
        if parts.vowel == 0 {
            return match jamo::combine_leading(parts.leading, jamo) {
                0 => false,
                combined => {
                    parts.leading = combined;
                    true
                }
            };
        }
        match jamo::leading_to_trailing(jamo) {
            0 => false,
            trailing => self.push_trailing(trailing),
        }
    }

    fn push_vowel(&mut self, jamo: u32) -> bool {
        let parts = &mut self.parts;
        if parts.vowel == 0 {
            parts.vowel = jamo;
            return true;
        }
        // once the syllable is closed a vowel belongs to the next one
        if parts.trailing != 0 {
            return false;
        }
        match jamo::combine_vowel(parts.vowel, jamo) {
            0 => false,
            combined => {
                parts.vowel = combined;
                true
            }
        }
    }

    fn push_trailing(&mut self, jamo: u32) -> bool {
        let parts = &mut self.parts;
        if parts.trailing == 0 {
            parts.trailing = jamo;
            return true;
        }
        match jamo::combine_trailing(parts.trailing, jamo) {
            0 => false,
            combined => {
                parts.trailing = combined;
                true
            }
        }
    }

    /// Append a jamo after the slots without combining it.
    ///
    /// Only valid jamo are accepted, and only once the buffer holds
    /// something; afterwards `push` refuses further input so the slot
    /// contents always precede the overflow run.
    pub fn push_overflow(&mut self, jamo: u32) -> bool {
        if self.is_empty() || !jamo::is_jamo(jamo) {
            return false;
        }
        self.overflow.push(jamo);
        true
    }

    /// Remove the most recently placed jamo. Returns 0 on an empty buffer.
    pub fn pop(&mut self) -> u32 {
        if let Some(jamo) = self.overflow.pop() {
            return jamo;
        }
        let parts = &mut self.parts;
        for slot in [&mut parts.trailing, &mut parts.vowel, &mut parts.leading] {
            if *slot != 0 {
                return std::mem::take(slot);
            }
        }
        0
    }

    /// Remove the trailing consonant (or the last component of a cluster)
    /// and return it as a leading consonant. Returns 0 if there is nothing
    /// that could open a new syllable.
    pub fn detach_trailing(&mut self) -> u32 {
        if !self.overflow.is_empty() {
            return 0;
        }
        match jamo::split_trailing(self.parts.trailing) {
            Some((kept, leading)) => {
                self.parts.trailing = kept;
                leading
            }
            None => 0,
        }
    }

    /// Precomposed syllable for the slots, or 0 when leading or vowel is
    /// missing or any slot is not conjoinable.
    pub fn build_syllable(&self) -> u32 {
        if self.parts.leading == 0 || self.parts.vowel == 0 {
            return 0;
        }
        jamo::compose_parts(&self.parts)
    }

    /// Slots in leading, vowel, trailing order, then the overflow run.
    pub fn jamo_sequence(&self) -> Vec<u32> {
        self.parts.jamo().chain(self.overflow.iter().copied()).collect()
    }

    /// Number of jamo held.
    pub fn len(&self) -> usize {
        self.parts.jamo().count() + self.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.overflow.is_empty()
    }

    pub fn clear(&mut self) {
        self.parts = SyllableParts::default();
        self.overflow.clear();
    }

    pub fn parts(&self) -> SyllableParts {
        self.parts
    }

    pub fn overflow(&self) -> &[u32] {
        &self.overflow
    }

    pub fn has_leading(&self) -> bool {
        self.parts.leading != 0
    }

    pub fn has_vowel(&self) -> bool {
        self.parts.vowel != 0
    }

    pub fn has_trailing(&self) -> bool {
        self.parts.trailing != 0
    }

    /// Slots hold jamo of the right class and the overflow only jamo.
    pub fn is_consistent(&self) -> bool {
        self.validate().is_ok()
    }

    /// Like [`is_consistent`](Self::is_consistent), describing the first
    /// misplaced code point.
    pub fn validate(&self) -> Result<(), HangulError> {
        let slots = [
            (self.parts.leading, JamoClass::Leading),
            (self.parts.vowel, JamoClass::Vowel),
            (self.parts.trailing, JamoClass::Trailing),
        ];
        if let Some(&(c, class)) = slots
            .iter()
            .find(|&&(c, class)| c != 0 && jamo::classify(c) != class)
        {
            return Err(HangulError::InconsistentState(format!(
                "{:?} slot holds U+{:04X}",
                class, c
            )));
        }
        match self.overflow.iter().find(|&&c| !jamo::is_jamo(c)) {
            Some(&c) => Err(HangulError::InconsistentState(format!(
                "overflow holds U+{:04X}",
                c
            ))),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&mut self, parts: SyllableParts) {
        self.parts = parts;
    }
}
