//! libhangul crate root
//!
//! The facade most hosts depend on. It re-exports the input context and
//! jamo algebra from `libhangul-core` and the Hanja dictionary from
//! `libhanja`, and adds a few whole-string helpers.
//!
//! Public API exported here:
//! - `InputContext`, `Config`, `KeyboardRegistry` and friends from core
//! - `HanjaTable`, `Hanja`, `HanjaList` from libhanja
//! - `HangulConfig` from `config`
//! - text helpers: `is_hangul_syllable`, `decompose_text`, `compose_text`,
//!   `process_text`

pub mod config;

pub use config::HangulConfig;

pub use libhangul_core::normalize;
pub use libhangul_core::{
    classify, compose, decompose, from_compatibility_form, is_conjoinable, leading_to_trailing,
    to_compatibility_form, CompositionBuffer, Config, HangulError, InputContext, JamoClass,
    JamoUsage, KeyEvent, KeyOutcome, Keyboard, KeyboardRegistry, OutputMode, SyllableParts,
    KEY_BACKSPACE, KEY_DELETE,
};
pub use libhanja::{to_unified_form, Hanja, HanjaList, HanjaTable, MatchKind};

/// True for precomposed syllables U+AC00..=U+D7A3.
pub fn is_hangul_syllable(c: char) -> bool {
    classify(c as u32) == JamoClass::Syllable
}

/// Replace every precomposed syllable with its conjoining jamo. Other
/// characters are copied unchanged.
pub fn decompose_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        if !is_hangul_syllable(c) {
            out.push(c);
            continue;
        }
        for jamo in decompose(c as u32).jamo() {
            if let Some(ch) = char::from_u32(jamo) {
                out.push(ch);
            }
        }
    }
    out
}

/// Compose runs of conjoining jamo (leading, vowel, optional trailing) into
/// precomposed syllables. Jamo that do not form a modern syllable, and all
/// other characters, are copied unchanged.
pub fn compose_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let leading = chars[i] as u32;
        let vowel = chars.get(i + 1).map(|&c| c as u32).unwrap_or(0);
        let syllable = compose(leading, vowel, 0);
        if syllable == 0 {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let trailing = chars.get(i + 2).map(|&c| c as u32).unwrap_or(0);
        let with_tail = compose(leading, vowel, trailing);
        let (composed, used) = if trailing != 0 && with_tail != 0 {
            (with_tail, 3)
        } else {
            (syllable, 2)
        };
        if let Some(ch) = char::from_u32(composed) {
            out.push(ch);
        }
        i += used;
    }
    out
}

/// Feed every character of `keys` to `ctx` and return everything committed,
/// flushing the composition at the end.
pub fn process_text(ctx: &mut InputContext, keys: &str) -> String {
    for key in keys.chars() {
        ctx.process(key as u32);
    }
    normalize::to_string(&ctx.flush())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_check() {
        assert!(is_hangul_syllable('가'));
        assert!(is_hangul_syllable('힣'));
        assert!(!is_hangul_syllable('ㄱ'));
        assert!(!is_hangul_syllable('\u{1100}'));
        assert!(!is_hangul_syllable('a'));
    }

    #[test]
    fn decompose_then_compose() {
        let jamo = decompose_text("한글 abc");
        assert_eq!(jamo, "\u{1112}\u{1161}\u{11AB}\u{1100}\u{1173}\u{11AF} abc");
        assert_eq!(compose_text(&jamo), "한글 abc");
    }

    #[test]
    fn compose_leaves_incomplete_jamo() {
        assert_eq!(compose_text("\u{1100}"), "\u{1100}");
        assert_eq!(compose_text("\u{1161}\u{1100}"), "\u{1161}\u{1100}");
        assert_eq!(compose_text("\u{1100}\u{1161}\u{1100}\u{1161}"), "가가");
    }

    #[test]
    fn process_text_flushes() {
        let mut ctx = InputContext::new();
        ctx.set_idiomatic_input(true);
        assert_eq!(process_text(&mut ctx, "dkssud"), "안녕");
        assert!(ctx.is_empty());
    }
}
