//! CJK compatibility ideographs.
//!
//! Korean legacy encodings assigned separate code points to Hanja that share
//! a shape but differ in reading (樂 as 낙/락/악, for instance). Unicode keeps
//! them in the compatibility blocks with canonical decompositions to the
//! unified ideographs, so NFC on each character is enough to fold them.

use unicode_normalization::UnicodeNormalization;

fn is_compatibility_ideograph(c: char) -> bool {
    matches!(c as u32, 0xF900..=0xFAFF | 0x2F800..=0x2FA1F)
}

/// Replace compatibility ideographs with their unified forms. Everything
/// else is returned unchanged, including Hangul and already-unified Hanja.
pub fn to_unified_form(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_compatibility_ideograph(c) {
            out.extend(std::iter::once(c).nfc());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_compatibility_block() {
        assert_eq!(to_unified_form("\u{F900}"), "\u{8C48}");
        assert_eq!(to_unified_form("\u{F914}"), "\u{6A02}");
        assert_eq!(to_unified_form("\u{2F800}"), "\u{4E3D}");
    }

    #[test]
    fn leaves_other_text_alone() {
        assert_eq!(to_unified_form("韓國 한국"), "韓國 한국");
        assert_eq!(to_unified_form("\u{1100}\u{1161}"), "\u{1100}\u{1161}");
    }
}
