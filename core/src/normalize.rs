//! Unicode normalization helpers for committed text.
//!
//! The engine works on code points; hosts usually want strings. These
//! helpers bridge the two and apply NFC/NFD through `unicode-normalization`.
//! A run of conjoining jamo such as `ᄀ ᅡ ᆫ` becomes `간` under NFC.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{is_nfc, is_nfd, UnicodeNormalization};

/// Characters that are unsafe in file names on at least one common platform.
static FILENAME_FORBIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[/\\:*?"<>|\x00-\x1F\x7F]"#).expect("filename pattern compiles")
});

/// Which normalization form a string is already in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationReport {
    pub is_nfc: bool,
    pub is_nfd: bool,
    pub form: NormalizationForm,
}

/// Report the normalization state of `text`. Text that is both NFC and NFD
/// (plain ASCII, for instance) reports `Nfc`.
pub fn analyze(text: &str) -> NormalizationReport {
    let nfc = is_nfc(text);
    let nfd = is_nfd(text);
    let form = match (nfc, nfd) {
        (true, _) => NormalizationForm::Nfc,
        (false, true) => NormalizationForm::Nfd,
        (false, false) => NormalizationForm::Mixed,
    };
    NormalizationReport {
        is_nfc: nfc,
        is_nfd: nfd,
        form,
    }
}

/// Render code points as a string; values that are not scalar values
/// become U+FFFD.
pub fn to_string(code_points: &[u32]) -> String {
    code_points
        .iter()
        .map(|&c| char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

pub fn to_code_points(text: &str) -> Vec<u32> {
    text.chars().map(|c| c as u32).collect()
}

/// NFC over code points.
pub fn to_nfc(code_points: &[u32]) -> Vec<u32> {
    to_code_points(&to_string(code_points).nfc().collect::<String>())
}

/// NFD over code points.
pub fn to_nfd(code_points: &[u32]) -> Vec<u32> {
    to_code_points(&to_string(code_points).nfd().collect::<String>())
}

/// NFC, then strip path separators, reserved punctuation and control
/// characters so the result can be used as a file name.
pub fn normalize_for_filename(text: &str) -> String {
    let composed: String = text.nfc().collect();
    strip_filename_unsafe(&composed)
}

/// Remove the characters `normalize_for_filename` rejects, without
/// normalizing.
pub fn strip_filename_unsafe(text: &str) -> String {
    FILENAME_FORBIDDEN.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composes_conjoining_jamo() {
        assert_eq!(to_nfc(&[0x1100, 0x1161, 0x11AB]), vec![0xAC04]);
        assert_eq!(to_nfc(&[0x1100]), vec![0x1100]);
        assert_eq!(to_nfc(&['a' as u32, 0xAC00]), vec!['a' as u32, 0xAC00]);
    }

    #[test]
    fn test_nfd_decomposes_syllables() {
        assert_eq!(to_nfd(&[0xD55C]), vec![0x1112, 0x1161, 0x11AB]);
    }

    #[test]
    fn test_analyze() {
        let composed = analyze("한글");
        assert!(composed.is_nfc);
        assert!(!composed.is_nfd);
        assert_eq!(composed.form, NormalizationForm::Nfc);

        let decomposed = analyze("\u{1112}\u{1161}\u{11AB}");
        assert_eq!(decomposed.form, NormalizationForm::Nfd);

        let mixed = analyze("한\u{1112}\u{1161}\u{11AB}");
        assert_eq!(mixed.form, NormalizationForm::Mixed);
    }

    #[test]
    fn test_filename_sanitizing() {
        assert_eq!(normalize_for_filename("a/b\\c:d*e?f\"g<h>i|j"), "abcdefghij");
        assert_eq!(normalize_for_filename("\u{1112}\u{1161}\u{11AB}.txt"), "한.txt");
        assert_eq!(normalize_for_filename(" 문서\u{0007} "), " 문서 ");
    }

    #[test]
    fn test_strip_keeps_decomposed_jamo() {
        assert_eq!(strip_filename_unsafe("\u{1100}\u{1161}/"), "\u{1100}\u{1161}");
    }

    #[test]
    fn test_to_string_replaces_invalid() {
        assert_eq!(to_string(&[0xAC00, 0xD800]), "가\u{FFFD}");
    }
}
