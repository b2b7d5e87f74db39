//! Static jamo tables.
//!
//! Single-key tables are compile-time `phf` maps. Pair tables (combination
//! rules) are keyed by `(first, second)` and built once on first use.
//! Nothing here is mutated after initialization.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use phf::phf_map;

/// Combining jamo → compatibility jamo.
pub(crate) static TO_COMPATIBILITY: phf::Map<u32, u32> = phf_map! {
    // leading consonants
    0x1100u32 => 0x3131, 0x1101u32 => 0x3132, 0x1102u32 => 0x3134,
    0x1103u32 => 0x3137, 0x1104u32 => 0x3138, 0x1105u32 => 0x3139,
    0x1106u32 => 0x3141, 0x1107u32 => 0x3142, 0x1108u32 => 0x3143,
    0x1109u32 => 0x3145, 0x110Au32 => 0x3146, 0x110Bu32 => 0x3147,
    0x110Cu32 => 0x3148, 0x110Du32 => 0x3149, 0x110Eu32 => 0x314A,
    0x110Fu32 => 0x314B, 0x1110u32 => 0x314C, 0x1111u32 => 0x314D,
    0x1112u32 => 0x314E,
    // vowel filler and vowels
    0x1160u32 => 0x3164,
    0x1161u32 => 0x314F, 0x1162u32 => 0x3150, 0x1163u32 => 0x3151,
    0x1164u32 => 0x3152, 0x1165u32 => 0x3153, 0x1166u32 => 0x3154,
    0x1167u32 => 0x3155, 0x1168u32 => 0x3156, 0x1169u32 => 0x3157,
    0x116Au32 => 0x3158, 0x116Bu32 => 0x3159, 0x116Cu32 => 0x315A,
    0x116Du32 => 0x315B, 0x116Eu32 => 0x315C, 0x116Fu32 => 0x315D,
    0x1170u32 => 0x315E, 0x1171u32 => 0x315F, 0x1172u32 => 0x3160,
    0x1173u32 => 0x3161, 0x1174u32 => 0x3162, 0x1175u32 => 0x3163,
    // trailing consonants
    0x11A8u32 => 0x3131, 0x11A9u32 => 0x3132, 0x11AAu32 => 0x3133,
    0x11ABu32 => 0x3134, 0x11ACu32 => 0x3135, 0x11ADu32 => 0x3136,
    0x11AEu32 => 0x3137, 0x11AFu32 => 0x3139, 0x11B0u32 => 0x313A,
    0x11B1u32 => 0x313B, 0x11B2u32 => 0x313C, 0x11B3u32 => 0x313D,
    0x11B4u32 => 0x313E, 0x11B5u32 => 0x313F, 0x11B6u32 => 0x3140,
    0x11B7u32 => 0x3141, 0x11B8u32 => 0x3142, 0x11B9u32 => 0x3144,
    0x11BAu32 => 0x3145, 0x11BBu32 => 0x3146, 0x11BCu32 => 0x3147,
    0x11BDu32 => 0x3148, 0x11BEu32 => 0x314A, 0x11BFu32 => 0x314B,
    0x11C0u32 => 0x314C, 0x11C1u32 => 0x314D, 0x11C2u32 => 0x314E,
};

/// Compatibility consonant → leading consonant. Compound clusters
/// (ㄳ, ㄺ, ...) have no leading form and are absent.
pub(crate) static COMPATIBILITY_TO_LEADING: phf::Map<u32, u32> = phf_map! {
    0x3131u32 => 0x1100, 0x3132u32 => 0x1101, 0x3134u32 => 0x1102,
    0x3137u32 => 0x1103, 0x3138u32 => 0x1104, 0x3139u32 => 0x1105,
    0x3141u32 => 0x1106, 0x3142u32 => 0x1107, 0x3143u32 => 0x1108,
    0x3145u32 => 0x1109, 0x3146u32 => 0x110A, 0x3147u32 => 0x110B,
    0x3148u32 => 0x110C, 0x3149u32 => 0x110D, 0x314Au32 => 0x110E,
    0x314Bu32 => 0x110F, 0x314Cu32 => 0x1110, 0x314Du32 => 0x1111,
    0x314Eu32 => 0x1112,
};

/// Compatibility consonant → trailing consonant. ㄸ, ㅃ and ㅉ never close
/// a syllable and are absent.
pub(crate) static COMPATIBILITY_TO_TRAILING: phf::Map<u32, u32> = phf_map! {
    0x3131u32 => 0x11A8, 0x3132u32 => 0x11A9, 0x3133u32 => 0x11AA,
    0x3134u32 => 0x11AB, 0x3135u32 => 0x11AC, 0x3136u32 => 0x11AD,
    0x3137u32 => 0x11AE, 0x3139u32 => 0x11AF, 0x313Au32 => 0x11B0,
    0x313Bu32 => 0x11B1, 0x313Cu32 => 0x11B2, 0x313Du32 => 0x11B3,
    0x313Eu32 => 0x11B4, 0x313Fu32 => 0x11B5, 0x3140u32 => 0x11B6,
    0x3141u32 => 0x11B7, 0x3142u32 => 0x11B8, 0x3144u32 => 0x11B9,
    0x3145u32 => 0x11BA, 0x3146u32 => 0x11BB, 0x3147u32 => 0x11BC,
    0x3148u32 => 0x11BD, 0x314Au32 => 0x11BE, 0x314Bu32 => 0x11BF,
    0x314Cu32 => 0x11C0, 0x314Du32 => 0x11C1, 0x314Eu32 => 0x11C2,
};

/// Leading consonant → trailing consonant with the same sound.
pub(crate) static LEADING_TO_TRAILING: phf::Map<u32, u32> = phf_map! {
    0x1100u32 => 0x11A8, 0x1101u32 => 0x11A9, 0x1102u32 => 0x11AB,
    0x1103u32 => 0x11AE, 0x1105u32 => 0x11AF, 0x1106u32 => 0x11B7,
    0x1107u32 => 0x11B8, 0x1109u32 => 0x11BA, 0x110Au32 => 0x11BB,
    0x110Bu32 => 0x11BC, 0x110Cu32 => 0x11BD, 0x110Eu32 => 0x11BE,
    0x110Fu32 => 0x11BF, 0x1110u32 => 0x11C0, 0x1111u32 => 0x11C1,
    0x1112u32 => 0x11C2,
};

/// Simple trailing consonant → leading consonant.
pub(crate) static TRAILING_TO_LEADING: phf::Map<u32, u32> = phf_map! {
    0x11A8u32 => 0x1100, 0x11A9u32 => 0x1101, 0x11ABu32 => 0x1102,
    0x11AEu32 => 0x1103, 0x11AFu32 => 0x1105, 0x11B7u32 => 0x1106,
    0x11B8u32 => 0x1107, 0x11BAu32 => 0x1109, 0x11BBu32 => 0x110A,
    0x11BCu32 => 0x110B, 0x11BDu32 => 0x110C, 0x11BEu32 => 0x110E,
    0x11BFu32 => 0x110F, 0x11C0u32 => 0x1110, 0x11C1u32 => 0x1111,
    0x11C2u32 => 0x1112,
};

/// Compound trailing consonant → (remaining trailing, detached leading).
pub(crate) static SPLIT_TRAILING: phf::Map<u32, (u32, u32)> = phf_map! {
    0x11AAu32 => (0x11A8, 0x1109), // ㄳ
    0x11ACu32 => (0x11AB, 0x110C), // ㄵ
    0x11ADu32 => (0x11AB, 0x1112), // ㄶ
    0x11B0u32 => (0x11AF, 0x1100), // ㄺ
    0x11B1u32 => (0x11AF, 0x1106), // ㄻ
    0x11B2u32 => (0x11AF, 0x1107), // ㄼ
    0x11B3u32 => (0x11AF, 0x1109), // ㄽ
    0x11B4u32 => (0x11AF, 0x1110), // ㄾ
    0x11B5u32 => (0x11AF, 0x1111), // ㄿ
    0x11B6u32 => (0x11AF, 0x1112), // ㅀ
    0x11B9u32 => (0x11B8, 0x1109), // ㅄ
};

type PairTable = AHashMap<(u32, u32), u32>;

fn pair_table(entries: &[(u32, u32, u32)]) -> PairTable {
    entries
        .iter()
        .map(|&(first, second, combined)| ((first, second), combined))
        .collect()
}

/// Tense consonants typed as a doubled leading consonant.
pub(crate) static LEADING_COMBINATIONS: Lazy<PairTable> = Lazy::new(|| {
    pair_table(&[
        (0x1100, 0x1100, 0x1101), // ㄱㄱ → ㄲ
        (0x1103, 0x1103, 0x1104), // ㄷㄷ → ㄸ
        (0x1107, 0x1107, 0x1108), // ㅂㅂ → ㅃ
        (0x1109, 0x1109, 0x110A), // ㅅㅅ → ㅆ
        (0x110C, 0x110C, 0x110D), // ㅈㅈ → ㅉ
    ])
});

/// Diphthong fusion.
pub(crate) static VOWEL_COMBINATIONS: Lazy<PairTable> = Lazy::new(|| {
    pair_table(&[
        (0x1169, 0x1161, 0x116A), // ㅗㅏ → ㅘ
        (0x1169, 0x1162, 0x116B), // ㅗㅐ → ㅙ
        (0x1169, 0x1175, 0x116C), // ㅗㅣ → ㅚ
        (0x116E, 0x1165, 0x116F), // ㅜㅓ → ㅝ
        (0x116E, 0x1166, 0x1170), // ㅜㅔ → ㅞ
        (0x116E, 0x1175, 0x1171), // ㅜㅣ → ㅟ
        (0x1173, 0x1175, 0x1174), // ㅡㅣ → ㅢ
    ])
});

/// Consonant clusters in the trailing position.
pub(crate) static TRAILING_COMBINATIONS: Lazy<PairTable> = Lazy::new(|| {
    pair_table(&[
        (0x11A8, 0x11BA, 0x11AA), // ㄱㅅ → ㄳ
        (0x11AB, 0x11BD, 0x11AC), // ㄴㅈ → ㄵ
        (0x11AB, 0x11C2, 0x11AD), // ㄴㅎ → ㄶ
        (0x11AF, 0x11A8, 0x11B0), // ㄹㄱ → ㄺ
        (0x11AF, 0x11B7, 0x11B1), // ㄹㅁ → ㄻ
        (0x11AF, 0x11B8, 0x11B2), // ㄹㅂ → ㄼ
        (0x11AF, 0x11BA, 0x11B3), // ㄹㅅ → ㄽ
        (0x11AF, 0x11C0, 0x11B4), // ㄹㅌ → ㄾ
        (0x11AF, 0x11C1, 0x11B5), // ㄹㅍ → ㄿ
        (0x11AF, 0x11C2, 0x11B6), // ㄹㅎ → ㅀ
        (0x11B8, 0x11BA, 0x11B9), // ㅂㅅ → ㅄ
    ])
});
