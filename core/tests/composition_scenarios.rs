//! End-to-end composition scenarios on the dubeolsik layout.
//!
//! Covers:
//! - the basic keystroke scenarios (commit, idiomatic trailing consonant,
//!   literals, backspace, buffer limit, flush of an incomplete syllable)
//! - algebra properties (round trip, invalid composition)
//! - buffer rejection and push/pop symmetry

use libhangul_core::{
    compose, decompose, CompositionBuffer, Config, InputContext, JamoClass, KeyboardRegistry,
    OutputMode, SyllableParts,
};
use std::sync::Arc;

fn keys(ctx: &mut InputContext, input: &str) {
    for key in input.chars() {
        assert!(ctx.process(key as u32), "key {:?} not handled", key);
    }
}

#[test]
fn rk_commits_ga() {
    let mut ctx = InputContext::new();
    keys(&mut ctx, "rk");
    assert_eq!(ctx.take_commit(), vec![0xAC00]);
}

#[test]
fn rks_with_idiomatic_input_commits_gan() {
    let mut config = Config::default();
    config.idiomatic_input = true;
    let mut ctx = InputContext::with_config(config).unwrap();
    keys(&mut ctx, "rks");
    assert_eq!(ctx.take_commit(), vec![0xAC04]);
    assert!(ctx.preedit().is_empty());
}

#[test]
fn unmapped_character_passes_through() {
    let mut ctx = InputContext::new();
    assert!(ctx.process('[' as u32));
    assert_eq!(ctx.take_commit(), vec!['[' as u32]);
}

#[test]
fn backspace_after_single_consonant_leaves_nothing() {
    let mut ctx = InputContext::new();
    ctx.process('r' as u32);
    assert!(ctx.backspace());
    assert!(ctx.buffer().is_empty());
    assert!(ctx.preedit().is_empty());
    assert!(ctx.take_commit().is_empty());
}

#[test]
fn buffer_limit_of_one_commits_each_consonant() {
    let mut config = Config::default();
    config.max_buffer_size = 1;
    let mut ctx = InputContext::with_config(config).unwrap();
    keys(&mut ctx, "rs");
    let committed = ctx.flush();
    assert_eq!(committed, vec![0x1100, 0x1102]);
}

#[test]
fn flush_returns_lone_leading_consonant() {
    let mut ctx = InputContext::new();
    ctx.process('r' as u32);
    assert_eq!(ctx.flush(), vec![0x1100]);
}

#[test]
fn delete_key_acts_like_backspace() {
    let mut ctx = InputContext::new();
    ctx.process('r' as u32);
    assert!(ctx.process(0x7F));
    assert!(ctx.is_empty());
}

#[test]
fn jamo_mode_flush_is_decomposed() {
    let mut config = Config::default();
    config.output_mode = OutputMode::Jamo;
    let mut ctx = InputContext::with_config(config).unwrap();
    keys(&mut ctx, "gks");
    assert_eq!(ctx.flush(), vec![0x1112, 0x1161, 0x1102]);
}

#[test]
fn contexts_share_one_registry() {
    let registry = Arc::new(KeyboardRegistry::with_builtin());
    let mut first = InputContext::with_registry(registry.clone(), Config::default()).unwrap();
    let mut second = InputContext::with_registry(registry, Config::default()).unwrap();
    second.set_keyboard("3").unwrap();

    keys(&mut first, "rk");
    keys(&mut second, "kf");
    assert_eq!(first.take_commit(), second.take_commit());
}

#[test]
fn unknown_default_keyboard_is_an_error() {
    let mut config = Config::default();
    config.default_keyboard = "missing".into();
    assert!(InputContext::with_config(config).is_err());
}

#[test]
fn compose_decompose_round_trip() {
    for leading in 0x1100..=0x1112 {
        for vowel in 0x1161..=0x1175 {
            for trailing in std::iter::once(0).chain(0x11A8..=0x11C2) {
                let syllable = compose(leading, vowel, trailing);
                assert_eq!(
                    decompose(syllable),
                    SyllableParts::new(leading, vowel, trailing)
                );
            }
        }
    }
}

#[test]
fn compose_with_non_conjoinable_input_is_zero() {
    for trailing in [0, 0x11A8, 0x11C2] {
        assert_eq!(compose(0x1161, 0x1161, trailing), 0);
        assert_eq!(compose(0x1100, 0x11A8, trailing), 0);
        assert_eq!(compose(0x115F, 0x1161, trailing), 0);
    }
}

#[test]
fn rejected_push_keeps_sequence() {
    let mut buffer = CompositionBuffer::new();
    buffer.push(0x1100);
    buffer.push(0x1161);
    buffer.push(0x11AB);
    let before = buffer.jamo_sequence();
    assert!(!buffer.push(0x1161));
    assert!(!buffer.push(0x11AF));
    assert_eq!(buffer.jamo_sequence(), before);
}

#[test]
fn push_then_pop_undoes_one_step() {
    let mut buffer = CompositionBuffer::new();
    buffer.push(0x1100);
    let after_leading = buffer.jamo_sequence();
    buffer.push(0x1161);
    buffer.pop();
    assert_eq!(buffer.jamo_sequence(), after_leading);
}

#[test]
fn classification_of_mixed_text() {
    let classes: Vec<JamoClass> = "ᄀ한ㄱa"
        .chars()
        .map(|c| libhangul_core::classify(c as u32))
        .collect();
    assert_eq!(
        classes,
        vec![
            JamoClass::Leading,
            JamoClass::Syllable,
            JamoClass::Compatibility,
            JamoClass::Other
        ]
    );
}

#[test]
fn buffer_limit_keeps_consonant_and_vowel_apart() {
    let mut config = Config::default();
    config.max_buffer_size = 1;
    let mut ctx = InputContext::with_config(config).unwrap();
    keys(&mut ctx, "rk");
    assert_eq!(ctx.flush(), vec![0x1100, 0x1161]);
}
