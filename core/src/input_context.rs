//! Input context: the keystroke state machine.
//!
//! `InputContext` owns one `CompositionBuffer`, a FIFO commit queue and the
//! preedit derived from the buffer. Keys are mapped through the active
//! `Keyboard`; jamo drive the buffer and everything else is committed as a
//! literal after the pending composition.
//!
//! In syllable mode a syllable is committed as soon as it has a leading
//! consonant and a vowel. Until the caller drains the queue, that last entry
//! stays *open*: a trailing consonant, a fused vowel or a backspace rewrites
//! it in place. Draining seals it, and from then on it is ordinary committed
//! text. The preedit is empty while the tail is open, so nothing is shown
//! twice.
//!
//! The context is `Send` but not meant to be shared. Give each text-entry
//! session its own context; keyboards are shared through `Arc`.
//!
//! # Example
//!
//! ```rust
//! use libhangul_core::{Config, InputContext};
//!
//! let mut config = Config::default();
//! config.idiomatic_input = true;
//! let mut ctx = InputContext::with_config(config).unwrap();
//! for key in "rks".chars() {
//!     ctx.process(key as u32);
//! }
//! assert_eq!(ctx.take_commit(), vec!['간' as u32]);
//! ```

use crate::buffer::CompositionBuffer;
use crate::error::HangulError;
use crate::jamo::{self, JamoClass};
use crate::keyboard::{self, Keyboard, KeyboardRegistry};
use crate::{normalize, validate_buffer_size, Config, OutputMode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Backspace key code.
pub const KEY_BACKSPACE: u32 = 0x08;
/// Delete key code, treated like backspace.
pub const KEY_DELETE: u32 = 0x7F;

/// Key events understood by [`InputContext::process_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Printable character as typed on a QWERTY layout
    Char(char),
    /// Raw key code
    Code(u32),
    Backspace,
    Delete,
    /// Commits the composition, then inserts a space
    Space,
    /// Commits the composition; the host handles the newline
    Enter,
    /// Drops the composition and anything not yet delivered
    Escape,
}

/// What one key event changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The context consumed the key.
    pub handled: bool,
    /// Text that became final with this key.
    pub committed: Vec<u32>,
    /// Text still being composed, including a syllable that may change.
    pub preedit: Vec<u32>,
}

impl KeyOutcome {
    pub fn committed_text(&self) -> String {
        normalize::to_string(&self.committed)
    }

    pub fn preedit_text(&self) -> String {
        normalize::to_string(&self.preedit)
    }
}

/// Hangul input context.
#[derive(Debug, Clone)]
pub struct InputContext {
    registry: Arc<KeyboardRegistry>,
    keyboard: Arc<Keyboard>,
    buffer: CompositionBuffer,
    commit: Vec<u32>,
    preedit: Vec<u32>,
    config: Config,
    /// The last commit entry is the buffer's syllable and may still change.
    open_tail: bool,
}

impl InputContext {
    /// Context with the default configuration and the dubeolsik layout.
    pub fn new() -> Self {
        Self::from_parts(
            Arc::new(KeyboardRegistry::with_builtin()),
            Arc::new(keyboard::dubeolsik()),
            Config::default(),
        )
    }

    /// Context using the built-in keyboards.
    pub fn with_config(config: Config) -> Result<Self, HangulError> {
        Self::with_registry(Arc::new(KeyboardRegistry::with_builtin()), config)
    }

    /// Context drawing keyboards from a shared registry.
    pub fn with_registry(
        registry: Arc<KeyboardRegistry>,
        config: Config,
    ) -> Result<Self, HangulError> {
        config.validate()?;
        let keyboard = registry.get(&config.default_keyboard)?;
        Ok(Self::from_parts(registry, keyboard, config))
    }

    fn from_parts(registry: Arc<KeyboardRegistry>, keyboard: Arc<Keyboard>, config: Config) -> Self {
        Self {
            registry,
            keyboard,
            buffer: CompositionBuffer::new(),
            commit: Vec::new(),
            preedit: Vec::new(),
            config,
            open_tail: false,
        }
    }

    /// Process one key code.
    ///
    /// Returns `false` for keys the context does not consume: control codes,
    /// values that are not Unicode scalars, and a backspace with nothing to
    /// delete.
    pub fn process(&mut self, key: u32) -> bool {
        if !self.ensure_consistent() && !self.config.auto_error_recovery {
            return false;
        }
        if key == KEY_BACKSPACE || key == KEY_DELETE {
            return self.backspace();
        }

        let mapped = self.keyboard.map_key(key);
        let handled = if mapped == 0 {
            self.process_literal(key)
        } else if jamo::is_jamo(mapped) {
            self.process_jamo(mapped);
            true
        } else {
            self.process_literal(mapped)
        };
        self.after_mutation();
        handled
    }

    /// Process a key event and report what changed.
    ///
    /// Unlike [`take_commit`](Self::take_commit), the open syllable is
    /// reported in `preedit` and stays in the queue, so per-keystroke hosts
    /// still get trailing consonants attached to the right syllable.
    pub fn process_key(&mut self, event: KeyEvent) -> KeyOutcome {
        let handled = match event {
            KeyEvent::Char(c) => self.process(c as u32),
            KeyEvent::Code(code) => self.process(code),
            KeyEvent::Backspace | KeyEvent::Delete => self.backspace(),
            KeyEvent::Space => self.process(' ' as u32),
            KeyEvent::Enter => {
                self.commit_buffer();
                self.after_mutation();
                false
            }
            KeyEvent::Escape => {
                let pending = !self.is_empty();
                self.reset();
                pending
            }
        };

        let committed = self.take_sealed();
        let preedit = match (self.open_tail, self.commit.last()) {
            (true, Some(&syllable)) => vec![syllable],
            _ => self.preedit.clone(),
        };
        KeyOutcome {
            handled,
            committed,
            preedit,
        }
    }

    fn process_literal(&mut self, c: u32) -> bool {
        match char::from_u32(c) {
            Some(ch) if !ch.is_control() => {
                self.commit_buffer();
                self.emit(vec![c]);
                true
            }
            _ => false,
        }
    }

    fn process_jamo(&mut self, jamo: u32) {
        if self.buffer.len() + 1 > self.config.max_buffer_size {
            debug!(
                max = self.config.max_buffer_size,
                "composition buffer full, committing"
            );
            self.commit_buffer();
        }

        let jamo = self.reinterpret(jamo);
        if self.starts_new_syllable(jamo) {
            self.commit_buffer();
        }

        let before = self.buffer.build_syllable();
        if self.buffer.push(jamo) {
            self.on_buffer_changed(before);
            return;
        }

        if jamo::classify(jamo) == JamoClass::Vowel && self.reuse_trailing(jamo) {
            return;
        }
        if self.config.output_mode == OutputMode::Jamo && self.buffer.push_overflow(jamo) {
            return;
        }

        self.commit_buffer();
        if self.buffer.push(jamo) {
            self.on_buffer_changed(0);
        }
    }

    /// Idiomatic input: a consonant following a complete open syllable is
    /// read as that syllable's trailing consonant.
    fn reinterpret(&self, jamo: u32) -> u32 {
        let closes_syllable = self.config.idiomatic_input
            && jamo::classify(jamo) == JamoClass::Leading
            && self.buffer.has_leading()
            && self.buffer.has_vowel()
            && !self.buffer.has_trailing();
        if !closes_syllable {
            return jamo;
        }
        match jamo::leading_to_trailing(jamo) {
            0 => jamo,
            trailing => trailing,
        }
    }

    /// Whether a leading consonant has to open a new syllable instead of
    /// being offered to the current one.
    fn starts_new_syllable(&self, jamo: u32) -> bool {
        if jamo::classify(jamo) != JamoClass::Leading || !self.buffer.has_vowel() {
            return false;
        }
        if self.buffer.has_leading() {
            // trailing consonants only come from dedicated keys
            !self.config.idiomatic_input
        } else {
            !self.config.auto_reorder
        }
    }

    /// A vowel that does not fit after a trailing consonant takes that
    /// consonant (or the last part of a cluster) as its leading consonant.
    fn reuse_trailing(&mut self, vowel: u32) -> bool {
        if !self.config.idiomatic_input || !self.buffer.has_trailing() {
            return false;
        }
        let before = self.buffer.build_syllable();
        let leading = self.buffer.detach_trailing();
        if leading == 0 {
            return false;
        }
        self.on_buffer_changed(before);
        self.commit_buffer();

        self.buffer.push(leading);
        self.buffer.push(vowel);
        debug!(leading = leading, "trailing consonant moved to the next syllable");
        self.on_buffer_changed(0);
        true
    }

    /// Keep the commit queue in step with the buffer's syllable.
    fn on_buffer_changed(&mut self, before: u32) {
        if self.config.output_mode != OutputMode::Syllable {
            return;
        }
        let after = self.buffer.build_syllable();
        if after == 0 {
            // the open syllable fell apart; it is preedit again
            if self.open_tail {
                self.commit.pop();
                self.open_tail = false;
            }
            return;
        }
        if after == before && self.open_tail {
            return;
        }
        match self.commit.last_mut() {
            Some(last) if self.open_tail => *last = after,
            _ => {
                self.commit.push(after);
                self.open_tail = true;
            }
        }
        debug!(syllable = after, "syllable committed");
    }

    /// Move the buffer's content to the commit queue and empty the buffer.
    fn commit_buffer(&mut self) {
        if !self.buffer.is_empty() && !self.open_tail {
            let text = self.buffer_representation();
            debug!(len = text.len(), "composition committed");
            self.emit(text);
        }
        self.buffer.clear();
        self.open_tail = false;
    }

    fn buffer_representation(&self) -> Vec<u32> {
        match (self.config.output_mode, self.buffer.build_syllable()) {
            (OutputMode::Syllable, syllable) if syllable != 0 => std::iter::once(syllable)
                .chain(self.buffer.overflow().iter().copied())
                .collect(),
            _ => self.buffer.jamo_sequence(),
        }
    }

    /// Delete one jamo, or the last committed literal if nothing is
    /// composing. Committed syllables are only reachable while open.
    pub fn backspace(&mut self) -> bool {
        if !self.ensure_consistent() && !self.config.auto_error_recovery {
            return false;
        }
        let before = self.buffer.build_syllable();
        if self.buffer.pop() != 0 {
            self.on_buffer_changed(before);
            self.after_mutation();
            return true;
        }

        match self.commit.last() {
            Some(&c) if !jamo::is_syllable(c) => {
                self.commit.pop();
                self.after_mutation();
                true
            }
            _ => false,
        }
    }

    /// Drain the commit queue. An open syllable is sealed and delivered.
    pub fn take_commit(&mut self) -> Vec<u32> {
        if self.open_tail {
            self.buffer.clear();
            self.open_tail = false;
        }
        let out = std::mem::take(&mut self.commit);
        self.after_mutation();
        out
    }

    /// Drain everything before the open syllable.
    fn take_sealed(&mut self) -> Vec<u32> {
        let keep = usize::from(self.open_tail).min(self.commit.len());
        let end = self.commit.len() - keep;
        self.commit.drain(..end).collect()
    }

    /// Commit the composition and drain the queue.
    pub fn flush(&mut self) -> Vec<u32> {
        self.commit_buffer();
        let out = std::mem::take(&mut self.commit);
        self.after_mutation();
        debug!(len = out.len(), "flushed");
        out
    }

    /// Append one committed unit to the queue. Normalization applies to the
    /// unit alone; entries already queued are never rewritten.
    fn emit(&mut self, unit: Vec<u32>) {
        let unit = if self.config.force_nfc && self.config.output_mode == OutputMode::Syllable {
            normalize::to_nfc(&unit)
        } else {
            unit
        };
        if self.config.filename_compatibility {
            let text = normalize::strip_filename_unsafe(&normalize::to_string(&unit));
            self.commit.extend(normalize::to_code_points(&text));
        } else {
            self.commit.extend(unit);
        }
    }

    /// Current preedit.
    pub fn preedit(&self) -> Vec<u32> {
        self.preedit.clone()
    }

    pub fn preedit_text(&self) -> String {
        normalize::to_string(&self.preedit)
    }

    /// Clear buffer, preedit and commit queue.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.commit.clear();
        self.preedit.clear();
        self.open_tail = false;
        debug!("input context reset");
    }

    /// Verify the buffer invariants.
    pub fn check_consistency(&self) -> Result<(), HangulError> {
        self.buffer.validate()?;
        if self.buffer.len() > self.config.max_buffer_size {
            return Err(HangulError::BufferOverflow {
                max: self.config.max_buffer_size,
            });
        }
        if self.open_tail
            && (self.commit.is_empty() || self.buffer.build_syllable() == 0)
        {
            return Err(HangulError::InconsistentState(format!(
                "open syllable without a composed buffer: {:?}",
                self.buffer.jamo_sequence()
            )));
        }
        Ok(())
    }

    /// Reset on a broken invariant when recovery is enabled. Returns whether
    /// the state was consistent.
    fn ensure_consistent(&mut self) -> bool {
        let Err(err) = self.check_consistency() else {
            return true;
        };
        if self.config.auto_error_recovery {
            warn!(error = %err, "resetting input context");
            self.reset();
        } else {
            warn!(error = %err, "input context is inconsistent");
        }
        false
    }

    fn after_mutation(&mut self) {
        self.ensure_consistent();
        self.preedit = if self.open_tail {
            Vec::new()
        } else {
            self.buffer_representation()
        };
    }

    pub fn output_mode(&self) -> OutputMode {
        self.config.output_mode
    }

    /// Switch output mode. Pending composition is committed in the old mode
    /// first; committed text is never rewritten.
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        if mode == self.config.output_mode {
            return;
        }
        self.commit_buffer();
        self.config.output_mode = mode;
        self.after_mutation();
    }

    /// Select a keyboard from the registry. On failure the active keyboard
    /// stays selected.
    pub fn set_keyboard(&mut self, id: &str) -> Result<(), HangulError> {
        let keyboard = self.registry.get(id)?;
        debug!(keyboard = id, "keyboard selected");
        self.keyboard = keyboard;
        Ok(())
    }

    pub fn keyboard_id(&self) -> &str {
        self.keyboard.id()
    }

    pub fn registry(&self) -> &KeyboardRegistry {
        &self.registry
    }

    pub fn idiomatic_input(&self) -> bool {
        self.config.idiomatic_input
    }

    pub fn set_idiomatic_input(&mut self, enabled: bool) {
        self.config.idiomatic_input = enabled;
    }

    pub fn max_buffer_size(&self) -> usize {
        self.config.max_buffer_size
    }

    /// Change the buffer depth. A composition already longer than the new
    /// limit is committed.
    pub fn set_max_buffer_size(&mut self, size: usize) -> Result<(), HangulError> {
        validate_buffer_size(size)?;
        self.config.max_buffer_size = size;
        if self.buffer.len() > size {
            self.commit_buffer();
            self.after_mutation();
        }
        Ok(())
    }

    pub fn auto_reorder(&self) -> bool {
        self.config.auto_reorder
    }

    pub fn set_auto_reorder(&mut self, enabled: bool) {
        self.config.auto_reorder = enabled;
    }

    pub fn force_nfc(&self) -> bool {
        self.config.force_nfc
    }

    pub fn set_force_nfc(&mut self, enabled: bool) {
        self.config.force_nfc = enabled;
    }

    pub fn filename_compatibility(&self) -> bool {
        self.config.filename_compatibility
    }

    pub fn set_filename_compatibility(&mut self, enabled: bool) {
        self.config.filename_compatibility = enabled;
    }

    pub fn auto_error_recovery(&self) -> bool {
        self.config.auto_error_recovery
    }

    pub fn set_auto_error_recovery(&mut self, enabled: bool) {
        self.config.auto_error_recovery = enabled;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Nothing composing and nothing waiting in the commit queue.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.commit.is_empty()
    }

    pub fn buffer(&self) -> &CompositionBuffer {
        &self.buffer
    }

    pub fn has_leading(&self) -> bool {
        self.buffer.has_leading()
    }

    pub fn has_vowel(&self) -> bool {
        self.buffer.has_vowel()
    }

    pub fn has_trailing(&self) -> bool {
        self.buffer.has_trailing()
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jamo::SyllableParts;

    fn context(idiomatic: bool) -> InputContext {
        let mut ctx = InputContext::new();
        ctx.set_idiomatic_input(idiomatic);
        ctx
    }

    fn type_keys(ctx: &mut InputContext, keys: &str) {
        for key in keys.chars() {
            ctx.process(key as u32);
        }
    }

    fn text(code_points: &[u32]) -> String {
        normalize::to_string(code_points)
    }

    #[test]
    fn test_syllable_commits_when_vowel_arrives() {
        let mut ctx = context(false);
        assert!(ctx.process('r' as u32));
        assert_eq!(ctx.preedit(), vec![0x1100]);
        assert!(ctx.process('k' as u32));
        assert!(ctx.preedit().is_empty());
        assert_eq!(ctx.take_commit(), vec![0xAC00]);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_open_syllable_gains_trailing_consonant() {
        let mut ctx = context(true);
        type_keys(&mut ctx, "rks");
        assert!(ctx.has_trailing());
        assert_eq!(ctx.take_commit(), vec![0xAC04]);
    }

    #[test]
    fn test_strict_mode_starts_new_syllable() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rks");
        assert_eq!(ctx.preedit(), vec![0x1102]);
        assert_eq!(ctx.take_commit(), vec![0xAC00]);
        assert_eq!(ctx.flush(), vec![0x1102]);
    }

    #[test]
    fn test_idiomatic_typing_of_a_phrase() {
        let mut ctx = context(true);
        type_keys(&mut ctx, "dkssudgktpdy");
        assert_eq!(text(&ctx.flush()), "안녕하세요");
    }

    #[test]
    fn test_cluster_split_when_vowel_follows() {
        let mut ctx = context(true);
        type_keys(&mut ctx, "dlfrdj"); // 읽어
        assert_eq!(text(&ctx.flush()), "읽어");

        type_keys(&mut ctx, "dlfrk"); // 일가
        assert_eq!(text(&ctx.flush()), "일가");
    }

    #[test]
    fn test_unmapped_key_flushes_then_passes_through() {
        let mut ctx = context(false);
        assert!(ctx.process('r' as u32));
        assert!(ctx.process('[' as u32));
        assert_eq!(ctx.take_commit(), vec![0x1100, '[' as u32]);
    }

    #[test]
    fn test_control_codes_are_not_handled() {
        let mut ctx = context(false);
        assert!(!ctx.process(0));
        assert!(!ctx.process(0x1B));
        assert!(!ctx.process(0xD800));
        assert!(!ctx.process(0x110000));
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_backspace_steps_through_jamo() {
        let mut ctx = context(true);
        type_keys(&mut ctx, "rks");
        assert!(ctx.backspace());
        assert_eq!(ctx.preedit(), Vec::<u32>::new());
        assert!(ctx.backspace());
        assert_eq!(ctx.preedit(), vec![0x1100]);
        assert!(ctx.backspace());
        assert!(ctx.preedit().is_empty());
        assert!(!ctx.backspace());
        assert!(ctx.take_commit().is_empty());
    }

    #[test]
    fn test_backspace_after_trailing_restores_open_syllable() {
        let mut ctx = context(true);
        type_keys(&mut ctx, "rks");
        ctx.backspace();
        assert_eq!(ctx.take_commit(), vec![0xAC00]);
    }

    #[test]
    fn test_sealed_syllable_is_immutable() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rk");
        assert_eq!(ctx.take_commit(), vec![0xAC00]);
        assert!(!ctx.backspace());
    }

    #[test]
    fn test_backspace_removes_committed_literal() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rk[");
        assert!(ctx.backspace());
        assert!(!ctx.backspace());
        assert_eq!(ctx.take_commit(), vec![0xAC00]);
    }

    #[test]
    fn test_vowel_fusion_rewrites_open_syllable() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rhk");
        assert_eq!(text(&ctx.take_commit()), "과");
    }

    #[test]
    fn test_tense_consonant_from_doubled_key() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rrk");
        assert_eq!(text(&ctx.take_commit()), "까");
    }

    #[test]
    fn test_buffer_limit_auto_commits() {
        let mut ctx = context(false);
        ctx.set_max_buffer_size(1).unwrap();
        type_keys(&mut ctx, "rs");
        assert_eq!(ctx.flush(), vec![0x1100, 0x1102]);
    }

    #[test]
    fn test_invalid_buffer_size_rejected() {
        let mut ctx = context(false);
        assert!(matches!(
            ctx.set_max_buffer_size(0),
            Err(HangulError::InvalidConfiguration(_))
        ));
        assert_eq!(ctx.max_buffer_size(), 12);
    }

    #[test]
    fn test_flush_lone_leading_consonant() {
        let mut ctx = context(false);
        ctx.process('r' as u32);
        assert_eq!(ctx.flush(), vec![0x1100]);
        assert!(ctx.preedit().is_empty());
        assert!(ctx.flush().is_empty());
    }

    #[test]
    fn test_jamo_mode_keeps_raw_sequence() {
        let mut ctx = context(false);
        ctx.set_output_mode(OutputMode::Jamo);
        type_keys(&mut ctx, "rk");
        assert_eq!(ctx.preedit(), vec![0x1100, 0x1161]);
        assert!(ctx.take_commit().is_empty());
        type_keys(&mut ctx, "k");
        assert_eq!(ctx.preedit(), vec![0x1100, 0x1161, 0x1161]);
        assert_eq!(ctx.flush(), vec![0x1100, 0x1161, 0x1161]);
    }

    #[test]
    fn test_mode_switch_commits_pending_composition() {
        let mut ctx = context(false);
        ctx.set_output_mode(OutputMode::Jamo);
        type_keys(&mut ctx, "rk");
        ctx.set_output_mode(OutputMode::Syllable);
        assert!(ctx.preedit().is_empty());
        assert_eq!(ctx.take_commit(), vec![0x1100, 0x1161]);
    }

    #[test]
    fn test_auto_commits_stay_separate_entries() {
        let mut ctx = context(false);
        ctx.set_max_buffer_size(1).unwrap();
        type_keys(&mut ctx, "rk");
        assert_eq!(ctx.flush(), vec![0x1100, 0x1161]);

        type_keys(&mut ctx, "rk");
        ctx.process('[' as u32);
        assert_eq!(ctx.take_commit(), vec![0x1100, 0x1161, '[' as u32]);
    }

    #[test]
    fn test_set_keyboard() {
        let mut ctx = context(false);
        assert!(ctx.set_keyboard("3").is_ok());
        assert_eq!(ctx.keyboard_id(), "3");
        assert_eq!(
            ctx.set_keyboard("nope"),
            Err(HangulError::KeyboardNotFound("nope".into()))
        );
        assert_eq!(ctx.keyboard_id(), "3");
    }

    #[test]
    fn test_sebeolsik_trailing_keys() {
        let mut ctx = context(false);
        ctx.set_keyboard("3").unwrap();
        type_keys(&mut ctx, "kfs"); // ㄱ ㅏ ㄴ(trailing)
        assert_eq!(text(&ctx.take_commit()), "간");
    }

    #[test]
    fn test_vowel_first_reorders() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "kr");
        assert_eq!(text(&ctx.take_commit()), "가");

        ctx.set_auto_reorder(false);
        type_keys(&mut ctx, "kr");
        assert_eq!(ctx.take_commit(), vec![0x1161]);
        assert_eq!(ctx.preedit(), vec![0x1100]);
    }

    #[test]
    fn test_process_key_keeps_open_syllable_in_preedit() {
        let mut ctx = context(true);
        let outcome = ctx.process_key(KeyEvent::Char('r'));
        assert!(outcome.handled);
        assert_eq!(outcome.preedit, vec![0x1100]);

        let outcome = ctx.process_key(KeyEvent::Char('k'));
        assert!(outcome.committed.is_empty());
        assert_eq!(outcome.preedit_text(), "가");

        let outcome = ctx.process_key(KeyEvent::Char('s'));
        assert!(outcome.committed.is_empty());
        assert_eq!(outcome.preedit_text(), "간");

        let outcome = ctx.process_key(KeyEvent::Char('k'));
        assert_eq!(outcome.committed_text(), "가");
        assert_eq!(outcome.preedit_text(), "나");

        let outcome = ctx.process_key(KeyEvent::Space);
        assert_eq!(outcome.committed_text(), "나 ");
        assert!(outcome.preedit.is_empty());
    }

    #[test]
    fn test_process_key_enter_and_escape() {
        let mut ctx = context(false);
        ctx.process_key(KeyEvent::Char('r'));
        let outcome = ctx.process_key(KeyEvent::Enter);
        assert!(!outcome.handled);
        assert_eq!(outcome.committed, vec![0x1100]);

        ctx.process_key(KeyEvent::Char('r'));
        let outcome = ctx.process_key(KeyEvent::Escape);
        assert!(outcome.handled);
        assert!(outcome.committed.is_empty());
        assert!(ctx.is_empty());
        assert!(!ctx.process_key(KeyEvent::Escape).handled);
    }

    #[test]
    fn test_filename_compatibility_strips_unsafe_characters() {
        let mut ctx = context(false);
        ctx.set_filename_compatibility(true);
        type_keys(&mut ctx, "rk/");
        assert_eq!(text(&ctx.take_commit()), "가");
    }

    #[test]
    fn test_inconsistent_buffer_triggers_reset() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "r[");
        ctx.buffer.corrupt_for_test(SyllableParts::new(0x1161, 0, 0));
        assert!(matches!(
            ctx.check_consistency(),
            Err(HangulError::InconsistentState(_))
        ));
        assert!(ctx.process('r' as u32));
        assert_eq!(ctx.preedit(), vec![0x1100]);
        assert!(ctx.take_commit().is_empty());
    }

    #[test]
    fn test_inconsistent_state_kept_without_recovery() {
        let mut ctx = context(false);
        ctx.set_auto_error_recovery(false);
        assert!(!ctx.auto_error_recovery());
        type_keys(&mut ctx, "r[");
        let corrupt = SyllableParts::new(0x1161, 0, 0);
        ctx.buffer.corrupt_for_test(corrupt);

        assert!(!ctx.process('r' as u32));
        assert!(!ctx.backspace());
        assert_eq!(ctx.buffer().parts(), corrupt);
        assert!(matches!(
            ctx.check_consistency(),
            Err(HangulError::InconsistentState(_))
        ));

        ctx.set_auto_error_recovery(true);
        assert!(ctx.process('r' as u32));
        assert_eq!(ctx.preedit(), vec![0x1100]);
        assert!(ctx.check_consistency().is_ok());
    }

    #[test]
    fn test_open_syllable_without_composition_is_inconsistent() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rk");
        ctx.buffer.corrupt_for_test(SyllableParts::new(0x1100, 0, 0));
        match ctx.check_consistency() {
            Err(HangulError::InconsistentState(msg)) => assert!(msg.contains("open syllable")),
            other => panic!("unexpected {:?}", other),
        }

        assert!(ctx.process('k' as u32));
        assert!(ctx.take_commit().is_empty());
        assert_eq!(ctx.preedit(), vec![0x1161]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ctx = context(false);
        type_keys(&mut ctx, "rk[r");
        ctx.reset();
        assert!(ctx.is_empty());
        assert!(ctx.preedit().is_empty());
        assert!(ctx.take_commit().is_empty());
    }
}
