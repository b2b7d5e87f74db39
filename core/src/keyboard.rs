//! Keyboard layouts and the registry that selects them.
//!
//! A layout is plain data: a table from key code to code point. Values are
//! usually jamo, but a layout may also map a key to punctuation. A key with
//! no entry maps to 0 and is passed through as a literal.
//!
//! Built-in layouts:
//! - `"2"`: Dubeolsik, the standard two-set layout
//! - `"3"`: Sebeolsik 390, three-set with dedicated trailing keys
//!
//! Additional layouts can be loaded from JSON:
//!
//! ```json
//! { "id": "2x", "name": "Custom", "keys": { "r": "U+1100", "k": "ㅏ" } }
//! ```
//!
//! Compatibility jamo (ㄱ, ㅏ) in a layout file are stored as combining jamo.

use crate::error::HangulError;
use crate::jamo::{self, JamoClass, JamoUsage};
use ahash::AHashMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A key-to-code-point table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    id: String,
    name: String,
    table: AHashMap<u32, u32>,
}

impl Keyboard {
    /// Build a layout from `(key, code point)` pairs.
    pub fn from_pairs<I>(id: &str, name: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            table: pairs.into_iter().map(|(k, v)| (k as u32, v)).collect(),
        }
    }

    /// Parse a JSON layout description.
    pub fn from_json(content: &str) -> Result<Self, HangulError> {
        let file: LayoutFile =
            serde_json::from_str(content).map_err(|e| HangulError::Layout(e.to_string()))?;
        if file.id.is_empty() {
            return Err(HangulError::Layout("layout id is empty".into()));
        }

        let mut table = AHashMap::with_capacity(file.keys.len());
        for (key, value) in &file.keys {
            let mut chars = key.chars();
            let (Some(k), None) = (chars.next(), chars.next()) else {
                return Err(HangulError::Layout(format!("key '{}' is not a single character", key)));
            };
            let code = parse_code_point(value)
                .and_then(combining_form)
                .ok_or_else(|| HangulError::Layout(format!("bad value '{}' for key '{}'", value, key)))?;
            table.insert(k as u32, code);
        }

        Ok(Self {
            id: file.id,
            name: file.name,
            table,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Code point for `key`, or 0 when the key is not part of the layout.
    pub fn map_key(&self, key: u32) -> u32 {
        self.table.get(&key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[derive(Deserialize)]
struct LayoutFile {
    id: String,
    #[serde(default)]
    name: String,
    keys: BTreeMap<String, String>,
}

/// Accepts `U+1100`, `0x1100` or a literal single character.
fn parse_code_point(value: &str) -> Option<u32> {
    let hex = value
        .strip_prefix("U+")
        .or_else(|| value.strip_prefix("u+"))
        .or_else(|| value.strip_prefix("0x"));
    if let Some(hex) = hex {
        return u32::from_str_radix(hex, 16).ok().filter(|&c| char::from_u32(c).is_some());
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}

/// Compatibility jamo become the combining jamo they stand for, consonants
/// preferring the leading position. Other values pass through.
fn combining_form(c: u32) -> Option<u32> {
    if jamo::classify(c) != JamoClass::Compatibility {
        return Some(c);
    }
    [JamoUsage::Leading, JamoUsage::Vowel, JamoUsage::Trailing]
        .into_iter()
        .map(|usage| jamo::from_compatibility_form(c, usage))
        .find(|&mapped| mapped != 0)
}

/// Layouts by identifier, shared read-only between sessions.
#[derive(Debug, Clone, Default)]
pub struct KeyboardRegistry {
    keyboards: AHashMap<String, Arc<Keyboard>>,
}

impl KeyboardRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in layouts.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(dubeolsik());
        registry.register(sebeolsik_390());
        registry
    }

    /// Add or replace a layout; returns the previous one with the same id.
    pub fn register(&mut self, keyboard: Keyboard) -> Option<Arc<Keyboard>> {
        self.keyboards.insert(keyboard.id.clone(), Arc::new(keyboard))
    }

    pub fn get(&self, id: &str) -> Result<Arc<Keyboard>, HangulError> {
        self.keyboards
            .get(id)
            .cloned()
            .ok_or_else(|| HangulError::KeyboardNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keyboards.contains_key(id)
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.keyboards.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Standard two-set layout. Shifted letters without a tense variant map
/// like their lowercase key.
pub fn dubeolsik() -> Keyboard {
    static BASE: [(char, u32); 33] = [
        ('r', 0x1100), ('R', 0x1101), ('s', 0x1102), ('e', 0x1103),
        ('E', 0x1104), ('f', 0x1105), ('a', 0x1106), ('q', 0x1107),
        ('Q', 0x1108), ('t', 0x1109), ('T', 0x110A), ('d', 0x110B),
        ('w', 0x110C), ('W', 0x110D), ('c', 0x110E), ('z', 0x110F),
        ('x', 0x1110), ('v', 0x1111), ('g', 0x1112),
        ('k', 0x1161), ('o', 0x1162), ('i', 0x1163), ('O', 0x1164),
        ('j', 0x1165), ('p', 0x1166), ('u', 0x1167), ('P', 0x1168),
        ('h', 0x1169), ('y', 0x116D), ('n', 0x116E), ('b', 0x1172),
        ('m', 0x1173), ('l', 0x1175),
    ];
    let shifted = BASE
        .iter()
        .filter(|(k, _)| k.is_ascii_lowercase())
        .map(|&(k, v)| (k.to_ascii_uppercase(), v))
        .filter(|(k, _)| !BASE.iter().any(|(b, _)| b == k));
    Keyboard::from_pairs("2", "Dubeolsik", BASE.iter().copied().chain(shifted).collect::<Vec<_>>())
}

/// Three-set layout 390: right hand leading consonants, middle vowels,
/// left hand trailing consonants.
pub fn sebeolsik_390() -> Keyboard {
    const KEYS: [(char, u32); 58] = [
        // leading
        ('k', 0x1100), ('h', 0x1102), ('u', 0x1103), ('y', 0x1105),
        ('i', 0x1106), (';', 0x1107), ('n', 0x1109), ('j', 0x110B),
        ('l', 0x110C), ('o', 0x110E), ('0', 0x110F), ('\'', 0x1110),
        ('p', 0x1111), ('m', 0x1112),
        // vowels
        ('f', 0x1161), ('r', 0x1162), ('6', 0x1163), ('G', 0x1164),
        ('t', 0x1165), ('c', 0x1166), ('e', 0x1167), ('7', 0x1168),
        ('v', 0x1169), ('/', 0x1169), ('4', 0x116D), ('b', 0x116E),
        ('9', 0x116E), ('5', 0x1172), ('g', 0x1173), ('8', 0x1174),
        ('d', 0x1175),
        // trailing
        ('x', 0x11A8), ('!', 0x11A9), ('V', 0x11AA), ('s', 0x11AB),
        ('E', 0x11AC), ('S', 0x11AD), ('A', 0x11AE), ('w', 0x11AF),
        ('@', 0x11B0), ('F', 0x11B1), ('D', 0x11B2), ('T', 0x11B3),
        ('%', 0x11B4), ('$', 0x11B5), ('R', 0x11B6), ('z', 0x11B7),
        ('3', 0x11B8), ('X', 0x11B9), ('q', 0x11BA), ('2', 0x11BB),
        ('a', 0x11BC), ('#', 0x11BD), ('Z', 0x11BE), ('C', 0x11BF),
        ('W', 0x11C0), ('Q', 0x11C1), ('1', 0x11C2),
    ];
    Keyboard::from_pairs("3", "Sebeolsik 390", KEYS)
}
