//! libhanja
//!
//! Hangul → Hanja lookup. A `HanjaTable` maps a Hangul reading to the Hanja
//! that can be written for it, each with an optional gloss. Tables are read
//! from the plain `key:value:comment` text format or from the converted
//! `hanja.fst` + `hanja.bincode` artifacts produced by `convert_hanja`.
use serde::{Deserialize, Serialize};

pub mod table;
pub use table::{HanjaTable, MatchKind};

pub mod compat;
pub use compat::to_unified_form;

/// One Hanja candidate for a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hanja {
    /// Hangul reading.
    pub key: String,
    /// Hanja text.
    pub value: String,
    /// Gloss, possibly empty.
    pub comment: String,
}

impl Hanja {
    pub fn new(key: impl Into<String>, value: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: comment.into(),
        }
    }
}

/// Result of a lookup: the query and the matching entries, best first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HanjaList {
    key: String,
    items: Vec<Hanja>,
}

impl HanjaList {
    pub fn new(key: impl Into<String>, items: Vec<Hanja>) -> Self {
        Self {
            key: key.into(),
            items,
        }
    }

    /// The query this list answers.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hanja> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hanja> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Hanja> {
        self.items
    }
}

impl IntoIterator for HanjaList {
    type Item = Hanja;
    type IntoIter = std::vec::IntoIter<Hanja>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a HanjaList {
    type Item = &'a Hanja;
    type IntoIter = std::slice::Iter<'a, Hanja>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
