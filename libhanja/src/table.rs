//! Hanja table: Hangul reading → Hanja entries.
//!
//! Keys are indexed by an `fst::Map` pointing into a payload vector of
//! entry lists, the same split the converted artifacts use on disk
//! (`hanja.fst` + `hanja.bincode`). The table is immutable once built, so a
//! single instance can sit behind an `Arc` and serve every input session.
//!
//! Lookups go through a small LRU cache because prefix and suffix matching
//! repeat the same shrinking queries while the user keeps typing.

use crate::{Hanja, HanjaList};
use anyhow::{Context, Result};
use fst::automaton::{Automaton, Str};
use fst::{IntoStreamer, Map, Streamer};
use lru::LruCache;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

const DEFAULT_CACHE_SIZE: usize = 256;

/// How a query is matched against the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Exact,
    /// Query, then the query with characters removed from the end.
    Prefix,
    /// Query, then the query with characters removed from the start.
    Suffix,
}

pub struct HanjaTable {
    index: Map<Vec<u8>>,
    entries: Vec<Vec<Hanja>>,
    cache: Mutex<LruCache<(MatchKind, String), HanjaList>>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl HanjaTable {
    /// Build a table from entries. Entries sharing a key keep their order.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Hanja>,
    {
        let mut grouped: BTreeMap<String, Vec<Hanja>> = BTreeMap::new();
        for entry in entries {
            grouped.entry(entry.key.clone()).or_default().push(entry);
        }

        let index = Map::from_iter(
            grouped
                .keys()
                .enumerate()
                .map(|(i, key)| (key.as_bytes(), i as u64)),
        )
        .context("building hanja key index")?;
        let entries = grouped.into_values().collect();
        Ok(Self::from_parts(index, entries))
    }

    fn from_parts(index: Map<Vec<u8>>, entries: Vec<Vec<Hanja>>) -> Self {
        Self {
            index,
            entries,
            cache: Mutex::new(LruCache::new(cache_capacity(DEFAULT_CACHE_SIZE))),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        }
    }

    /// Parse the text format: one `key:value:comment` entry per line.
    /// Blank lines and lines starting with `#` are ignored, as are lines
    /// without a value.
    pub fn from_text(content: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.splitn(3, ':');
            let key = fields.next().unwrap_or("").trim();
            let value = fields.next().unwrap_or("").trim();
            if key.is_empty() || value.is_empty() {
                debug!(line = lineno + 1, "skipping malformed hanja entry");
                continue;
            }
            let comment = fields.next().unwrap_or("").trim();
            entries.push(Hanja::new(key, value, comment));
        }
        Self::from_entries(entries)
    }

    /// Load the text format from a file.
    pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading hanja table {}", path.display()))?;
        Self::from_text(&content)
    }

    /// Load converted artifacts.
    ///
    /// - fst_path: hanja.fst mapping keys to payload indices
    /// - bincode_path: hanja.bincode containing `Vec<Vec<Hanja>>`
    pub fn load<P: AsRef<Path>>(fst_path: P, bincode_path: P) -> Result<Self> {
        let fst_path = fst_path.as_ref();
        let bincode_path = bincode_path.as_ref();

        let index = {
            let mut f = File::open(fst_path)
                .with_context(|| format!("opening {}", fst_path.display()))?;
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            Map::new(buf)?
        };

        let entries: Vec<Vec<Hanja>> = {
            let mut f = File::open(bincode_path)
                .with_context(|| format!("opening {}", bincode_path.display()))?;
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            bincode::deserialize(&buf)?
        };

        if index.len() != entries.len() {
            anyhow::bail!(
                "hanja index has {} keys but payload has {} entries",
                index.len(),
                entries.len()
            );
        }
        debug!(keys = entries.len(), "hanja table loaded");
        Ok(Self::from_parts(index, entries))
    }

    /// Write the fst index and bincode payload.
    pub fn save<P: AsRef<Path>>(&self, fst_path: P, bincode_path: P) -> Result<()> {
        let mut f = File::create(fst_path.as_ref())?;
        f.write_all(self.index.as_fst().as_bytes())?;

        let payload = bincode::serialize(&self.entries)?;
        let mut f = File::create(bincode_path.as_ref())?;
        f.write_all(&payload)?;
        Ok(())
    }

    /// Replace the lookup cache with one of `size` entries (0 is treated as 1).
    pub fn with_cache_size(self, size: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(cache_capacity(size))),
            ..self
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries stored under exactly `key`.
    pub fn match_exact(&self, key: &str) -> HanjaList {
        self.cached(MatchKind::Exact, key)
    }

    /// Entries for `key` and for each shorter prefix of it, longest first.
    pub fn match_prefix(&self, key: &str) -> HanjaList {
        self.cached(MatchKind::Prefix, key)
    }

    /// Entries for `key` and for each shorter suffix of it, longest first.
    pub fn match_suffix(&self, key: &str) -> HanjaList {
        self.cached(MatchKind::Suffix, key)
    }

    pub fn lookup(&self, key: &str, kind: MatchKind) -> HanjaList {
        self.cached(kind, key)
    }

    /// Keys that start with `prefix`, in key order.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let matcher = Str::new(prefix).starts_with();
        let mut stream = self.index.search(matcher).into_stream();
        let mut keys = Vec::new();
        while let Some((key, _)) = stream.next() {
            keys.push(String::from_utf8_lossy(key).into_owned());
        }
        keys
    }

    /// Cache statistics as (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn cached(&self, kind: MatchKind, key: &str) -> HanjaList {
        let cache_key = (kind, key.to_string());
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&cache_key) {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                return hit.clone();
            }
        }
        self.cache_misses.fetch_add(1, Ordering::Relaxed);

        let list = self.search(kind, key);
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(cache_key, list.clone());
        }
        list
    }

    fn search(&self, kind: MatchKind, key: &str) -> HanjaList {
        let mut items = Vec::new();
        match kind {
            MatchKind::Exact => items.extend(self.exact(key).iter().cloned()),
            MatchKind::Prefix => {
                let mut ends: Vec<usize> = key.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
                ends.reverse();
                for end in ends {
                    items.extend(self.exact(&key[..end]).iter().cloned());
                }
            }
            MatchKind::Suffix => {
                for (start, _) in key.char_indices() {
                    items.extend(self.exact(&key[start..]).iter().cloned());
                }
            }
        }
        HanjaList::new(key, items)
    }

    fn exact(&self, key: &str) -> &[Hanja] {
        if key.is_empty() {
            return &[];
        }
        self.index
            .get(key)
            .and_then(|idx| self.entries.get(idx as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Debug for HanjaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HanjaTable")
            .field("keys", &self.entries.len())
            .finish()
    }
}

fn cache_capacity(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size.max(1)).unwrap_or(NonZeroUsize::MIN)
}
