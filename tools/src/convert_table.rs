use anyhow::{Context, Result};
use libhanja::{Hanja, HanjaTable};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Written next to the artifacts when `--manifest` is given.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub inputs: Vec<String>,
    pub keys: usize,
    pub entries: usize,
    pub skipped_lines: usize,
}

pub struct Options {
    pub unify: bool,
}

pub fn run(inputs: &[PathBuf], out_fst: &Path, out_bincode: &Path, options: &Options) -> Result<Manifest> {
    // key:value[:comment], key must not start with '#'
    let line_re = Regex::new(r"^([^#:][^:]*):([^:]+)(?::(.*))?$")?;

    let mut global: BTreeMap<String, Vec<Hanja>> = BTreeMap::new();
    let mut skipped = 0usize;

    for input in inputs {
        let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
        let reader = BufReader::new(file);

        for line_res in reader.lines() {
            let line = line_res?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(caps) = line_re.captures(line) else {
                skipped += 1;
                continue;
            };
            let key = caps[1].trim();
            let mut value = caps[2].trim().to_string();
            let comment = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");
            if key.is_empty() || value.is_empty() {
                skipped += 1;
                continue;
            }
            if options.unify {
                value = libhanja::to_unified_form(&value);
            }
            let list = global.entry(key.to_string()).or_default();
            // later files may repeat an entry; keep the first
            if !list.iter().any(|h| h.value == value) {
                list.push(Hanja::new(key, value, comment));
            }
        }
    }

    // BTreeMap iteration is already in byte order, which fst requires
    let mut builder = fst::MapBuilder::new(Vec::new())?;
    for (i, k) in global.keys().enumerate() {
        builder.insert(k, i as u64)?;
    }
    let fst_bytes = builder.into_inner()?;
    let mut out = File::create(out_fst)?;
    out.write_all(&fst_bytes)?;

    let keys = global.len();
    let payload: Vec<Vec<Hanja>> = global.into_values().collect();
    let entries = payload.iter().map(Vec::len).sum();
    let mut out = File::create(out_bincode)?;
    out.write_all(&bincode::serialize(&payload)?)?;

    // read the artifacts back the way the runtime does
    let table = HanjaTable::load(out_fst, out_bincode).context("verifying written artifacts")?;
    anyhow::ensure!(table.len() == keys, "artifact key count mismatch");

    Ok(Manifest {
        inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
        keys,
        entries,
        skipped_lines: skipped,
    })
}

pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    Ok(())
}
