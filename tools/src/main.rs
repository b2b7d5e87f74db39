mod convert_table;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Convert `key:value:comment` Hanja tables into hanja.fst + hanja.bincode.
#[derive(Parser)]
struct Args {
    #[arg(long, num_args = 1.., required = true)]
    inputs: Vec<PathBuf>,

    #[arg(long, default_value = "hanja.fst")]
    out_fst: PathBuf,

    #[arg(long, default_value = "hanja.bincode")]
    out_bincode: PathBuf,

    /// Fold CJK compatibility ideographs to unified ideographs.
    #[arg(long)]
    unify: bool,

    /// Write a JSON summary of the conversion.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = convert_table::Options { unify: args.unify };
    let manifest = convert_table::run(&args.inputs, &args.out_fst, &args.out_bincode, &options)?;

    if let Some(path) = &args.manifest {
        convert_table::write_manifest(&manifest, path)?;
    }

    println!(
        "Wrote {} keys ({} entries, {} lines skipped) to {} and {}",
        manifest.keys,
        manifest.entries,
        manifest.skipped_lines,
        args.out_fst.display(),
        args.out_bincode.display()
    );
    Ok(())
}
