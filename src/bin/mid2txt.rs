//! Batch converter: every `.mid` file in a directory becomes a `.txt`
//! trace beside it.
//!
//! Files are independent, so they are decoded in parallel. A file that
//! fails to decode is logged and counted; the rest of the batch still
//! runs, and the exit status reports whether anything failed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::Parser;
use miditrace::{file::MidiFile, trace};
use rayon::prelude::*;

#[derive(Parser)]
#[command(version, about = "Decode Standard MIDI Files into text traces")]
struct Args {
    /// Directory to scan for .mid files
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let files = enumerate_midi_files(&args.dir)
        .with_context(|| format!("scanning {}", args.dir.display()))?;
    if files.is_empty() {
        log::warn!("no .mid files found in {}", args.dir.display());
        return Ok(());
    }

    let failures: usize = files
        .par_iter()
        .map(|path| match convert(path) {
            Ok(out) => {
                log::info!("{} -> {}", path.display(), out.display());
                0
            }
            Err(e) => {
                log::error!("{}: {e:#}", path.display());
                1
            }
        })
        .sum();

    if failures > 0 {
        bail!("{failures} of {} file(s) failed", files.len());
    }
    Ok(())
}

fn enumerate_midi_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_midi = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mid"));
        if is_midi && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Open, decode, render, write. All resources are scoped to this call.
fn convert(path: &Path) -> anyhow::Result<PathBuf> {
    let bytes = fs::read(path).context("reading input")?;
    let file = MidiFile::parse(&bytes).context("decoding")?;
    let text = trace::render(&file);
    let out = path.with_extension("txt");
    fs::write(&out, text).with_context(|| format!("writing {}", out.display()))?;
    Ok(out)
}
