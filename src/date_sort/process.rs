use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use std::fs;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use pathdiff::diff_paths;

use crate::shell::Shell;
use crate::Cli;

/// Copies one file into its date directory and optionally removes the
/// original. The original is never removed on a dry run or after a failed
/// copy. Returns false when the file was skipped because source and
/// destination are the same path.
pub fn process_file(
    args: &Cli,
    shell: &mut Shell,
    source: &Path,
    date: NaiveDate,
) -> anyhow::Result<bool> {
    let destination = destination_path(&args.dst, source, date)?;

    if source.eq(&destination) {
        return Ok(false);
    }

    let relative_source = display_from(source, &args.src);
    let relative_destination = display_from(&destination, &args.dst);

    if args.dry_run {
        shell.status(|| format!("Would copy {} -> {}", relative_source, relative_destination));
        if args.delete {
            shell.status(|| format!("Would delete {}", relative_source));
        }
        return Ok(true);
    }

    copy_file(source, &destination)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, destination))?;
    shell.status(|| format!("Copied {} -> {}", relative_source, relative_destination));

    if args.delete {
        fs::remove_file(source).with_context(|| format!("Failed to delete {:?}", source))?;
        shell.status(|| format!("Deleted {}", relative_source));
    }

    Ok(true)
}

fn destination_path(dst: &Path, source: &Path, date: NaiveDate) -> anyhow::Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| anyhow!("File has no name: {:?}", source))?;

    Ok(dst.join(date.format("%Y-%m-%d").to_string()).join(name))
}

/// Streams the bytes over and flushes them to stable storage. An existing
/// destination file is overwritten.
fn copy_file(source: &Path, destination: &Path) -> anyhow::Result<()> {
    let parent = destination
        .parent()
        .ok_or_else(|| anyhow!("Destination has no parent dir: {:?}", destination))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Could not create date dir {:?}", parent))?;

    let mut reader = File::open(source).context("Could not open source file")?;
    let mut writer = File::create(destination).context("Could not create destination file")?;
    io::copy(&mut reader, &mut writer).context("Copy failed")?;
    writer.sync_all().context("Sync failed")?;

    Ok(())
}

fn display_from(path: &Path, root: &Path) -> String {
    diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
