use anyhow::bail;
use std::path::PathBuf;

use crate::shell::{PrintLevel, Shell};
use clap::{ArgAction, Parser};

mod date_sort;
mod shell;

/// Sorts files from one directory tree into per-date directories
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The directory the files are read from
    #[arg(long)]
    src: PathBuf,

    /// The directory the files are written to. Date directories are created below it
    #[arg(long)]
    dst: PathBuf,

    /// If true, only log what would happen; nothing is created, copied or deleted
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    dry_run: bool,

    /// If true, remove the source file after its copy was confirmed
    #[arg(long, action = ArgAction::Set, default_value_t = false)]
    delete: bool,

    /// Stop after this many files were processed (0 = unlimited)
    #[arg(long, default_value_t = 100)]
    limit: u32,

    /// If set, verbose output is created
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut shell = if args.verbose {
        Shell::new(PrintLevel::Verbose)
    } else {
        Shell::new(PrintLevel::Normal)
    };

    shell.verbose(|| format!("Running with {:?}", args));

    if !args.src.exists() {
        bail!("src dir does not exist: {:?}", args.src);
    }
    if !args.src.is_dir() {
        bail!("src is not a directory: {:?}", args.src);
    }
    if !args.dst.exists() {
        bail!("dst dir does not exist: {:?}", args.dst);
    }
    if !args.dst.is_dir() {
        bail!("dst is not a directory: {:?}", args.dst);
    }

    let outcome = date_sort::sort(&args, &mut shell)?;
    shell.verbose(|| format!("Finished: {:?}", outcome));

    Ok(())
}
