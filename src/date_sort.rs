use anyhow::Context;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::shell::Shell;
use crate::Cli;

mod process;
mod scanner;
mod timestamp;

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The whole source tree was visited.
    Completed { processed: u32 },
    /// The configured file limit stopped the walk early.
    LimitReached { processed: u32 },
}

/// Walks the source tree and sorts every visible file into a date directory
/// under the destination. Per-file failures are logged and skipped; only a
/// broken source root aborts the run.
pub fn sort(args: &Cli, shell: &mut Shell) -> anyhow::Result<Outcome> {
    let mut scanner = scanner::Scanner::new(args.src.clone());
    let mut processed: u32 = 0;

    while let Some(file) = scanner.next_file(shell)? {
        let date = match file_date(&file) {
            Ok(date) => date,
            Err(err) => {
                eprintln!("Failed to resolve date for {:?}: {:#}", file, err);
                continue;
            }
        };

        match process::process_file(args, shell, &file, date) {
            Ok(true) => processed += 1,
            Ok(false) => {}
            Err(err) => {
                eprintln!("Failed to process {:?}: {:#}", file, err);
                continue;
            }
        }

        if args.limit > 0 && processed >= args.limit {
            shell.status(|| format!("File limit reached: {}", args.limit));
            return Ok(Outcome::LimitReached { processed });
        }
    }

    Ok(Outcome::Completed { processed })
}

fn file_date(path: &Path) -> anyhow::Result<NaiveDate> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {:?}", path))?;
    timestamp::effective_date(path, &metadata)
}
