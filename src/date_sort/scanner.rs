use anyhow::Context;
use std::collections::VecDeque;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use crate::shell::Shell;

/// Breadth-first walk over the source tree. Directories are queued and read
/// one at a time, so the caller can stop early without visiting the rest.
pub struct Scanner {
    pending_dirs: VecDeque<PathBuf>,
    files: VecDeque<PathBuf>,
    root_read: bool,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        let mut pending_dirs = VecDeque::new();
        pending_dirs.push_back(source_dir);

        Self {
            pending_dirs,
            files: VecDeque::new(),
            root_read: false,
        }
    }

    /// Returns the next visible file, or None when the tree is exhausted.
    /// Unreadable entries and subdirectories are logged and skipped; only
    /// the source root itself failing to list is an error.
    pub fn next_file(&mut self, shell: &mut Shell) -> anyhow::Result<Option<PathBuf>> {
        loop {
            if let Some(file) = self.files.pop_front() {
                return Ok(Some(file));
            }

            let Some(dir) = self.pending_dirs.pop_front() else {
                return Ok(None);
            };
            self.read_dir(dir, shell)?;
        }
    }

    fn read_dir(&mut self, dir: PathBuf, shell: &mut Shell) -> anyhow::Result<()> {
        shell.verbose(|| format!("Processing dir {:?}", dir));

        let read_dir_result = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(err) if self.root_read => {
                eprintln!("Failed to read directory {:?}: {}", dir, err);
                return Ok(());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read source directory: {:?}", dir))
            }
        };
        self.root_read = true;

        for dir_entry_result in read_dir_result {
            let entry = match dir_entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    eprintln!("Error entering path: {:?}: {}", dir, err);
                    continue;
                }
            };

            // hidden entries are invisible to the walk, including whole
            // hidden subtrees
            if is_hidden(&entry.file_name()) {
                continue;
            }

            let path = entry.path();
            if path.is_dir() {
                self.pending_dirs.push_back(path);
            } else {
                self.files.push_back(path);
            }
        }

        Ok(())
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
