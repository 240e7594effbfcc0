use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::task::Task;

/// Produces one task per line of a newline-delimited UTF-8 file, in file
/// order. The sequence is lazy, finite and not restartable; the coordinator
/// drains it completely before any dispatch happens.
pub struct TaskSource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    next_index: usize,
}

impl TaskSource {
    /// Opens the input file. An unreadable path is fatal to the run - there
    /// is no partial-input mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| EngineError::Input {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            next_index: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for TaskSource {
    type Item = Result<Task, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(match line {
            Ok(payload) => {
                let index = self.next_index;
                self.next_index += 1;
                Ok(Task { index, payload })
            }
            Err(source) => Err(EngineError::Input {
                path: self.path.clone(),
                source,
            }),
        })
    }
}
