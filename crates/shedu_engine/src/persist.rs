use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use output directory {path:?}: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure `dir` exists as a directory, creating it and its parents if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |reason: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| dir_error(e.to_string()))?;
        if !meta.is_dir() {
            return Err(dir_error("path is not a directory".into()));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| dir_error(e.to_string()))
}

/// Streams a download into a temporary file next to its destination and moves
/// it into place on [`commit`](Self::commit). Dropping the writer without
/// committing removes the partial file.
pub struct StreamingFileWriter {
    tmp: NamedTempFile,
    target: PathBuf,
    written: u64,
}

impl StreamingFileWriter {
    /// The parent directory must already exist; see [`ensure_output_dir`].
    pub fn create(target: PathBuf) -> Result<Self, PersistError> {
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let tmp = NamedTempFile::new_in(&dir)?;
        Ok(Self {
            tmp,
            target,
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<u64, PersistError> {
        self.tmp.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(self.written)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and move the file onto its target, replacing any existing file.
    pub fn commit(mut self) -> Result<PathBuf, PersistError> {
        self.tmp.flush()?;
        self.tmp.as_file_mut().sync_all()?;

        self.tmp
            .persist(&self.target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(self.target)
    }
}
