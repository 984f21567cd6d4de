use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the whole file at `path`.
pub fn read_whole_file(path: &Path) -> Result<Vec<u8>, FileError> {
    fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        _ => FileError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Creates or truncates the file at `path` and writes `content` as its
/// full contents.
pub fn write_whole_file(path: &Path, content: &[u8]) -> Result<(), FileError> {
    fs::write(path, content).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Flat file storage rooted at the configured directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        FileStore {
            directory: directory.into(),
        }
    }

    /// Only plain path segments are accepted, so a name can never leave
    /// the directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let relative = Path::new(name);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if name.is_empty() || !plain {
            return Err(FileError::InvalidName(name.to_string()));
        }
        Ok(self.directory.join(relative))
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        read_whole_file(&self.resolve(name)?)
    }

    pub fn write(&self, name: &str, content: &[u8]) -> Result<(), FileError> {
        write_whole_file(&self.resolve(name)?, content)
    }
}
