use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::Error;

/// Destination for generated artifacts, keyed by a relative file name.
pub trait OutputSink {
    /// Replaces whatever is stored under `file` with `contents`.
    fn write(&mut self, file: &str, contents: &str) -> Result<(), Error>;
}

/// Operator-facing output, separate from the log.
pub trait ReportSink {
    fn report(&mut self, text: &str);
}

/// Writes artifacts below a root directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSink { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, file: &str, contents: &str) -> Result<(), Error> {
        std::fs::create_dir_all(&self.root).map_err(|source| Error::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.root.join(file);
        std::fs::write(&path, contents).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        Ok(())
    }
}

/// Compares artifacts with the files below a root directory instead of
/// writing them.
#[derive(Debug, Clone)]
pub struct CheckSink {
    root: PathBuf,
    stale: Vec<PathBuf>,
}

impl CheckSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CheckSink {
            root: root.into(),
            stale: Vec::new(),
        }
    }

    /// Files that are missing or differ from the rendered output.
    pub fn stale(&self) -> &[PathBuf] {
        &self.stale
    }

    pub fn finish(self) -> Result<(), Error> {
        if self.stale.is_empty() {
            Ok(())
        } else {
            Err(Error::Stale(self.stale))
        }
    }
}

impl OutputSink for CheckSink {
    fn write(&mut self, file: &str, contents: &str) -> Result<(), Error> {
        let path = self.root.join(file);
        match std::fs::read_to_string(&path) {
            Ok(existing) if existing == contents => {
                tracing::info!(path = %path.display(), "up to date");
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "out of date");
                self.stale.push(path);
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "missing");
                self.stale.push(path);
            }
            Err(source) => return Err(Error::Io { path, source }),
        }
        Ok(())
    }
}

/// Keeps artifacts in memory, in file name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn get(&self, file: &str) -> Option<&str> {
        self.files.get(file).map(String::as_str)
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, file: &str, contents: &str) -> Result<(), Error> {
        self.files.insert(file.to_string(), contents.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReport;

impl ReportSink for StdoutReport {
    fn report(&mut self, text: &str) {
        println!("{text}");
    }
}

impl ReportSink for Vec<String> {
    fn report(&mut self, text: &str) {
        self.push(text.to_string());
    }
}
