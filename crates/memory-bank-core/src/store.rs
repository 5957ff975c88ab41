//! File-backed document store.
//!
//! Every document lives as a flat markdown file under one directory
//! (`.memory_bank/` by default); the archive goes into a nested directory
//! with a top-level fallback. Nothing else in the crate touches the
//! filesystem for documents.
//!
//! The store assumes a single writer: one caller driving one mode at a time.
//! Individual writes are atomic (tempfile + rename), but there is no locking
//! across the read-modify-write a mode performs on the tasks document.

use crate::config::Config;
use crate::error::{MemoryBankError, Result};
use crate::io;
use crate::paths;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Document {
    Tasks,
    ActiveContext,
    Progress,
    ImplementationPlan,
    Reflection,
    /// One per component, keyed by the caller-supplied component name.
    Creative(String),
    Archive,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Tasks => f.write_str("tasks"),
            Document::ActiveContext => f.write_str("active-context"),
            Document::Progress => f.write_str("progress"),
            Document::ImplementationPlan => f.write_str("implementation-plan"),
            Document::Reflection => f.write_str("reflection"),
            Document::Creative(name) => write!(f, "creative:{name}"),
            Document::Archive => f.write_str("archive"),
        }
    }
}

// ---------------------------------------------------------------------------
// ArchiveLocation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ArchiveLocation {
    Primary(PathBuf),
    Fallback(PathBuf),
}

impl ArchiveLocation {
    pub fn path(&self) -> &Path {
        match self {
            ArchiveLocation::Primary(p) | ArchiveLocation::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ArchiveLocation::Fallback(_))
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
    archive_dir: PathBuf,
    archive_file: String,
    fallback_archive_file: String,
}

impl DocumentStore {
    /// Open the store for a project root: `<root>/.memory_bank`, created if absent.
    pub fn open(root: &Path, config: &Config) -> Result<Self> {
        Self::at(paths::memory_bank_dir(root), config)
    }

    /// Open a store rooted directly at `dir`. A config whose archive
    /// settings would point outside `dir` is refused.
    pub fn at(dir: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        if let Some(errors) = config.blocking_errors() {
            return Err(MemoryBankError::InvalidConfig(errors));
        }
        let dir = dir.into();
        io::ensure_dir(&dir)?;
        Ok(Self {
            dir,
            archive_dir: PathBuf::from(&config.archive_dir),
            archive_file: config.archive_file.clone(),
            fallback_archive_file: config.fallback_archive_file.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, doc: &Document) -> PathBuf {
        match doc {
            Document::Tasks => self.dir.join(paths::TASKS_FILE),
            Document::ActiveContext => self.dir.join(paths::ACTIVE_CONTEXT_FILE),
            Document::Progress => self.dir.join(paths::PROGRESS_FILE),
            Document::ImplementationPlan => self.dir.join(paths::IMPLEMENTATION_PLAN_FILE),
            Document::Reflection => self.dir.join(paths::REFLECTION_FILE),
            Document::Creative(name) => self.dir.join(paths::creative_filename(name)),
            Document::Archive => self.archive_dir_path().join(&self.archive_file),
        }
    }

    fn archive_dir_path(&self) -> PathBuf {
        self.dir.join(&self.archive_dir)
    }

    fn fallback_archive_path(&self) -> PathBuf {
        self.dir.join(&self.fallback_archive_file)
    }

    pub fn exists(&self, doc: &Document) -> bool {
        self.path_of(doc).is_file()
    }

    /// Full content of `doc`, or an empty string if it has never been written.
    pub fn read(&self, doc: &Document) -> String {
        let path = self.path_of(doc);
        tracing::debug!(document = %doc, path = %path.display(), "read");
        io::read_or_empty(&path)
    }

    /// Replace `doc` with `content`, creating it if needed.
    pub fn write(&self, doc: &Document, content: &str) -> Result<()> {
        if *doc == Document::Archive {
            return self.write_archive(content).map(|_| ());
        }
        let path = self.path_of(doc);
        tracing::debug!(document = %doc, path = %path.display(), bytes = content.len(), "write");
        io::atomic_write(&path, content.as_bytes())
    }

    /// Write the archive into its nested directory, or at the top level of the
    /// store when that directory cannot be created or written.
    pub fn write_archive(&self, content: &str) -> Result<ArchiveLocation> {
        let primary = self.path_of(&Document::Archive);
        let attempt = io::ensure_dir(&self.archive_dir_path())
            .and_then(|_| io::atomic_write(&primary, content.as_bytes()));

        match attempt {
            Ok(()) => {
                tracing::debug!(path = %primary.display(), "archive written");
                Ok(ArchiveLocation::Primary(primary))
            }
            Err(e) => {
                let fallback = self.fallback_archive_path();
                tracing::warn!(
                    error = %e,
                    fallback = %fallback.display(),
                    "archive directory unavailable, writing archive at top level"
                );
                io::atomic_write(&fallback, content.as_bytes())?;
                Ok(ArchiveLocation::Fallback(fallback))
            }
        }
    }

    /// Archive content from whichever location holds it, primary first.
    pub fn read_archive(&self) -> String {
        let primary = self.path_of(&Document::Archive);
        if primary.is_file() {
            return io::read_or_empty(&primary);
        }
        io::read_or_empty(&self.fallback_archive_path())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
