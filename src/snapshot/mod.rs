//! Snapshot sets: flat directories of `<name>.txt` files, one per document.
//!
//! Two sets exist side by side, the baseline ("original") and the current
//! observation ("temp"). Nothing is ever pruned.

pub mod compare;
pub mod fetch;

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{Error, PortError};

const SNAPSHOT_EXT: &str = ".txt";

/// One snapshot directory, accessed through the context's filesystem port.
pub struct SnapshotStore<'a> {
    ctx: &'a ServiceContext,
    dir: PathBuf,
}

impl<'a> SnapshotStore<'a> {
    /// Creates a store rooted at `dir`. Nothing is touched on disk.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, dir: &Path) -> Self {
        Self { ctx, dir: dir.to_path_buf() }
    }

    /// The directory this store reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the directory cannot be created.
    pub fn ensure_exists(&self) -> Result<(), Error> {
        self.ctx
            .fs
            .create_dir_all(&self.dir)
            .map_err(|source| Error::Snapshot { path: self.dir.clone(), source })
    }

    /// Path of the snapshot file for `name`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{SNAPSHOT_EXT}"))
    }

    /// Returns `true` if a snapshot for `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ctx.fs.exists(&self.path_for(name))
    }

    /// Writes (or overwrites) the snapshot for `name`.
    ///
    /// # Errors
    ///
    /// Returns the filesystem error if the write fails.
    pub fn save(&self, name: &str, content: &str) -> Result<PathBuf, PortError> {
        let path = self.path_for(name);
        self.ctx.fs.write(&path, content)?;
        Ok(path)
    }

    /// Reads the snapshot for `name`.
    ///
    /// # Errors
    ///
    /// Returns the filesystem error if the file is missing or unreadable.
    pub fn load(&self, name: &str) -> Result<String, PortError> {
        self.ctx.fs.read_to_string(&self.path_for(name))
    }

    /// Names of all snapshots in the directory, sorted. Other files are ignored.
    /// A file named `.txt` is the snapshot of a document with an empty name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the directory cannot be listed.
    pub fn names(&self) -> Result<Vec<String>, Error> {
        let entries = self
            .ctx
            .fs
            .list_dir(&self.dir)
            .map_err(|source| Error::Snapshot { path: self.dir.clone(), source })?;
        let mut names: Vec<String> = entries
            .iter()
            .filter_map(|entry| entry.strip_suffix(SNAPSHOT_EXT))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }
}
