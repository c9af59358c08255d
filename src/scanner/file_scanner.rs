//! Directory traversal

use log::warn;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{DedupError, Result};

/// A regular file found during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Base file name, exactly as the filesystem reports it
    pub name: OsString,
}

/// Resolve the scan root to an absolute directory path
///
/// Fails before any traversal happens if the root is missing, unreadable,
/// or not a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(root).map_err(|source| DedupError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;

    let metadata = fs::metadata(&resolved).map_err(|source| DedupError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(DedupError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    Ok(resolved)
}

/// Lazy walk over the regular files below a root
///
/// Entries are visited depth-first, with the children of each directory
/// sorted by file name, so the order is the same on every run over an
/// unchanged tree. Symbolic links are not followed and are not yielded;
/// neither are sockets, FIFOs or device nodes. Those entries are logged at
/// warn level and remembered in [`FileWalk::skipped`].
pub struct FileWalk {
    inner: walkdir::IntoIter,
    root: PathBuf,
    skipped: Vec<PathBuf>,
}

impl FileWalk {
    /// Entries passed over so far because they are not regular files
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }
}

impl Iterator for FileWalk {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    return Some(Err(DedupError::Walk { path, source }));
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                warn!("Skipping non-regular entry {}", entry.path().display());
                self.skipped.push(entry.into_path());
                continue;
            }

            return Some(Ok(FileEntry {
                name: entry.file_name().to_os_string(),
                path: entry.into_path(),
            }));
        }
    }
}

/// Start a walk of all regular files below `root`
///
/// # Arguments
/// * `root` - Directory to scan
///
/// # Returns
/// An iterator whose items fail with `DedupError::Walk` if an entry cannot
/// be read. Callers are expected to stop at the first error.
pub fn walk_files(root: &Path) -> Result<FileWalk> {
    let root = resolve_root(root)?;
    let inner = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(FileWalk {
        inner,
        root,
        skipped: Vec::new(),
    })
}

/// Everything a completed walk found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Regular files in traversal order
    pub files: Vec<FileEntry>,
    /// Symlinks and special files that were not cataloged
    pub skipped: Vec<PathBuf>,
}

/// Walk `root` to the end, stopping at the first error
pub fn traverse(root: &Path) -> Result<Traversal> {
    let mut walk = walk_files(root)?;
    let files = walk.by_ref().collect::<Result<Vec<_>>>()?;

    Ok(Traversal {
        files,
        skipped: walk.skipped,
    })
}

/// Collect every regular file below `root`, stopping at the first error
///
/// # Arguments
/// * `root` - Directory to scan
///
/// # Returns
/// Files in traversal order
pub fn collect_files(root: &Path) -> Result<Vec<FileEntry>> {
    traverse(root).map(|traversal| traversal.files)
}
