//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Dataset readers and result writers go through these helpers so every file
//! touched by the engine is opened via a capability-scoped directory handle.
//! Exports are staged beside their destination and renamed into place, so a
//! failed export never leaves a truncated results file behind.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Suffix appended to the hidden sibling that holds an export in progress.
const STAGING_SUFFIX: &str = ".partial";

/// Open a UTF-8 file path for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create any missing directories above `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let (root, relative) = split_at_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    root.create_dir_all(&relative)
}

/// Return whether `path` exists and is a regular file.
///
/// A missing path surfaces as an `io::ErrorKind::NotFound` error so callers
/// can tell it apart from a directory.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_dir_and_name(path)?;
    dir.metadata(&name).map(|meta| meta.is_file())
}

/// An export being written to a hidden sibling of its destination.
///
/// [`StagedFile::commit`] renames the staged file over the destination.
/// Dropping an uncommitted stage removes the partial file and leaves any
/// previous destination untouched.
#[derive(Debug)]
pub struct StagedFile {
    dir: fs_utf8::Dir,
    staged: String,
    target: String,
    committed: bool,
}

impl StagedFile {
    /// Create the staging file for `path` and return it open for writing.
    ///
    /// The parent directory must already exist; pair with
    /// [`ensure_parent_dir`] when writing into a fresh output tree.
    pub fn create(path: &Utf8Path) -> io::Result<(Self, fs_utf8::File)> {
        let (dir, target) = parent_dir_and_name(path)?;
        let staged = format!(".{target}{STAGING_SUFFIX}");
        let file = dir.create(&staged)?;
        Ok((
            Self {
                dir,
                staged,
                target,
                committed: false,
            },
            file,
        ))
    }

    /// Move the staged file into place, replacing any existing destination.
    pub fn commit(mut self) -> io::Result<()> {
        self.dir.rename(&self.staged, &self.dir, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            // Best effort: the export error is what the caller reports.
            let _ = self.dir.remove_file(&self.staged);
        }
    }
}

fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Open the root that anchors `path` and return the remainder relative to it.
///
/// Absolute paths are anchored at their root (a drive or UNC share on
/// Windows); relative paths at the working directory.
fn split_at_root(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let root = path.ancestors().last().unwrap_or(path);
    let (base, relative) = if root.as_str().is_empty() {
        (Utf8Path::new("."), path)
    } else {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| io::Error::other(format!("{path} does not start with {root}")))?;
        (root, relative)
    };
    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?;
    Ok((dir, relative.to_path_buf()))
}
