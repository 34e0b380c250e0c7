use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::{FRAME_DIR_SUFFIX, FRAME_EXTENSION, FRAME_INDEX_DIGITS};

/// Directory holding the numbered frame images of one recording job.
///
/// Lives next to the destination file and is named after its stem, so a
/// rerun of the same job lands in (and first wipes) the same directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScratchFrameDir {
    path: PathBuf,
}

impl ScratchFrameDir {
    /// Returns `None` when `destination` has no file name to derive from.
    pub fn for_destination(destination: &Path) -> Option<Self> {
        let stem = destination.file_stem()?.to_string_lossy();
        Some(Self {
            path: destination.with_file_name(format!("{stem}{FRAME_DIR_SUFFIX}")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.path.join(format!(
            "{index:0width$}.{FRAME_EXTENSION}",
            width = FRAME_INDEX_DIGITS
        ))
    }

    /// printf-style pattern matching every [`frame_path`](Self::frame_path).
    pub fn frame_pattern(&self) -> PathBuf {
        self.path
            .join(format!("%0{FRAME_INDEX_DIGITS}d.{FRAME_EXTENSION}"))
    }

    /// Deletes the directory, then creates it again empty.
    ///
    /// Fails if the old contents cannot be removed completely, since any
    /// surviving frame would be picked up by the encoder's input pattern.
    pub fn reset(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => log::debug!("removed stale frames in {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(&self.path)
    }

    pub fn remove(&self) -> io::Result<()> {
        fs::remove_dir_all(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }
}
