use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::HistoryError;

/// Sidecars copied along with the store when present.
pub const COPIED_SIDECARS: [&str; 2] = ["-journal", "-wal"];

/// Everything SQLite may leave next to the scratch copy, including the shared memory index it
/// creates when the copy is opened in WAL mode.
pub const REMOVED_SIDECARS: [&str; 3] = ["-journal", "-wal", "-shm"];

pub fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Copy of a database file that is deleted, together with its sidecars, when dropped. The guard
/// exists before anything is copied, so a copy that fails halfway is cleaned up too.
#[derive(Debug)]
pub struct ScratchCopy {
    path: PathBuf,
}

impl ScratchCopy {
    /// Refuses with [HistoryError::ScratchIsStore] when `scratch` or one of its sidecars is the
    /// store itself or one of the store's sidecars. Nothing is touched in that case.
    pub fn create(source: &Path, scratch: &Path) -> Result<Self, HistoryError> {
        if overlaps_store(source, scratch) {
            return Err(HistoryError::ScratchIsStore(scratch.to_path_buf()));
        }

        let copy = Self {
            path: scratch.to_path_buf(),
        };
        // Leftovers from an interrupted run would otherwise be replayed onto the fresh copy.
        for suffix in REMOVED_SIDECARS {
            remove_if_present(&sidecar_path(&copy.path, suffix));
        }

        let bytes = fs::copy(source, &copy.path)?;
        debug!("Copied {bytes} bytes from {source:?} to {:?}", copy.path);

        for suffix in COPIED_SIDECARS {
            let sidecar = sidecar_path(source, suffix);
            if sidecar.exists() {
                fs::copy(&sidecar, sidecar_path(&copy.path, suffix))?;
                debug!("Copied sidecar {sidecar:?}");
            }
        }

        Ok(copy)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Canonical form of `path`, also for files that don't exist yet as long as their directory does.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(path) = path.canonicalize() {
        return path;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|parent| parent.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn with_sidecars(path: &Path) -> Vec<PathBuf> {
    std::iter::once(path.to_path_buf())
        .chain(REMOVED_SIDECARS.iter().map(|suffix| sidecar_path(path, suffix)))
        .map(|path| resolve(&path))
        .collect()
}

/// Whether any file the scratch copy may create or delete belongs to the store.
pub fn overlaps_store(source: &Path, scratch: &Path) -> bool {
    let store_files = with_sidecars(source);
    with_sidecars(scratch)
        .iter()
        .any(|path| store_files.contains(path))
}

fn remove_if_present(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed {path:?}"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => (),
        Err(e) => warn!("Failed to remove scratch file {path:?}: {e}"),
    }
}

impl Drop for ScratchCopy {
    fn drop(&mut self) {
        remove_if_present(&self.path);
        for suffix in REMOVED_SIDECARS {
            remove_if_present(&sidecar_path(&self.path, suffix));
        }
    }
}
