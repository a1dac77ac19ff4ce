use std::{fs, io, path::Path};

use crate::{Artifact, Error};

/// Writes a rendered artifact tree under `root`, all-or-nothing.
///
/// Everything is staged in a temporary directory next to `root` first, then
/// moved into place with a single rename, so a failed run never leaves a
/// partial tree that could pass for valid output. An existing tree at `root`
/// is replaced.
pub fn write_tree(root: &Path, artifacts: &[Artifact]) -> Result<(), Error> {
    let parent = root.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)?;
    }
    let staging = match parent {
        Some(parent) => tempfile::tempdir_in(parent)?,
        None => tempfile::tempdir()?,
    };

    for artifact in artifacts {
        let target = staging.path().join(&artifact.path);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|source| Error::Write {
                path: artifact.path.clone(),
                source,
            })?;
        }
        fs::write(&target, &artifact.contents).map_err(|source| Error::Write {
            path: artifact.path.clone(),
            source,
        })?;
        tracing::debug!(path = %artifact.path.display(), "staged artifact");
    }

    if root.exists() {
        fs::remove_dir_all(root)?;
    }
    let staged = staging.keep();
    if let Err(err) = fs::rename(&staged, root) {
        // Cross-device moves fall back to a copy; clean up the staging dir.
        if err.kind() == io::ErrorKind::CrossesDevices {
            copy_tree(&staged, root)?;
            fs::remove_dir_all(&staged)?;
        } else {
            let _ = fs::remove_dir_all(&staged);
            return Err(err.into());
        }
    }

    tracing::info!(root = %root.display(), files = artifacts.len(), "wrote artifact tree");
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<(), Error> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
