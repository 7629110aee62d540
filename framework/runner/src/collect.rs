use std::path::{Path, PathBuf};

use anyhow::Context;
use baseline_core::prelude::MissingArtifactError;

/// Copy one collaborator-produced artifact into the fixture.
///
/// The source is never deleted or mutated. A missing source surfaces as
/// [MissingArtifactError] and aborts the enclosing scenario.
pub fn copy_artifact(source: &Path, destination: &Path) -> anyhow::Result<()> {
    if !source.is_file() {
        return Err(MissingArtifactError::new(source).into());
    }

    std::fs::copy(source, destination).with_context(|| {
        format!(
            "Failed to copy artifact {} to {}",
            source.display(),
            destination.display()
        )
    })?;

    Ok(())
}

/// Copy a set of data files into `dir`, preserving their base filenames.
///
/// Files are copied one at a time, each fully before the next begins. The first
/// missing file aborts.
pub fn copy_data_files(files: &[PathBuf], dir: &Path) -> anyhow::Result<()> {
    for file in files {
        let name = file
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Data file has no base name: {}", file.display()))?;
        copy_artifact(file, &dir.join(name))?;
    }

    Ok(())
}
