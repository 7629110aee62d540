use std::path::Path;

use anyhow::Context;

/// Remove every occurrence of the workspace path from a text artifact.
///
/// Reads `source` fully, strips `workspace` everywhere it appears as a substring and
/// writes the result to `destination`, which may be the same path as `source`. The
/// whole transformed content is held in memory before anything is written, so no
/// partial write is ever observable at the destination.
pub fn replace_workspace(
    source: &Path,
    workspace: &str,
    destination: &Path,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read artifact: {}", source.display()))?;

    let content = content.replace(workspace, "");

    std::fs::write(destination, content)
        .with_context(|| format!("Failed to write artifact: {}", destination.display()))?;

    Ok(())
}
