use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::collaborators::Probe;

/// Build the baseline map from collected probes, keyed by probe system name.
///
/// If two probes share a system name the later one silently overwrites the earlier.
/// Duplicate system names do not occur in a well-formed application and this matches
/// the behavior later regression comparisons were built against, so it is kept rather
/// than turned into an error.
pub fn build_probe_map(probes: impl IntoIterator<Item = Probe>) -> BTreeMap<String, Probe> {
    probes
        .into_iter()
        .map(|probe| (probe.sys_name.clone(), probe))
        .collect()
}

/// Serialize the probe baseline map to `path`.
pub fn write_probe_baseline(map: &BTreeMap<String, Probe>, path: &Path) -> anyhow::Result<()> {
    let encoded = rmp_serde::to_vec(map).context("Failed to serialize probe baseline map")?;
    std::fs::write(path, encoded)
        .with_context(|| format!("Failed to write probe baseline: {}", path.display()))?;
    Ok(())
}

/// Load a probe baseline map previously written by [write_probe_baseline].
pub fn read_probe_baseline(path: &Path) -> anyhow::Result<BTreeMap<String, Probe>> {
    let encoded = std::fs::read(path)
        .with_context(|| format!("Failed to read probe baseline: {}", path.display()))?;
    rmp_serde::from_slice(&encoded).context("Failed to deserialize probe baseline map")
}
