//! The seam to the profiling engine.
//!
//! Baseline generation drives the profiler but does not implement it. Everything the
//! pipeline needs from the engine is expressed here so that it can be faked in tests
//! and wired to the real toolchain by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::scenario::Scenario;

/// Metadata for a launched target application.
#[derive(Debug, Clone)]
pub struct AppMetadata {
    pub name: String,
    /// The info file the application wrote at startup.
    ///
    /// Contains absolute paths from the launching machine and must be workspace
    /// normalized before it lands in a fixture.
    pub app_info_path: PathBuf,
}

/// The result of one profiling pass.
#[derive(Debug, Clone)]
pub struct Report {
    pub app: AppMetadata,
    /// The profile data files the pass produced.
    pub profiles: Vec<PathBuf>,
}

/// Everything a notebook build produces for a scenario.
#[derive(Debug)]
pub struct NotebookOutput {
    /// The built notebook itself. Not part of the fixture bundle.
    pub notebook_path: PathBuf,
    /// The profile data artifact the notebook build emitted.
    pub data_file_path: PathBuf,
    pub report: Report,
    /// Full CPU info for the machine the run executed on.
    pub cpu_info: serde_json::Value,
    /// Auxiliary data files to be copied into the fixture verbatim.
    pub data_files: Vec<PathBuf>,
}

/// One instrumentation point in the profiled application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    /// The stable system name. Unique key in the probe baseline map.
    pub sys_name: String,
    pub name: String,
    pub enabled: bool,
}

/// A scoped handle on a launched target application.
///
/// Dropping the handle stops the application. Implementations must make release safe
/// on every exit path, including error paths.
pub trait AppHandle {
    fn metadata(&self) -> &AppMetadata;
}

/// The external profiler operations baseline generation depends on.
pub trait ProfilerBackend {
    /// Launch the target application for a scenario.
    fn acquire_application(
        &self,
        ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<Box<dyn AppHandle>>;

    /// Run a profiling pass against an already launched application.
    fn run_profile(
        &self,
        ctx: &RunContext,
        scenario: &Scenario,
        app: &dyn AppHandle,
    ) -> anyhow::Result<Report>;

    /// Build the analysis notebook for a scenario, profiling as needed.
    fn build_notebook(
        &self,
        ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<NotebookOutput>;

    /// Collect the current probes of the profiled application.
    fn collect_probes(&self, ctx: &RunContext, scenario: &Scenario)
        -> anyhow::Result<Vec<Probe>>;

    /// Generate a profile info file for an application and its probes.
    ///
    /// Returns the path of the generated file.
    fn generate_profile_info(
        &self,
        app: &AppMetadata,
        probes: &[Probe],
    ) -> anyhow::Result<PathBuf>;

    /// Compute benchmark summary data from profiles and write it under `target_dir`.
    ///
    /// Writes into the `benchmark` sub-directory of `target_dir`, including the
    /// benchmark application's own info file.
    fn compute_benchmark(&self, profiles: &[PathBuf], target_dir: &Path) -> anyhow::Result<()>;
}
