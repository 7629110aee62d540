use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

/// Directory name prefix that marks a scenario as a benchmark scenario.
const BENCHMARK_PREFIX: &str = "benchmark";

/// The name of the fixture data directory inside a scenario directory.
const FIXTURE_DIR: &str = "fixture";

/// The scratch area a scenario works in while it is active.
const SCRATCH_DIR: &str = ".scratch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ScenarioType {
    /// A plain profiling scenario.
    Standard,
    /// A scenario that additionally captures comparison-baseline benchmark data.
    Benchmark,
}

/// One test case to generate a baseline fixture for.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// The scenario name, which should be unique within its application.
    pub name: String,
    /// The target application this scenario profiles.
    pub app_name: String,
    pub scenario_type: ScenarioType,
    /// The scenario's own directory inside the run directory.
    pub dir: PathBuf,
    /// Where the fixture bundle for this scenario is written.
    ///
    /// Created fresh by baseline generation. Must not exist beforehand.
    pub data_dir: PathBuf,
}

impl Scenario {
    pub fn new(
        dir: PathBuf,
        app_name: impl Into<String>,
        scenario_type: ScenarioType,
    ) -> anyhow::Result<Self> {
        let name = dir
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Scenario directory has no name: {}", dir.display()))?;

        let data_dir = dir.join(FIXTURE_DIR);

        Ok(Self {
            name,
            app_name: app_name.into(),
            scenario_type,
            dir,
            data_dir,
        })
    }

    /// Enter the scenario's scoped context.
    ///
    /// Creates the scratch area the profiling pass works in. The returned guard removes
    /// it again when dropped, on every exit path.
    pub fn enter(&self) -> anyhow::Result<ScenarioGuard<'_>> {
        let scratch = self.dir.join(SCRATCH_DIR);
        std::fs::create_dir_all(&scratch).with_context(|| {
            format!(
                "Failed to create scratch directory for scenario: {}",
                self.name
            )
        })?;

        log::debug!("Entered scenario: {}", self.name);

        Ok(ScenarioGuard {
            scenario: self,
            scratch,
        })
    }
}

/// Scoped handle on an active scenario.
///
/// Dropping the guard releases the scenario's resources regardless of whether the
/// enclosing work succeeded.
pub struct ScenarioGuard<'a> {
    scenario: &'a Scenario,
    scratch: PathBuf,
}

impl ScenarioGuard<'_> {
    /// The scratch area the profiling pass may write intermediate files into.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch
    }
}

impl Drop for ScenarioGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.scratch) {
            // Nothing to propagate from a destructor, the leftover scratch directory is
            // harmless for the fixture itself.
            log::warn!(
                "Failed to clean up scratch directory for scenario {}: {e:?}",
                self.scenario.name
            );
        }
        log::debug!("Left scenario: {}", self.scenario.name);
    }
}

/// Discovery of the scenarios to process for a run.
pub trait ScenarioLoader {
    /// Discover all scenarios under `run_dir` for the given applications.
    ///
    /// The returned order is the processing order.
    fn load_scenarios(&self, run_dir: &Path, app_names: &[&str]) -> anyhow::Result<Vec<Scenario>>;
}

/// Loads scenarios from a run directory laid out as `<run_dir>/<app>/<scenario>`.
///
/// Scenarios are discovered per application in the order the applications are given,
/// and alphabetically within an application. A scenario directory whose name starts
/// with `benchmark` is treated as a benchmark scenario.
#[derive(Debug, Default)]
pub struct FsScenarioLoader;

impl ScenarioLoader for FsScenarioLoader {
    fn load_scenarios(&self, run_dir: &Path, app_names: &[&str]) -> anyhow::Result<Vec<Scenario>> {
        let mut scenarios = Vec::new();

        for app_name in app_names {
            let app_dir = run_dir.join(app_name);
            if !app_dir.is_dir() {
                log::warn!("No run data for application: {}", app_name);
                continue;
            }

            for entry in WalkDir::new(&app_dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry
                    .with_context(|| format!("Failed to read run directory for {}", app_name))?;
                if !entry.file_type().is_dir() {
                    continue;
                }

                let scenario_type = if entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(BENCHMARK_PREFIX)
                {
                    ScenarioType::Benchmark
                } else {
                    ScenarioType::Standard
                };

                scenarios.push(Scenario::new(
                    entry.path().to_path_buf(),
                    *app_name,
                    scenario_type,
                )?);
            }
        }

        Ok(scenarios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_scenarios_in_app_order_then_by_name() {
        let run_dir = tempfile::tempdir().unwrap();
        for path in [
            "app_b/scenario_z",
            "app_b/scenario_a",
            "app_a/scenario_m",
            "ignored_app/scenario_x",
        ] {
            std::fs::create_dir_all(run_dir.path().join(path)).unwrap();
        }

        let scenarios = FsScenarioLoader
            .load_scenarios(run_dir.path(), &["app_b", "app_a"])
            .unwrap();

        let names = scenarios
            .iter()
            .map(|s| format!("{}/{}", s.app_name, s.name))
            .collect::<Vec<_>>();
        pretty_assertions::assert_eq!(
            names,
            vec!["app_b/scenario_a", "app_b/scenario_z", "app_a/scenario_m"]
        );
    }

    #[test]
    fn benchmark_directories_are_typed_as_benchmark() {
        let run_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(run_dir.path().join("app/benchmark_alloc")).unwrap();
        std::fs::create_dir_all(run_dir.path().join("app/regular")).unwrap();

        let scenarios = FsScenarioLoader
            .load_scenarios(run_dir.path(), &["app"])
            .unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].scenario_type, ScenarioType::Benchmark);
        assert_eq!(scenarios[1].scenario_type, ScenarioType::Standard);
    }

    #[test]
    fn guard_removes_scratch_directory_on_drop() {
        let run_dir = tempfile::tempdir().unwrap();
        let dir = run_dir.path().join("app/scenario");
        std::fs::create_dir_all(&dir).unwrap();
        let scenario = Scenario::new(dir.clone(), "app", ScenarioType::Standard).unwrap();

        let scratch = {
            let guard = scenario.enter().unwrap();
            assert!(guard.scratch_dir().is_dir());
            guard.scratch_dir().to_path_buf()
        };

        assert!(!scratch.exists());
    }
}
