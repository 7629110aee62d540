use std::cell::Cell;
use std::path::{Path, PathBuf};

use baseline_runner::paths;
use baseline_runner::prelude::*;

const WORKSPACE: &str = "/home/ci/workspace/";

/// An in-process stand-in for the profiler toolchain.
///
/// Writes its "profiling" outputs under its own source directory so that tests can
/// check what the pipeline copied, normalized and serialized.
struct FakeBackend {
    source_dir: PathBuf,
    probes: Vec<Probe>,
    fail_notebook_build: bool,
    benchmark_runs: Cell<usize>,
}

impl FakeBackend {
    fn new(source_dir: &Path, probes: Vec<Probe>) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            probes,
            fail_notebook_build: false,
            benchmark_runs: Cell::new(0),
        }
    }

    fn app_metadata(&self, scenario: &Scenario) -> anyhow::Result<AppMetadata> {
        let app_info_path = self.source_dir.join("appinfo.txt");
        std::fs::write(
            &app_info_path,
            format!("binary: {WORKSPACE}bin/{}\npid: 4242\n", scenario.app_name),
        )?;
        Ok(AppMetadata {
            name: scenario.app_name.clone(),
            app_info_path,
        })
    }
}

struct FakeApp {
    metadata: AppMetadata,
}

impl AppHandle for FakeApp {
    fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }
}

impl ProfilerBackend for FakeBackend {
    fn acquire_application(
        &self,
        _ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<Box<dyn AppHandle>> {
        Ok(Box::new(FakeApp {
            metadata: self.app_metadata(scenario)?,
        }))
    }

    fn run_profile(
        &self,
        _ctx: &RunContext,
        _scenario: &Scenario,
        app: &dyn AppHandle,
    ) -> anyhow::Result<Report> {
        self.benchmark_runs.set(self.benchmark_runs.get() + 1);
        let profile = self.source_dir.join("benchmark-run.pdata");
        std::fs::write(&profile, b"benchmark profile bytes")?;
        Ok(Report {
            app: app.metadata().clone(),
            profiles: vec![profile],
        })
    }

    fn build_notebook(
        &self,
        _ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<NotebookOutput> {
        if self.fail_notebook_build {
            anyhow::bail!("notebook build exploded");
        }

        let notebook_path = self.source_dir.join("report.ipynb");
        std::fs::write(&notebook_path, b"{}")?;

        let data_file_path = self.source_dir.join("run.pdata");
        std::fs::write(&data_file_path, b"profile data bytes")?;

        let data_files = ["run-0.data", "run-1.data"]
            .iter()
            .map(|name| {
                let path = self.source_dir.join(name);
                std::fs::write(&path, name.as_bytes())?;
                Ok(path)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(NotebookOutput {
            notebook_path,
            data_file_path,
            report: Report {
                app: self.app_metadata(scenario)?,
                profiles: vec![],
            },
            cpu_info: serde_json::json!({
                "model": "Fake CPU @ 3.00GHz",
                "cores": 8,
                "frequency_hz": 3_000_000_000u64,
            }),
            data_files,
        })
    }

    fn collect_probes(
        &self,
        _ctx: &RunContext,
        _scenario: &Scenario,
    ) -> anyhow::Result<Vec<Probe>> {
        Ok(self.probes.clone())
    }

    fn generate_profile_info(
        &self,
        app: &AppMetadata,
        probes: &[Probe],
    ) -> anyhow::Result<PathBuf> {
        let path = self.source_dir.join("profile_info.txt");
        std::fs::write(&path, format!("app: {}\nprobes: {}\n", app.name, probes.len()))?;
        Ok(path)
    }

    fn compute_benchmark(&self, profiles: &[PathBuf], target_dir: &Path) -> anyhow::Result<()> {
        let benchmark_dir = target_dir.join(paths::BENCHMARK_DIR);
        std::fs::create_dir(&benchmark_dir)?;
        std::fs::write(
            benchmark_dir.join("summary.json"),
            format!("{{\"profiles\": {}}}", profiles.len()),
        )?;
        std::fs::write(
            benchmark_dir.join("appinfo.txt"),
            format!("binary: {WORKSPACE}bin/app\n"),
        )?;
        Ok(())
    }
}

fn probe(sys_name: &str) -> Probe {
    Probe {
        sys_name: sys_name.to_string(),
        name: format!("probe {}", sys_name),
        enabled: true,
    }
}

fn scenario(root: &Path, name: &str, scenario_type: ScenarioType) -> Scenario {
    let dir = root.join("data_txn_app").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    Scenario::new(dir, "data_txn_app", scenario_type).unwrap()
}

fn run_context() -> RunContext {
    RunContext::new(1000, 2, WORKSPACE.to_string())
}

#[test]
fn standard_scenario_produces_the_full_fixture_bundle() -> anyhow::Result<()> {
    env_logger::try_init().ok();

    let root = tempfile::tempdir()?;
    let scenario = scenario(root.path(), "regular", ScenarioType::Standard);
    let backend = FakeBackend::new(
        root.path(),
        vec![probe("p1"), probe("p2"), probe("p3")],
    );

    generate_baseline(&run_context(), &scenario, &backend)?;

    let fixture = &scenario.data_dir;

    // The report baseline is byte-identical to the notebook's profile data output.
    assert_eq!(
        std::fs::read(fixture.join(paths::REPORT_BASELINE_FILE))?,
        b"profile data bytes"
    );

    // Both auxiliary data files landed under their original base names.
    assert_eq!(
        std::fs::read(fixture.join(paths::PARAMETERS_DATA_DIR).join("run-0.data"))?,
        b"run-0.data"
    );
    assert_eq!(
        std::fs::read(fixture.join(paths::PARAMETERS_DATA_DIR).join("run-1.data"))?,
        b"run-1.data"
    );

    // The app info was workspace normalized.
    let app_info = std::fs::read_to_string(fixture.join(paths::APP_INFO_FILE))?;
    assert!(!app_info.contains(WORKSPACE));
    assert!(app_info.contains("binary: bin/data_txn_app"));

    // The probe baseline deserializes to exactly the collected probe names.
    let probe_map = read_probe_baseline(&fixture.join(paths::PROBE_BASELINE_FILE))?;
    pretty_assertions::assert_eq!(
        probe_map.keys().cloned().collect::<Vec<_>>(),
        vec!["p1", "p2", "p3"]
    );

    // Every artifact of the bundle exists and is non-empty.
    for artifact in [
        paths::REPORT_BASELINE_FILE,
        paths::APP_INFO_FILE,
        paths::CPU_INFO_FILE,
        paths::PROFILE_INFO_BASELINE_FILE,
        paths::PROBE_BASELINE_FILE,
    ] {
        let metadata = std::fs::metadata(fixture.join(artifact))?;
        assert!(metadata.len() > 0, "{} is empty", artifact);
    }
    assert!(fixture.join(paths::EXPECTED_RESULTS_DIR).is_dir());

    // No benchmark artifact for a standard scenario.
    assert!(!fixture.join(paths::BENCHMARK_DIR).exists());
    assert_eq!(backend.benchmark_runs.get(), 0);

    // The CPU info is valid structured text.
    let cpu_info: serde_json::Value =
        serde_json::from_slice(&std::fs::read(fixture.join(paths::CPU_INFO_FILE))?)?;
    assert_eq!(cpu_info["cores"], 8);

    Ok(())
}

#[test]
fn benchmark_scenario_additionally_writes_normalized_benchmark_data() -> anyhow::Result<()> {
    env_logger::try_init().ok();

    let root = tempfile::tempdir()?;
    let scenario = scenario(root.path(), "benchmark_txn", ScenarioType::Benchmark);
    let backend = FakeBackend::new(root.path(), vec![probe("p1")]);

    generate_baseline(&run_context(), &scenario, &backend)?;

    assert_eq!(backend.benchmark_runs.get(), 1);

    let benchmark_app_info =
        std::fs::read_to_string(scenario.data_dir.join(paths::BENCHMARK_APP_INFO_FILE))?;
    assert!(!benchmark_app_info.contains(WORKSPACE));
    assert!(benchmark_app_info.contains("binary: bin/app"));

    assert!(scenario
        .data_dir
        .join(paths::BENCHMARK_DIR)
        .join("summary.json")
        .is_file());

    Ok(())
}

#[test]
fn pre_existing_fixture_directory_aborts_before_any_side_effect() {
    env_logger::try_init().ok();

    let root = tempfile::tempdir().unwrap();
    let scenario = scenario(root.path(), "regular", ScenarioType::Standard);
    std::fs::create_dir_all(&scenario.data_dir).unwrap();
    let backend = FakeBackend::new(root.path(), vec![]);

    let err = generate_baseline(&run_context(), &scenario, &backend).unwrap_err();

    assert!(err.is::<FixtureExistsError>());
    assert!(!scenario.data_dir.join(paths::PARAMETERS_DATA_DIR).exists());
    assert!(!scenario.data_dir.join(paths::EXPECTED_RESULTS_DIR).exists());
}

#[test]
fn collaborator_failure_propagates_and_still_releases_the_scenario() {
    env_logger::try_init().ok();

    let root = tempfile::tempdir().unwrap();
    let scenario = scenario(root.path(), "regular", ScenarioType::Standard);
    let mut backend = FakeBackend::new(root.path(), vec![]);
    backend.fail_notebook_build = true;

    let err = generate_baseline(&run_context(), &scenario, &backend).unwrap_err();

    assert_eq!(err.to_string(), "notebook build exploded");
    // The scenario's scoped context was exited: its scratch area is gone.
    assert!(!scenario.dir.join(".scratch").exists());
}

#[test]
fn driver_processes_discovered_scenarios_and_fails_fast() {
    env_logger::try_init().ok();

    let root = tempfile::tempdir().unwrap();
    let run_dir = root.path().join("run");
    for path in ["data_txn_app/scenario_a", "data_txn_app/scenario_b"] {
        std::fs::create_dir_all(run_dir.join(path)).unwrap();
    }
    // Make the second scenario abort by pre-creating its fixture directory.
    std::fs::create_dir_all(run_dir.join("data_txn_app/scenario_b/fixture")).unwrap();
    let backend = FakeBackend::new(root.path(), vec![probe("p1")]);

    let err = run(
        &run_context(),
        &run_dir,
        &["data_txn_app"],
        &FsScenarioLoader,
        &backend,
    )
    .unwrap_err();

    // The first scenario completed before the second aborted the run.
    assert!(run_dir
        .join("data_txn_app/scenario_a/fixture")
        .join(paths::PROBE_BASELINE_FILE)
        .is_file());
    assert!(err.is::<FixtureExistsError>());
}
