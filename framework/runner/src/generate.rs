use std::fs::File;

use anyhow::Context;
use baseline_core::prelude::FixtureExistsError;

use crate::benchmark::generate_benchmark;
use crate::collaborators::ProfilerBackend;
use crate::collect::{copy_artifact, copy_data_files};
use crate::context::RunContext;
use crate::normalize::replace_workspace;
use crate::paths::{
    APP_INFO_FILE, CPU_INFO_FILE, EXPECTED_RESULTS_DIR, PARAMETERS_DATA_DIR, PROBE_BASELINE_FILE,
    PROFILE_INFO_BASELINE_FILE, REPORT_BASELINE_FILE,
};
use crate::probes::{build_probe_map, write_probe_baseline};
use crate::scenario::{Scenario, ScenarioType};

/// Generate the complete baseline fixture bundle for one scenario.
///
/// The steps run in a fixed order and every failure is fatal to the scenario: baseline
/// generation is an offline, supervised operation where a failure must surface
/// immediately rather than leave a partially written bundle that looks valid. Nothing
/// is retried. The scenario's scoped context is released on every exit path.
pub fn generate_baseline(
    ctx: &RunContext,
    scenario: &Scenario,
    backend: &dyn ProfilerBackend,
) -> anyhow::Result<()> {
    log::info!(
        "Generating baseline for scenario: {} ({}, {})",
        scenario.name,
        scenario.app_name,
        scenario.scenario_type
    );

    // Checked before any side effect so that a conflicting run leaves no trace.
    if scenario.data_dir.exists() {
        return Err(FixtureExistsError::new(&scenario.data_dir).into());
    }
    std::fs::create_dir_all(&scenario.data_dir).with_context(|| {
        format!(
            "Failed to create fixture directory: {}",
            scenario.data_dir.display()
        )
    })?;
    for sub_dir in [PARAMETERS_DATA_DIR, EXPECTED_RESULTS_DIR] {
        std::fs::create_dir(scenario.data_dir.join(sub_dir)).with_context(|| {
            format!(
                "Failed to create fixture sub-directory {} for scenario: {}",
                sub_dir, scenario.name
            )
        })?;
    }

    let _guard = scenario.enter()?;

    if scenario.scenario_type == ScenarioType::Benchmark {
        generate_benchmark(ctx, scenario, backend)?;
    }

    let notebook = backend.build_notebook(ctx, scenario)?;
    log::debug!(
        "Notebook built for scenario {}: {}",
        scenario.name,
        notebook.notebook_path.display()
    );

    copy_artifact(
        &notebook.data_file_path,
        &scenario.data_dir.join(REPORT_BASELINE_FILE),
    )?;
    copy_data_files(
        &notebook.data_files,
        &scenario.data_dir.join(PARAMETERS_DATA_DIR),
    )?;

    replace_workspace(
        &notebook.report.app.app_info_path,
        ctx.workspace(),
        &scenario.data_dir.join(APP_INFO_FILE),
    )?;

    let cpu_info_path = scenario.data_dir.join(CPU_INFO_FILE);
    let cpu_info_file = File::create(&cpu_info_path)
        .with_context(|| format!("Failed to create {}", cpu_info_path.display()))?;
    serde_json::to_writer(cpu_info_file, &notebook.cpu_info)
        .context("Failed to serialize CPU info")?;

    let probes = backend.collect_probes(ctx, scenario)?;
    log::debug!(
        "Collected {} probes for scenario: {}",
        probes.len(),
        scenario.name
    );

    let profile_info = backend.generate_profile_info(&notebook.report.app, &probes)?;
    copy_artifact(
        &profile_info,
        &scenario.data_dir.join(PROFILE_INFO_BASELINE_FILE),
    )?;

    let probe_map = build_probe_map(probes);
    write_probe_baseline(&probe_map, &scenario.data_dir.join(PROBE_BASELINE_FILE))?;

    log::info!("Baseline complete for scenario: {}", scenario.name);

    Ok(())
}
