use crate::collaborators::ProfilerBackend;
use crate::context::RunContext;
use crate::normalize::replace_workspace;
use crate::paths::BENCHMARK_APP_INFO_FILE;
use crate::scenario::Scenario;

/// Run the extra profiling pass that captures comparison-baseline benchmark data.
///
/// Only meaningful for benchmark scenarios. The pass launches its own application
/// instance, so the info file it leaves under the benchmark directory is normalized
/// here, independently of the scenario's main info file.
pub fn generate_benchmark(
    ctx: &RunContext,
    scenario: &Scenario,
    backend: &dyn ProfilerBackend,
) -> anyhow::Result<()> {
    log::info!("Generating benchmark data for scenario: {}", scenario.name);

    let app = backend.acquire_application(ctx, scenario)?;
    let report = backend.run_profile(ctx, scenario, app.as_ref())?;

    backend.compute_benchmark(&report.profiles, &scenario.data_dir)?;

    let app_info = scenario.data_dir.join(BENCHMARK_APP_INFO_FILE);
    replace_workspace(&app_info, ctx.workspace(), &app_info)?;

    // `app` drops here, releasing the launched application. Errors above drop it too.
    Ok(())
}
