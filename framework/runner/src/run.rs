use std::path::Path;

use anyhow::Context;

use crate::collaborators::ProfilerBackend;
use crate::context::RunContext;
use crate::generate::generate_baseline;
use crate::scenario::ScenarioLoader;

/// Generate baselines for every discovered scenario, in discovery order.
///
/// Fail-fast: the first scenario to abort stops the whole run. A partially generated
/// fixture set is worse than a stopped run, so no scenario failure is caught to allow
/// the remaining scenarios to continue.
pub fn run(
    ctx: &RunContext,
    run_dir: &Path,
    app_names: &[&str],
    loader: &dyn ScenarioLoader,
    backend: &dyn ProfilerBackend,
) -> anyhow::Result<()> {
    let scenarios = loader
        .load_scenarios(run_dir, app_names)
        .context("Scenario discovery failed")?;

    log::info!(
        "Discovered {} scenarios under {}",
        scenarios.len(),
        run_dir.display()
    );

    for scenario in &scenarios {
        generate_baseline(ctx, scenario, backend).with_context(|| {
            format!(
                "Baseline generation failed for scenario: {} ({})",
                scenario.name, scenario.app_name
            )
        })?;
    }

    Ok(())
}
