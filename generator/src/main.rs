use anyhow::Context;
use baseline_runner::prelude::*;

mod backend;

/// The target applications baselines are generated for.
const APPS: &[&str] = &[
    "allocator_app",
    "data_txn_app",
    "multi_threaded_app",
    "slow_fix_decoder_app",
];

fn main() -> anyhow::Result<()> {
    let cli = init();

    let workspace = match cli.workspace {
        Some(workspace) => workspace,
        None => std::env::current_dir()
            .context("Failed to determine the current directory for the workspace default")?
            .to_string_lossy()
            .into_owned(),
    };

    let ctx = RunContext::new(cli.txn_count, cli.thread_count, workspace);
    let backend = backend::ProfilerCli::from_env()?;

    run(&ctx, &cli.run_dir, APPS, &FsScenarioLoader, &backend)
}
