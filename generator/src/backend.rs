//! Wiring of the pipeline to the installed profiler toolchain.
//!
//! Every operation shells out to one of the profiler's own executables. The pipeline
//! stays in charge of ordering and fixture layout while the toolchain owns sampling,
//! report building and probe state.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::time::Duration;

use anyhow::Context;
use baseline_runner::prelude::*;
use serde::Deserialize;

/// Environment variable pointing at the profiler toolchain installation.
const PROFILER_HOME_ENV: &str = "PROFILER_HOME";

/// How long to wait for a launched application to write its info file.
const APP_INFO_TIMEOUT: Duration = Duration::from_secs(30);

/// A [ProfilerBackend] that drives the profiler command line tools.
pub struct ProfilerCli {
    toolchain_bin: PathBuf,
}

impl ProfilerCli {
    /// Locate the toolchain from `PROFILER_HOME`.
    pub fn from_env() -> anyhow::Result<Self> {
        let home = std::env::var(PROFILER_HOME_ENV).with_context(|| {
            format!(
                "Cannot drive the profiler without environment variable `{}`",
                PROFILER_HOME_ENV
            )
        })?;

        Ok(Self {
            toolchain_bin: PathBuf::from(home).join("bin"),
        })
    }

    fn tool(&self, name: &str) -> Command {
        Command::new(self.toolchain_bin.join(name))
    }

    fn run_tool(&self, mut cmd: Command, what: &str) -> anyhow::Result<Vec<u8>> {
        log::debug!("Running `{}`", what);

        let output = cmd
            .output()
            .with_context(|| format!("Failed to run `{}`", what))?;

        if !output.status.success() {
            anyhow::bail!(
                "`{}` command failed: {}",
                what,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(output.stdout)
    }
}

/// Manifest the report builder prints on stdout, describing everything it produced.
#[derive(Debug, Deserialize)]
struct NotebookManifest {
    notebook: PathBuf,
    data_file: PathBuf,
    app_name: String,
    app_info: PathBuf,
    profiles: Vec<PathBuf>,
    cpu_info: serde_json::Value,
    data_files: Vec<PathBuf>,
}

/// A launched target application.
///
/// The process is killed when the handle drops, on every exit path.
struct LaunchedApp {
    child: Child,
    metadata: AppMetadata,
}

impl AppHandle for LaunchedApp {
    fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }
}

impl Drop for LaunchedApp {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            log::warn!("Failed to stop application {}: {e:?}", self.metadata.name);
        }
        let _ = self.child.wait();
    }
}

impl ProfilerBackend for ProfilerCli {
    fn acquire_application(
        &self,
        ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<Box<dyn AppHandle>> {
        let app_info_path = scenario.dir.join("appinfo.txt");

        let child = self
            .tool(&scenario.app_name)
            .arg("--txn-count")
            .arg(ctx.txn_count().to_string())
            .arg("--thread-count")
            .arg(ctx.thread_count().to_string())
            .arg("--app-info")
            .arg(&app_info_path)
            .spawn()
            .with_context(|| format!("Failed to launch application {}", scenario.app_name))?;

        wait_for_file(&app_info_path, APP_INFO_TIMEOUT)?;

        Ok(Box::new(LaunchedApp {
            child,
            metadata: AppMetadata {
                name: scenario.app_name.clone(),
                app_info_path,
            },
        }))
    }

    fn run_profile(
        &self,
        ctx: &RunContext,
        scenario: &Scenario,
        app: &dyn AppHandle,
    ) -> anyhow::Result<Report> {
        let out_dir = scenario.dir.join("profiles");
        std::fs::create_dir_all(&out_dir).context("Failed to create profile output dir")?;

        let mut cmd = self.tool("profiler-record");
        cmd.arg("--app-info")
            .arg(&app.metadata().app_info_path)
            .arg("--txn-count")
            .arg(ctx.txn_count().to_string())
            .arg("--out")
            .arg(&out_dir);
        self.run_tool(cmd, "profiler-record")?;

        let mut profiles = std::fs::read_dir(&out_dir)
            .context("Failed to list recorded profiles")?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "pdata"))
            .collect::<Vec<_>>();
        profiles.sort();

        Ok(Report {
            app: app.metadata().clone(),
            profiles,
        })
    }

    fn build_notebook(
        &self,
        ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<NotebookOutput> {
        let mut cmd = self.tool("profiler-report");
        cmd.arg("--scenario")
            .arg(&scenario.dir)
            .arg("--txn-count")
            .arg(ctx.txn_count().to_string())
            .arg("--thread-count")
            .arg(ctx.thread_count().to_string())
            .arg("--manifest");
        let stdout = self.run_tool(cmd, "profiler-report")?;

        let manifest: NotebookManifest =
            serde_json::from_slice(&stdout).context("Failed to parse the notebook manifest")?;

        Ok(NotebookOutput {
            notebook_path: manifest.notebook,
            data_file_path: manifest.data_file,
            report: Report {
                app: AppMetadata {
                    name: manifest.app_name,
                    app_info_path: manifest.app_info,
                },
                profiles: manifest.profiles,
            },
            cpu_info: manifest.cpu_info,
            data_files: manifest.data_files,
        })
    }

    fn collect_probes(
        &self,
        _ctx: &RunContext,
        scenario: &Scenario,
    ) -> anyhow::Result<Vec<Probe>> {
        let mut cmd = self.tool("profiler-probes");
        cmd.arg("--scenario").arg(&scenario.dir);
        let stdout = self.run_tool(cmd, "profiler-probes")?;

        serde_json::from_slice(&stdout).context("Failed to parse the probe listing")
    }

    fn generate_profile_info(
        &self,
        app: &AppMetadata,
        probes: &[Probe],
    ) -> anyhow::Result<PathBuf> {
        let probes_path = app.app_info_path.with_file_name("probes.json");
        let probes_file = std::fs::File::create(&probes_path)
            .with_context(|| format!("Failed to create {}", probes_path.display()))?;
        serde_json::to_writer(probes_file, probes)
            .context("Failed to serialize probes for the profile info generator")?;

        let mut cmd = self.tool("profiler-generate");
        cmd.arg("--app-info")
            .arg(&app.app_info_path)
            .arg("--probes")
            .arg(&probes_path);
        let stdout = self.run_tool(cmd, "profiler-generate")?;

        let path = String::from_utf8(stdout)
            .context("Profile info generator printed a non UTF-8 path")?;
        Ok(PathBuf::from(path.trim()))
    }

    fn compute_benchmark(&self, profiles: &[PathBuf], target_dir: &Path) -> anyhow::Result<()> {
        let mut cmd = self.tool("profiler-benchmark");
        cmd.arg("--out").arg(target_dir.join("benchmark"));
        for profile in profiles {
            cmd.arg(profile);
        }
        self.run_tool(cmd, "profiler-benchmark")?;

        Ok(())
    }
}

fn wait_for_file(path: &Path, timeout: Duration) -> anyhow::Result<()> {
    let deadline = std::time::Instant::now() + timeout;
    while !path.is_file() {
        if std::time::Instant::now() > deadline {
            anyhow::bail!("Timed out waiting for {}", path.display());
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    Ok(())
}
