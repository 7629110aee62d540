//! The fixed layout of a scenario's fixture bundle.
//!
//! These names are contractual. Later regression runs look artifacts up by these exact
//! paths, relative to the scenario's fixture data directory.

/// Sub-directory holding auxiliary profiling data files, copied verbatim.
pub const PARAMETERS_DATA_DIR: &str = "parameters";

/// Sub-directory reserved for comparison artifacts.
pub const EXPECTED_RESULTS_DIR: &str = "expected_results";

/// The notebook-produced profile data, copied under a fixed name.
pub const REPORT_BASELINE_FILE: &str = "report_baseline.pdata";

/// Workspace-normalized copy of the application's info file.
pub const APP_INFO_FILE: &str = "appinfo.txt";

/// Structured-text dump of the full CPU info captured during the run.
pub const CPU_INFO_FILE: &str = "cpu_info.json";

/// Output of the external profile-info generator, copied under a fixed name.
pub const PROFILE_INFO_BASELINE_FILE: &str = "profile_info_baseline.txt";

/// Binary-serialized mapping of probe system name to probe state.
pub const PROBE_BASELINE_FILE: &str = "probe_baseline.bin";

/// Sub-directory the benchmark computation writes into, for benchmark scenarios only.
pub const BENCHMARK_DIR: &str = "benchmark";

/// Workspace-normalized info file of the application launched by the benchmark pass.
pub const BENCHMARK_APP_INFO_FILE: &str = "benchmark/appinfo.txt";
