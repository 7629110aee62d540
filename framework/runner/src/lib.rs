mod benchmark;
mod cli;
mod collaborators;
mod collect;
mod context;
mod generate;
mod init;
mod normalize;
mod probes;
mod run;
mod scenario;

pub mod paths;

pub mod prelude {
    pub use crate::benchmark::generate_benchmark;
    pub use crate::cli::BaselineGeneratorCli;
    pub use crate::collaborators::{
        AppHandle, AppMetadata, NotebookOutput, Probe, ProfilerBackend, Report,
    };
    pub use crate::collect::{copy_artifact, copy_data_files};
    pub use crate::context::RunContext;
    pub use crate::generate::generate_baseline;
    pub use crate::init::init;
    pub use crate::normalize::replace_workspace;
    pub use crate::probes::{build_probe_map, read_probe_baseline, write_probe_baseline};
    pub use crate::run::run;
    pub use crate::scenario::{
        FsScenarioLoader, Scenario, ScenarioGuard, ScenarioLoader, ScenarioType,
    };
    pub use baseline_core::prelude::*;
}
