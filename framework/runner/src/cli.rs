use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct BaselineGeneratorCli {
    /// Directory where the run files for each application have been unpacked
    #[clap(long)]
    pub run_dir: PathBuf,

    /// The number of transactions the target applications should generate
    #[clap(long, default_value_t = 1000)]
    pub txn_count: u64,

    /// The number of threads the target applications should run with
    #[clap(long, default_value_t = 2)]
    pub thread_count: usize,

    /// Absolute path prefix to trim off of file paths in generated artifacts.
    ///
    /// Defaults to the current working directory.
    #[clap(long)]
    pub workspace: Option<String>,
}
