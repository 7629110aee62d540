use crate::cli::BaselineGeneratorCli;
use clap::Parser;

/// Initialise the CLI and logging for the baseline generator.
pub fn init() -> BaselineGeneratorCli {
    env_logger::init();

    BaselineGeneratorCli::parse()
}
