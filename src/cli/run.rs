use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// Python interpreter that runs the coverage-wrapped discovery
    #[arg(short = 'p', long, help = "Path to the python interpreter")]
    pub python: PathBuf,

    /// Directory holding the generated tests
    #[arg(short = 't', long, help = "Directory of generated tests")]
    pub test_dir: PathBuf,

    /// Source root measured by the coverage profile
    #[arg(short = 'c', long, help = "Directory of the sources under test")]
    pub code_dir: PathBuf,
}
