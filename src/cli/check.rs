use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Default)]
pub struct CheckArgs {
    /// Directory holding the per-group coverage reports
    #[arg(short = 'i', long, help = "Directory of coverage reports")]
    pub coverage_dir: PathBuf,

    /// Test plan the reports are checked against
    #[arg(short = 'c', long, help = "Path to the JSON test plan")]
    pub config: PathBuf,
}
