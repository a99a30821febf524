use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// Runtime that launches the generator, typically a JVM binary
    #[arg(help = "Runtime used to launch the generator")]
    pub runtime: PathBuf,

    /// Generator tool archive
    #[arg(help = "Path to the generator jar")]
    pub jar: PathBuf,

    /// Root of the source tree described by the plan
    #[arg(help = "Directory containing the sources under test")]
    pub test_dir: PathBuf,

    /// Test plan listing parts, files, and groups
    #[arg(short = 'c', long, help = "Path to the JSON test plan")]
    pub config: PathBuf,

    /// Python interpreter forwarded to the generator
    #[arg(short = 'p', long, help = "Path to the python interpreter")]
    pub python: PathBuf,

    /// Where generated test modules are written
    #[arg(short = 'o', long, help = "Output directory for generated tests")]
    pub output_dir: PathBuf,

    /// Where per-group coverage reports are written
    #[arg(short = 'i', long, help = "Output directory for coverage reports")]
    pub coverage_dir: PathBuf,
}
