use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "hydrobead developers",
    version,
    about = "hydrobead - Estimate the hydrodynamic radius and diffusion coefficient of partially disordered proteins from their sequence.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate Rh, its sampling error and the diffusion coefficient of a sequence.
    Estimate(EstimateArgs),
    /// Show the bead model a sequence is reduced to.
    Parse(ParseArgs),
    /// Generate a single chain conformation and print its bead coordinates.
    Conformation(ConformationArgs),
}

/// Where the annotated sequence is read from. Structured regions are enclosed
/// in square brackets, e.g. `MKT[GAVLIP]QQ`.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SequenceSource {
    /// The annotated sequence itself.
    #[arg(short, long, value_name = "TEXT")]
    pub sequence: Option<String>,

    /// A file containing the annotated sequence, or '-' for standard input.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

/// Arguments for the `estimate` subcommand.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub source: SequenceSource,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a TOML report of the results to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Ensemble Overrides ---
    /// Number of conformations in the ensemble (1 to 5000).
    #[arg(short = 'n', long, value_name = "INT")]
    pub ensemble_size: Option<usize>,

    /// Seed for reproducible ensembles.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Give up on a chain after this many rejected joins instead of retrying forever.
    #[arg(long, value_name = "INT")]
    pub max_rejections: Option<u64>,

    /// Abort the computation after this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    // --- Environment Overrides ---
    /// Temperature in Kelvin.
    #[arg(short = 'T', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Solvent viscosity in centipoise.
    #[arg(long, value_name = "FLOAT")]
    pub viscosity: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S ensemble.size=100
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SequenceSource,
}

/// Arguments for the `conformation` subcommand.
#[derive(Args, Debug)]
pub struct ConformationArgs {
    #[command(flatten)]
    pub source: SequenceSource,

    /// Seed for a reproducible conformation.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Give up after this many rejected joins instead of retrying forever.
    #[arg(long, value_name = "INT")]
    pub max_rejections: Option<u64>,
}
