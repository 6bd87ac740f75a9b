use std::path::PathBuf;

/// Duplicate vertex detector (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "dupvert", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Report duplicate vertices in every feature of a GeoJSON file
    Scan(ScanArgs),

    /// Remove consecutive repeated vertices and write the cleaned features
    Clean(CleanArgs),
}

/// Vertex matching options shared by both subcommands.
#[derive(clap::Args, Debug)]
pub struct MatchArgs {
    /// Distance (in coordinate units) within which vertices count as duplicates; 0 means exact
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub tolerance: f64,

    /// Distance metric used when the tolerance is non-zero
    #[arg(short, long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricArg {
    /// Straight-line distance
    Euclidean,
    /// Both |dx| and |dy| within the tolerance
    PerAxis,
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Input GeoJSON file (FeatureCollection, Feature, or geometry)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Write the full JSON report to this file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(clap::Args, Debug)]
pub struct CleanArgs {
    /// Input GeoJSON file (FeatureCollection, Feature, or geometry)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output GeoJSON file for the cleaned features
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Write the JSON clean report to this file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub matching: MatchArgs,
}
