use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "reefscout",
    version,
    about = "Local REEFSCAPE scouting row encoding, scoring, and analytics tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(EncodeArgs),
    Score(ScoreArgs),
    Rebuild(RebuildArgs),
    Analyze(AnalyzeArgs),
    Validate(ValidateArgs),
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[arg(long)]
    pub auto: Option<String>,

    #[arg(long)]
    pub teleop: Option<String>,

    #[arg(long)]
    pub endgame: Option<String>,

    #[arg(long)]
    pub rows: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RebuildArgs {
    #[arg(long)]
    pub rows: PathBuf,

    #[arg(long)]
    pub append: Option<PathBuf>,

    #[arg(long)]
    pub team_names: Option<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(long)]
    pub rows: PathBuf,

    #[arg(long)]
    pub team: Option<String>,

    #[arg(long, default_value_t = false)]
    pub hide_partial: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub rows: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long = "red-epa")]
    pub red_epas: Vec<f64>,

    #[arg(long = "blue-epa")]
    pub blue_epas: Vec<f64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
