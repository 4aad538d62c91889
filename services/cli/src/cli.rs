use crate::commands::{run_classify, run_compare, ClassifyArgs, CompareArgs};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use teamfit::config::AppConfig;
use teamfit::error::AppError;
use teamfit::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Team Fit",
    about = "Compare two team questionnaire submissions and surface topics worth discussing",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two submissions and print the JSON report
    Compare(CompareArgs),
    /// Show how each answered field of a submission would be compared
    Classify(ClassifyArgs),
    /// Compare two built-in sample submissions (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Compare(args) => run_compare(args, &config),
        Command::Classify(args) => run_classify(args, &config),
        Command::Demo(args) => run_demo(args),
    }
}
