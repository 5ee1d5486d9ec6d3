use crate::commands::{
    run_explain, run_hierarchy, run_score, ExplainArgs, HierarchyArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hcc_risk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "HCC Risk Scorer",
    about = "Score and explain CMS-HCC risk adjustment from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one patient against a model variant
    Score(ScoreArgs),
    /// Label the components of an existing breakdown
    Explain(ExplainArgs),
    /// Print a model version's condition category hierarchy
    Hierarchy(HierarchyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override HCC_TABLES_DIR
    #[arg(long)]
    pub(crate) tables_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Explain(args) => run_explain(args),
        Command::Hierarchy(args) => run_hierarchy(args),
    }
}
