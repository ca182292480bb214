use crate::demo::{run_analyze, run_demo, run_lookup, AnalyzeArgs, DemoArgs, LookupArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ingredient_guard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Ingredient Guard",
    about = "Resolve food label ingredients and score them for a user's age",
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
    /// Analyze an ingredient list or raw label text
    Analyze(AnalyzeArgs),
    /// Show the reference record an ingredient name resolves to
    Lookup(LookupArgs),
    /// Run the bundled sample labels through the pipeline
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args).await,
        Command::Lookup(args) => run_lookup(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
