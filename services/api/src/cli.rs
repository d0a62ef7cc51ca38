use crate::demo::{run_batch_report, run_demo, BatchReportArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use laborisk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Laborisk",
    about = "Administer workplace psychosocial-risk questionnaires and assemble risk reports",
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
    /// Batch operations for released questionnaires
    Batch {
        #[command(subcommand)]
        command: BatchCommand,
    },
    /// Run an end-to-end CLI demo covering progression and reporting
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BatchCommand {
    /// Release a roster, optionally simulate answers, and print the report
    Report(BatchReportArgs),
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
        Command::Batch {
            command: BatchCommand::Report(args),
        } => run_batch_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
