use crate::demo::{run_demo, run_sales_report, DemoArgs, SalesReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sales_intel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Sales Intelligence Service",
    about = "Run the sales metrics engine as an HTTP service or from the command line",
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
    /// Generate sales reports from a lead tracker export
    Sales {
        #[command(subcommand)]
        command: SalesCommand,
    },
    /// Run a CLI demo over a small built-in lead dataset
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SalesCommand {
    /// Build the monthly sales report for a CSV export
    Report(SalesReportArgs),
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
        Command::Sales {
            command: SalesCommand::Report(args),
        } => run_sales_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
