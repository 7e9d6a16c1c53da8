use clap::Parser;
use command::{Action, ConnectOptions, handle_action};
use ivibench::error::IviResult;

mod command;

#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    connect: ConnectOptions,

    /// Log every command sent to the instrument
    #[clap(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

fn main() -> IviResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    handle_action(cli.connect, cli.action)
}
