use crate::rank::{run_rank, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use interest_groups::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Interest Group Orchestrator",
    about = "Prioritize case records and form interest groups over HTTP or from the command line",
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
    /// Rank a CSV or JSON case export and print the resulting tiers
    Rank(RankArgs),
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
        Command::Rank(args) => run_rank(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["interest-groups"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_rank_arguments() {
        let cli = Cli::try_parse_from([
            "interest-groups",
            "rank",
            "--input",
            "cases.csv",
            "--isolate",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.input, std::path::PathBuf::from("cases.csv"));
                assert!(args.isolate);
                assert!(!args.json);
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }
}
