use crate::demo::{
    run_demo, run_roster_report, run_simulation, DemoArgs, RosterReportArgs, SimulateArgs,
};
use crate::server;
use atelier_admissions::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Atelier Admissions",
    about = "Run the art-admissions simulator service or query it from the command line",
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
    /// Simulate one student against one target, with optional what-if scores
    Simulate(SimulateArgs),
    /// Roster-level reports
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Walk through the dashboard, simulator and peer views on the seeded roster
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Print the risk dashboard, or the peer scatter for one target
    Report(RosterReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Roster CSV export to load on top of the seeded students
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulation(args),
        Command::Roster {
            command: RosterCommand::Report(args),
        } => run_roster_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn simulate_parses_overrides() {
        let cli = Cli::try_parse_from([
            "atelier-admissions",
            "simulate",
            "--student",
            "stu-005",
            "--target",
            "snu-design",
            "--korean",
            "130",
            "--english-grade",
            "1",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Simulate(args)) => {
                assert_eq!(args.student, "stu-005");
                assert_eq!(args.korean, Some(130.0));
                assert_eq!(args.english_grade, Some(1));
                assert!(args.math.is_none());
            }
            other => panic!("expected simulate command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["atelier-admissions"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
