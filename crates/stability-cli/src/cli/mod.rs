mod commands;

use clap::Parser;
use stability_core::domain::StabilityError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_stability_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let full_args = std::iter::once("stability-run".to_string())
        .chain(rewrite_bare_job_index(args))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

/// The legacy driver took exactly one positional integer and ran the
/// single-axis sweep. A leading integer is rewritten to the `single`
/// subcommand so existing scheduler scripts keep working unchanged.
fn rewrite_bare_job_index(args: Vec<String>) -> Vec<String> {
    match args.first() {
        Some(first) if first.parse::<usize>().is_ok() => std::iter::once("single".to_string())
            .chain(args)
            .collect(),
        _ => args,
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "stability-run", about = "Quantum-dot stability sweep job driver")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run the one-at-a-time coupling sweep for one (ed_point, sigma) pair
    Single(commands::JobArgs),
    /// Run the multivariate grid block for one job index
    Multi(commands::JobArgs),
    /// Print the partition layout without running any simulations
    Plan(commands::PlanArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Single(args) => commands::run_single_command(args),
        CliCommand::Multi(args) => commands::run_multi_command(args),
        CliCommand::Plan(args) => commands::run_plan_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(StabilityError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_stability_error(&self) -> StabilityError {
        match self {
            Self::Usage(message) => {
                StabilityError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => StabilityError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
