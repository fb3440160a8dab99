use crate::demo::{run_evaluate, run_price, EvaluateArgs, PriceArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use green_lending::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Green Lending Evaluator",
    about = "Serve and demonstrate the green loan evaluation API from the command line",
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
    /// Score one application against the configured scoring service
    Evaluate(EvaluateArgs),
    /// Quote an interest rate from a default probability and green ratings
    Price(PriceArgs),
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
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::Price(args) => run_price(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use green_lending::workflows::loan::WasteManagementTier;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["green-lending-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_uses_form_defaults() {
        let cli = Cli::try_parse_from(["green-lending-api", "evaluate"]).expect("parses");
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.credit_score, 720);
                assert_eq!(args.waste_management, WasteManagementTier::Advanced);
                assert!(!args.json);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_parses_waste_tier_label() {
        let cli = Cli::try_parse_from([
            "green-lending-api",
            "evaluate",
            "--waste-management",
            "a-elite",
            "--json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.waste_management, WasteManagementTier::Elite);
                assert!(args.json);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_waste_tier_is_rejected() {
        let result = Cli::try_parse_from([
            "green-lending-api",
            "evaluate",
            "--waste-management",
            "Z-Unknown",
        ]);
        assert!(result.is_err());
    }
}
