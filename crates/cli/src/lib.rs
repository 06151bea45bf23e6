pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "salesq",
    about = "Salesq operator CLI",
    long_about = "Inspect configuration, check readiness, and run the URL generator and sales query \
                  functions in-process.",
    after_help = "Examples:\n  salesq doctor --json\n  salesq generate-url --query \"sales order 48\"\n  \
                  salesq ask --input-text \"What is the net amount of sales order 48?\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, model credentials, and SAP secret readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Run the URL generator for one query and print its invocation result")]
    GenerateUrl {
        #[arg(long, help = "Natural-language question to translate into an OData URL")]
        query: String,
    },
    #[command(about = "Run the sales query function for one question and print its result")]
    Ask {
        #[arg(long, help = "Natural-language sales question")]
        input_text: String,
        #[arg(long, default_value = "salesq-cli")]
        agent: String,
        #[arg(long, default_value = "SalesOrders")]
        action_group: String,
        #[arg(long, default_value = "getSalesOrder")]
        function: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::GenerateUrl { query } => commands::generate_url::run(&query),
        Command::Ask { input_text, agent, action_group, function } => {
            commands::ask::run(&commands::ask::AskArgs {
                input_text,
                agent,
                action_group,
                function,
            })
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
