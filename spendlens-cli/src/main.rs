use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spendlens_ingest::load_statement;
use std::path::PathBuf;

mod chat;
mod config;
mod llm;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(name = "spendlens", version, about = "Bank-statement analytics with a budget assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a statement CSV and print the full report
    Analyze {
        /// Path to the statement CSV (defaults to ./statement.csv)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Ask the budget assistant one question about a statement
    Ask {
        /// Path to the statement CSV (defaults to ./statement.csv)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Question text, passed to the assistant unmodified
        question: String,
    },

    /// Chat with the budget assistant about a statement (TUI)
    Chat {
        /// Path to the statement CSV (defaults to ./statement.csv)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Manage ~/.spendlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the active config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { csv } => {
            let analysis = load_analysis(csv)?;
            report::print_report(&analysis);
        }

        Command::Ask { csv, question } => {
            let analysis = load_analysis(csv)?;
            let cfg = config::load_config()?;

            match llm::ask_assistant(&cfg.assistant, &analysis.summary, &question).await {
                Ok(reply) => println!("{reply}"),
                Err(err) => {
                    eprintln!("Warning: budget assistant unavailable: {err:#}");
                    eprintln!("The analyzed summary is still valid:\n");
                    println!("{}", analysis.summary);
                }
            }
        }

        Command::Chat { csv } => {
            let analysis = load_analysis(csv)?;
            chat::run_chat(&analysis)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn default_statement_csv() -> PathBuf {
    PathBuf::from("statement.csv")
}

fn load_analysis(csv: Option<PathBuf>) -> Result<report::Analysis> {
    let csv_path = csv.unwrap_or_else(default_statement_csv);
    if !csv_path.exists() {
        bail!(
            "statement not found: {} (pass --csv <path>)",
            csv_path.display()
        );
    }

    let ledger = load_statement(&csv_path)
        .with_context(|| format!("parsing {}", csv_path.display()))?;

    println!(
        "Parsed {} transactions from {}\n",
        ledger.len(),
        csv_path.display()
    );

    Ok(report::Analysis::from_ledger(ledger))
}
