mod commands;
mod report;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formguard")]
#[command(version, about = "Validate and submit RHTMX form definitions", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "formguard.toml")]
    config: PathBuf,

    /// Override the page language used for messages
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every tagged field of a form definition
    Check(FormArgs),

    /// Validate, then submit the form to its action
    Submit(FormArgs),

    /// Print the translation of a message label
    Translate {
        /// Message label, e.g. empty_input_field
        label: String,
    },
}

#[derive(Args)]
pub struct FormArgs {
    /// Form definition (TOML)
    pub form: PathBuf,

    /// Field value, repeatable: --set email=a@b.com
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub values: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = rhtmx_formguard::Config::load(&cli.config)?;
    if let Some(lang) = cli.lang {
        config.page.lang = lang;
    }
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Check(args) => {
            commands::check::execute(&config, &args).await?;
        }
        Commands::Submit(args) => {
            commands::submit::execute(&config, &args).await?;
        }
        Commands::Translate { label } => {
            commands::translate::execute(&config, &label).await?;
        }
    }

    Ok(())
}
