mod cmd;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use cmd::{show::ShowArgs, update::UpdateArgs, validate::ValidateArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "alarmctl",
    about = "Add or remove SNS topics on CloudWatch alarm actions, in bulk",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./alarmctl.yaml if present)
    #[arg(long, global = true, env = "ALARMCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log progress to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or remove a topic on the selected alarm states
    Update(UpdateArgs),

    /// Show the current action lists of the listed alarms
    Show(ShowArgs),

    /// Check the alarm list, states, topic ARN and config without calling AWS
    Validate(ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = settings::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Update(args) => cmd::update::run(args, &config, cli.json),
            Commands::Show(args) => cmd::show::run(args, &config, cli.json),
            Commands::Validate(args) => cmd::validate::run(args, &config, cli.json),
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
