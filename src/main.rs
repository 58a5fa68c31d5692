use brewlint::commands::{self, OutputFormat};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brewlint")]
#[command(author, version, about = "Lint Homebrew-style formula records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate formula record files
    Check {
        /// Record files or directories to lint
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate shell completions for brewlint itself
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

/// NO_COLOR standard plus TTY detection; machine consumers get plain text.
fn init_colors() {
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    init_colors();

    match cli.command {
        Some(Commands::Check { paths, format }) => {
            let all_valid = commands::check(&paths, format)?;
            if !all_valid {
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "brewlint",
                &mut std::io::stdout(),
            );
        }
        None => {
            println!(
                "{} brewlint - a linter for Homebrew-style formula records",
                "📦".bold()
            );
            println!(
                "\nRun {} to validate a tap directory or record file.",
                "brewlint check <PATH>".cyan()
            );
            println!("See {} for all commands.", "brewlint --help".cyan());
        }
    }

    Ok(())
}
