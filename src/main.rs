//! qcloze CLI: question parse trees → cloze statements.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use qcloze::batch::convert_lines;
use qcloze::config::ClozeConfig;
use qcloze::tree::Tree;

#[derive(Parser)]
#[command(
    name = "qcloze",
    version,
    about = "Rewrite parsed questions into fill-in-the-blank statements"
)]
struct Cli {
    /// TOML config file (marker, diagnostics, max_depth).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log the question and raw parse of every rejected input.
    #[arg(long, global = true)]
    diagnostics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single bracket tree.
    Convert {
        /// File holding the tree. Reads stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Convert one bracket tree per line.
    Batch {
        /// File with one tree per line.
        file: PathBuf,

        /// Emit one JSON object per line instead of plain statements.
        #[arg(long)]
        json: bool,
    },

    /// Print the pre-order token dump of a tree.
    Traverse {
        /// File holding the tree. Reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClozeConfig::load(path)?,
        None => ClozeConfig::default(),
    };
    config.diagnostics |= cli.diagnostics;

    match cli.command {
        Commands::Convert { file } => {
            let text = read_input(file.as_deref())?;
            let statement = qcloze::convert(&text, &config)?;
            println!("{statement}");
        }

        Commands::Batch { file, json } => {
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let lines: Vec<&str> = content.lines().collect();
            let outcomes = convert_lines(&lines, &config);

            for outcome in &outcomes {
                if json {
                    println!("{}", serde_json::to_string(outcome).into_diagnostic()?);
                } else {
                    match (&outcome.statement, &outcome.error) {
                        (Some(statement), _) => println!("{statement}"),
                        (None, Some(error)) => println!("# error: {error}"),
                        (None, None) => println!(),
                    }
                }
            }

            let converted = outcomes.iter().filter(|o| o.is_ok()).count();
            eprintln!("converted {converted} of {}", outcomes.len());
        }

        Commands::Traverse { file } => {
            let text = read_input(file.as_deref())?;
            let tree = Tree::parse_with_depth(&text, config.max_depth)?;
            for token in tree.traverse() {
                println!("{token}");
            }
        }
    }

    Ok(())
}

/// Read a whole tree from `path`, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).into_diagnostic(),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .into_diagnostic()?;
            Ok(text)
        }
    }
}
