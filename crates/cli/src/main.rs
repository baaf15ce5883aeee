// labelpick CLI - reconcile warehouse order lists with label documents

mod exit_codes;
mod labels;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{
    EXIT_IO_ERROR, EXIT_PARSE_ERROR, EXIT_PICK_EMPTY, EXIT_PICK_INVALID_CONFIG, EXIT_SUCCESS,
    EXIT_USAGE,
};
use labelpick_recon::PickError;

#[derive(Parser)]
#[command(name = "lpick")]
#[command(about = "Sort warehouse orders into picking priority and align label pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Exit code 3 indicates a partial reconciliation: order rows without a label
page, or label pages no row claimed. The picklist and JSON outputs are still
written in that case.

Examples:
  lpick run wave.pick.toml
  lpick run wave.pick.toml --json
  lpick run wave.pick.toml --output result.json")]
    Run {
        /// Path to the .pick.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a pick config without running
    #[command(after_help = "\
Examples:
  lpick validate wave.pick.toml")]
    Validate {
        /// Path to the .pick.toml config file
        config: PathBuf,
    },

    /// Print the page identifiers extracted from a label document
    #[command(after_help = "\
Examples:
  lpick pages --file labels.pdf --depot fbs_204514")]
    Pages {
        /// Path to the label PDF
        #[arg(long)]
        file: PathBuf,

        /// Depot name (see `lpick validate` errors for the known set)
        #[arg(long)]
        depot: String,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            quiet,
        } => run::cmd_run(config, json, output, quiet),
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Pages { file, depot, quiet } => labels::cmd_pages(&file, &depot, quiet),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_PARSE_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    /// Create error from an engine error with the proper exit code.
    pub fn engine(err: PickError) -> Self {
        let code = match &err {
            PickError::ConfigParse(_)
            | PickError::ConfigValidation(_)
            | PickError::UnknownDepot(_) => EXIT_PICK_INVALID_CONFIG,
            PickError::MissingColumn { .. } => EXIT_PARSE_ERROR,
            PickError::Io(_) => EXIT_IO_ERROR,
            PickError::NoUsableRows { .. } | PickError::NoPagesMatched => EXIT_PICK_EMPTY,
        };
        let hint = match &err {
            PickError::UnknownDepot(_) => Some(format!(
                "known depots: {}",
                labelpick_recon::depots()
                    .iter()
                    .map(|d| d.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            PickError::MissingColumn { .. } => {
                Some("override header names in the [columns] section".to_string())
            }
            PickError::NoUsableRows { .. } => {
                Some("order ids must look like '1234-…' for a sticker key".to_string())
            }
            _ => None,
        };
        Self {
            code,
            message: err.to_string(),
            hint,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
