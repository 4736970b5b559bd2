//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, MissingInputPolicy};
use crate::convert::{ConversionJob, ConversionReport, Progress};
use crate::name_provider::{NameError, NameProvider};

#[derive(Debug, Parser)]
#[command(
    name = "tetris-themes",
    version,
    about = "Pack JSON color themes into 2-bit-per-channel theme binaries"
)]
pub struct Cli {
    /// Directory theme files are read from and written to (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Convert <NAME>.json into <NAME>.bin
    Single {
        /// Theme name without extension; prompted for when omitted
        name: Option<String>,

        /// Output file (default: <NAME>.bin)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail unless the theme encodes to exactly this many bytes
        #[arg(long, value_name = "N")]
        theme_bytes: Option<usize>,
    },

    /// Pack the numbered theme files (theme_00.json, theme_01.json, ...) into one file
    Batch {
        /// Number of numbered files to look for
        #[arg(long, value_name = "N")]
        count: Option<usize>,

        /// File name prefix before the two-digit index
        #[arg(long, value_name = "PREFIX")]
        prefix: Option<String>,

        /// Output file (default: themes.bin)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Treat a missing theme file as an error instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Fail unless every theme encodes to exactly this many bytes
        #[arg(long, value_name = "N")]
        theme_bytes: Option<usize>,
    },
}

impl Command {
    /// Build the job for this command. Flags win over `config`.
    ///
    /// `names` is only consulted in single mode, where it is required.
    pub fn job(
        &self,
        config: &Config,
        names: Option<&mut dyn NameProvider>,
    ) -> Result<ConversionJob, NameError> {
        let job = match self {
            Command::Single {
                output,
                theme_bytes,
                ..
            } => {
                let name = names.ok_or(NameError::Empty)?.theme_name()?;
                let mut job = ConversionJob::single(&name)
                    .with_theme_bytes(theme_bytes.or(config.theme_bytes));
                if let Some(output) = output {
                    job = job.with_output(output);
                }
                job
            }
            Command::Batch {
                count,
                prefix,
                output,
                strict,
                theme_bytes,
            } => {
                let mut batch = config.batch.clone();
                if let Some(count) = count {
                    batch.count = *count;
                }
                if let Some(prefix) = prefix {
                    batch.prefix.clone_from(prefix);
                }
                if let Some(output) = output {
                    batch.output.clone_from(output);
                }
                if *strict {
                    batch.on_missing = MissingInputPolicy::Fail;
                }
                ConversionJob::batch(&batch).with_theme_bytes(theme_bytes.or(config.theme_bytes))
            }
        };
        Ok(job)
    }

    /// Per-file line printed while the job runs, if this mode prints one.
    pub fn progress_line(&self, progress: Progress<'_>) -> Option<String> {
        match (self, progress) {
            (Command::Single { .. }, _) => None,
            (Command::Batch { .. }, Progress::Processing(path)) => {
                Some(format!("Processing {}...", path.display()))
            }
            (Command::Batch { .. }, Progress::Skipped(path)) => {
                Some(format!("Warning: {} missing, skipping.", path.display()))
            }
        }
    }

    /// Final line printed after a successful run.
    pub fn summary(&self, report: &ConversionReport) -> String {
        match self {
            Command::Single { .. } => format!(
                "Written {} colors to {}",
                report.bytes_written,
                report.output.display()
            ),
            Command::Batch { .. } => format!(
                "Done: wrote {} bytes to {}",
                report.bytes_written,
                report.output.display()
            ),
        }
    }
}
