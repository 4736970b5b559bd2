//! Conversion jobs: read theme files, encode them, write one packed output.
//!
//! Single-theme and batch conversion are the same job with different inputs
//! and a different policy for missing files.

use std::path::{Path, PathBuf};

use tetris_themes_core::{Theme, ThemeError};
use thiserror::Error;

use crate::config::{BatchConfig, MissingInputPolicy};
use crate::source::ThemeSource;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("theme file {} not found", .path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Theme { path: PathBuf, source: ThemeError },

    #[error("{} encodes to {actual} bytes, expected {expected}", .path.display())]
    ThemeSize {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Progress notifications emitted while a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    Processing(&'a Path),
    Skipped(&'a Path),
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted { path: PathBuf, colors: usize },
    Skipped { path: PathBuf },
}

/// Result of a completed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub files: Vec<FileOutcome>,
    pub output: PathBuf,
    pub bytes_written: usize,
}

impl ConversionReport {
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().filter_map(|outcome| match outcome {
            FileOutcome::Skipped { path } => Some(path.as_path()),
            FileOutcome::Converted { .. } => None,
        })
    }

    pub fn converted_count(&self) -> usize {
        self.files
            .iter()
            .filter(|outcome| matches!(outcome, FileOutcome::Converted { .. }))
            .count()
    }
}

/// One packing run: every input, in order, into a single output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub on_missing: MissingInputPolicy,
    /// Required encoded size per input, if any.
    pub theme_bytes: Option<usize>,
}

impl ConversionJob {
    /// Convert `<name>.json` into `<name>.bin`. A missing input is fatal.
    pub fn single(name: &str) -> Self {
        Self {
            inputs: vec![PathBuf::from(format!("{name}.json"))],
            output: PathBuf::from(format!("{name}.bin")),
            on_missing: MissingInputPolicy::Fail,
            theme_bytes: None,
        }
    }

    /// Pack the numbered theme files described by `config`.
    pub fn batch(config: &BatchConfig) -> Self {
        Self {
            inputs: config.input_paths(),
            output: config.output.clone(),
            on_missing: config.on_missing,
            theme_bytes: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_theme_bytes(mut self, theme_bytes: Option<usize>) -> Self {
        self.theme_bytes = theme_bytes;
        self
    }

    pub fn run(&self, source: &dyn ThemeSource) -> Result<ConversionReport, ConvertError> {
        self.run_with_progress(source, |_| {})
    }

    /// Run the job, reporting each file to `progress` before it is handled.
    ///
    /// Nothing is written unless every input succeeds.
    pub fn run_with_progress(
        &self,
        source: &dyn ThemeSource,
        mut progress: impl FnMut(Progress<'_>),
    ) -> Result<ConversionReport, ConvertError> {
        let mut output = Vec::new();
        let mut files = Vec::with_capacity(self.inputs.len());
        // first converted file and its size, to spot themes of differing length
        let mut reference: Option<(&Path, usize)> = None;

        for path in &self.inputs {
            if !source.exists(path) {
                match self.on_missing {
                    MissingInputPolicy::Fail => {
                        return Err(ConvertError::MissingInput { path: path.clone() });
                    }
                    MissingInputPolicy::Skip => {
                        tracing::debug!("{} missing, skipping", path.display());
                        progress(Progress::Skipped(path));
                        files.push(FileOutcome::Skipped { path: path.clone() });
                        continue;
                    }
                }
            }

            progress(Progress::Processing(path));
            let bytes = encode_file(source, path)?;
            tracing::debug!("{}: {} colors", path.display(), bytes.len());

            match (self.theme_bytes, reference) {
                (Some(expected), _) if bytes.len() != expected => {
                    return Err(ConvertError::ThemeSize {
                        path: path.clone(),
                        expected,
                        actual: bytes.len(),
                    });
                }
                (None, Some((first, len))) if bytes.len() != len => {
                    tracing::warn!(
                        "{} encodes to {} bytes but {} encodes to {}; themes will not line up",
                        path.display(),
                        bytes.len(),
                        first.display(),
                        len
                    );
                }
                (_, None) => reference = Some((path.as_path(), bytes.len())),
                _ => {}
            }

            files.push(FileOutcome::Converted {
                path: path.clone(),
                colors: bytes.len(),
            });
            output.extend_from_slice(&bytes);
        }

        source
            .write_output(&self.output, &output)
            .map_err(|source| ConvertError::Write {
                path: self.output.clone(),
                source,
            })?;
        tracing::info!("Wrote {} bytes to {}", output.len(), self.output.display());

        Ok(ConversionReport {
            files,
            output: self.output.clone(),
            bytes_written: output.len(),
        })
    }
}

/// Read, parse and encode a single theme file.
pub fn encode_file(source: &dyn ThemeSource, path: &Path) -> Result<Vec<u8>, ConvertError> {
    let json = source
        .read_to_string(path)
        .map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let theme = Theme::from_json_str(&json).map_err(|source| ConvertError::Theme {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(theme.encode())
}
