//! Where single-theme mode gets its theme name from.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Prompt shown when asking for a theme name interactively.
pub const PROMPT: &str = "json file name: ";

#[derive(Debug, Error)]
pub enum NameError {
    #[error("failed to read theme name: {0}")]
    Io(#[from] io::Error),

    #[error("no theme name given")]
    Empty,
}

/// Supplies the base name of the theme to convert (without `.json`).
pub trait NameProvider {
    fn theme_name(&mut self) -> Result<String, NameError>;
}

/// A name known up front, e.g. from the command line.
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl NameProvider for FixedName {
    fn theme_name(&mut self) -> Result<String, NameError> {
        let name = self.0.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(name.to_string())
    }
}

/// Asks for the name on `output` and reads one line from `input`.
pub struct PromptName<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptName<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptName<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> NameProvider for PromptName<R, W> {
    fn theme_name(&mut self) -> Result<String, NameError> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(NameError::Empty);
        }

        let name = line.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(name.to_string())
    }
}
