//! Theme packing for the Tetris watchapp.
//!
//! The encoding itself lives in [`tetris_themes_core`]; this crate adds file
//! handling around it:
//! - `source`: `ThemeSource` trait and the filesystem implementation
//! - `convert`: `ConversionJob`, shared by single-theme and batch mode
//! - `name_provider`: where single mode gets its theme name
//! - `config`, `cli`, `tracing_setup`: settings, arguments and logging
//!
//! # Example
//!
//! ```ignore
//! use tetris_themes::config::BatchConfig;
//! use tetris_themes::convert::ConversionJob;
//! use tetris_themes::source::LocalThemeSource;
//!
//! let source = LocalThemeSource::new("/path/to/themes");
//! let report = ConversionJob::batch(&BatchConfig::default()).run(&source)?;
//! println!("{} bytes", report.bytes_written);
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod name_provider;
pub mod source;
pub mod tracing_setup;
