//! Theme model and the JSON-to-model parsing step.
//!
//! A theme file is a flat JSON object. Each key holds either one color
//! (`[r, g, b]`) or a list of colors (`[[r, g, b], ...]`). The shape is
//! decided once, here, so flattening never has to sniff JSON shapes.
//!
//! Key order matters: the watch reads theme fields at fixed byte offsets,
//! and those offsets follow the order keys appear in the document.

use std::slice;
use std::str::FromStr;

use serde_json::Value;

use crate::color::{encode_colors, Color};
use crate::error::{Result, ThemeError};

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// The value stored under one theme key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorEntry {
    Single(Color),
    /// An ordered list of colors. May be empty, in which case the key
    /// contributes nothing to the output.
    Many(Vec<Color>),
}

impl ColorEntry {
    /// Colors held by this entry, in order.
    pub fn as_slice(&self) -> &[Color] {
        match self {
            ColorEntry::Single(color) => slice::from_ref(color),
            ColorEntry::Many(colors) => colors,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn parse(key: &str, value: &Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(ThemeError::NotAnArray {
                key: key.to_string(),
            });
        };

        match items.first() {
            None => Ok(ColorEntry::Many(Vec::new())),
            Some(Value::Array(_)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Array(channels) => parse_color(key, Some(i), channels),
                    _ => Err(ThemeError::MixedEntry {
                        key: key.to_string(),
                    }),
                })
                .collect::<Result<Vec<_>>>()
                .map(ColorEntry::Many),
            Some(_) => parse_color(key, None, items).map(ColorEntry::Single),
        }
    }
}

fn parse_color(key: &str, index: Option<usize>, channels: &[Value]) -> Result<Color> {
    let bad = |reason: String| ThemeError::BadColor {
        key: key.to_string(),
        index,
        reason,
    };

    if channels.len() != 3 {
        return Err(bad(format!(
            "expected 3 channels, found {}",
            channels.len()
        )));
    }

    let mut rgb = [0u8; 3];
    for ((slot, value), name) in rgb.iter_mut().zip(channels).zip(CHANNEL_NAMES) {
        *slot = channel(value)
            .ok_or_else(|| bad(format!("{name} channel {value} is not an integer in 0..=255")))?;
    }
    Ok(Color::from(rgb))
}

/// Whole numbers written as floats (`255.0`) count as integers.
fn channel(value: &Value) -> Option<u8> {
    if let Some(v) = value.as_u64() {
        return u8::try_from(v).ok();
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && (0.0..=255.0).contains(&f)).then_some(f as u8)
}

/// One key of a theme and its colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    pub key: String,
    pub value: ColorEntry,
}

/// A parsed theme, keys kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    entries: Vec<ThemeEntry>,
}

impl Theme {
    pub fn new(entries: Vec<ThemeEntry>) -> Self {
        Self { entries }
    }

    /// Parse a theme from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a theme from an already-decoded JSON value.
    ///
    /// The value must be an object. Relies on `serde_json`'s
    /// `preserve_order` feature to keep keys in document order.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ThemeError::NotAnObject);
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let value = ColorEntry::parse(&key, &value)?;
            if value.is_empty() {
                tracing::debug!("`{}` is an empty list, contributes no colors", key);
            } else {
                tracing::trace!("`{}`: {} color(s)", key, value.len());
            }
            entries.push(ThemeEntry { key, value });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ThemeEntry] {
        &self.entries
    }

    /// All colors in output order: keys in document order, lists expanded
    /// in place.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| entry.value.as_slice().iter().copied())
    }

    pub fn flatten(&self) -> Vec<Color> {
        self.colors().collect()
    }

    /// Number of colors, which is also the encoded size in bytes.
    pub fn color_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.value.len()).sum()
    }

    /// Encode every color, one byte each.
    pub fn encode(&self) -> Vec<u8> {
        encode_colors(self.colors())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}
