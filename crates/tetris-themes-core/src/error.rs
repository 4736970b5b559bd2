use thiserror::Error;

/// Errors raised while turning a JSON document into a [`Theme`](crate::Theme).
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("theme must be a JSON object mapping names to colors")]
    NotAnObject,

    #[error("`{key}`: expected an [r, g, b] array or a list of them")]
    NotAnArray { key: String },

    #[error("`{key}`{}: {reason}", position(.index))]
    BadColor {
        key: String,
        /// Position inside a color list, `None` for a single color.
        index: Option<usize>,
        reason: String,
    },

    #[error("`{key}`: mixes single channel values with nested color arrays")]
    MixedEntry { key: String },
}

fn position(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("[{i}]"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;
