use thiserror::Error;

/// Errors surfaced by the animation core.
///
/// Nothing here is fatal to the page: callers log the error and keep the
/// previous (default) behavior.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HaloError {
    /// A recognized option carried a value that could not be parsed.
    #[error("invalid value {value:?} for option {key}")]
    InvalidOption { key: String, value: String },

    /// The option key is not one the scene understands.
    #[error("unknown option {0}")]
    UnknownOption(String),

    /// A color string was not `#rrggbb`, `rrggbb` or `0xrrggbb`.
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// Geometry was requested against a zero-sized viewport.
    #[error("viewport has zero area")]
    EmptyViewport,
}

pub type Result<T> = std::result::Result<T, HaloError>;
