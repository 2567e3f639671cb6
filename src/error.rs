//! Crate error type
//!
//! Raised only when reading text: squares, colors, placements and options.

use thiserror::Error;

/// Failures at the text edges of the crate. Game operations themselves never fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Neither algebraic (`e2`) nor a `row,col` pair on the board
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The piece placement string could not be read
    #[error("invalid placement {placement}: {reason}")]
    InvalidPlacement { placement: String, reason: String },

    /// A console option was given a value outside its range
    #[error("invalid value {value} for option {name}")]
    InvalidOption { name: String, value: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}
