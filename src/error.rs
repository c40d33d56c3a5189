//! Error and warning types for docoutline.
//!
//! Structure inference itself never fails: malformed input degrades through
//! fallback tiers and is reported as a [`Warning`]. [`Error`] is reserved for
//! the I/O-facing edges (reading paragraph files, loading configuration,
//! serializing results).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for docoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the crate's I/O boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input could not be interpreted as paragraphs or declared units.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Recoverable diagnostics produced while inferring structure.
///
/// The caller always receives a best-effort result alongside these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Warning {
    /// No unit could be built, even after every fallback.
    NoUnitsDetected,

    /// A unit number appeared more than once; one copy was suppressed.
    DuplicateUnit {
        /// The repeated unit number
        number: u32,
    },

    /// No unit headers were found; flat numbered chapters were used instead.
    ChapterFallback,

    /// Neither unit headers nor chapters were found; the whole document
    /// became one unit.
    SingleUnitFallback,

    /// A declared unit received no content from any matching tier.
    UnbackedUnit {
        /// The declared unit number
        number: u32,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoUnitsDetected => write!(f, "no units detected in document"),
            Warning::DuplicateUnit { number } => {
                write!(f, "unit {} appears more than once; one copy suppressed", number)
            }
            Warning::ChapterFallback => {
                write!(f, "no unit headers found; using numbered chapters as units")
            }
            Warning::SingleUnitFallback => {
                write!(f, "no structure found; document treated as a single unit")
            }
            Warning::UnbackedUnit { number } => {
                write!(f, "declared unit {} could not be backed by any content", number)
            }
        }
    }
}
