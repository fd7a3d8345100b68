//! Error type shared by the snapshot parsers and collectors.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

/// Failure of a single parse or collector update.
///
/// Skipped rows, filtered interrupts and suppressed zero values are not
/// errors; they only show up in debug logging.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The snapshot does not have the expected layout (e.g. no header line).
    #[error("invalid snapshot format: {0}")]
    Format(String),

    /// A counter token is not a number.
    #[error("invalid value {value} in {source_name}: {source}")]
    InvalidValue {
        value: String,
        source_name: &'static str,
        #[source]
        source: ParseFloatError,
    },

    /// The snapshot file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from a caller-supplied stream failed.
    #[error("failed to read snapshot: {0}")]
    Read(#[from] io::Error),
}

impl CollectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }
}
