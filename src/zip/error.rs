//! Error types for archive assembly.

use thiserror::Error;

/// Failure conditions detected while assembling an archive.
///
/// Every condition is checked before any byte of the offending entry is
/// appended to the output buffer, so a failed build never leaves a
/// partially written archive behind.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Entry name is empty.
    #[error("entry name must not be empty")]
    EmptyName,

    /// Entry name does not fit the 16-bit name-length field.
    #[error("entry name is {len} bytes, exceeding the 65535-byte limit")]
    NameTooLong { len: usize },

    /// Entry content does not fit the 32-bit size fields.
    #[error("entry content is {len} bytes, exceeding the 32-bit size limit")]
    ContentTooLarge { len: usize },

    /// The 16-bit entry count field is exhausted.
    #[error("archive cannot hold more than 65535 entries")]
    TooManyEntries,

    /// An offset or size field would exceed 32-bit capacity.
    #[error("archive would grow to {required} bytes, past the 32-bit offset limit")]
    ArchiveTooLarge { required: u64 },

    /// I/O error while writing to the output buffer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ArchiveError`].
pub type Result<T> = std::result::Result<T, ArchiveError>;
