//! Store-only ZIP archive assembly.
//!
//! This module provides functionality for building ZIP archives entirely
//! in memory, writing every entry with compression method 0 (stored).
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`structures`]: Constants and data structures for ZIP format elements
//!   (signatures, DOS timestamps, per-entry metadata)
//! - [`crc32`]: The CRC-32 checksum engine feeding every checksum field
//! - [`writer`]: The archive writer assembling entry blocks, the Central
//!   Directory and the End of Central Directory record
//! - [`error`]: Typed failure conditions for rejected entries
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and stored data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! This implementation writes the archive front to back: a single pass
//! over the inputs producing the entry blocks, then a second pass over
//! their recorded metadata producing the Central Directory. Both passes
//! are deterministic functions of the input order.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - STORED (no compression) method
//! - UTF-8 file names (general-purpose flag bit 11)
//! - Data descriptors, always in agreement with the header fields
//!
//! ## Limitations
//!
//! - No compression methods (store only)
//! - No ZIP64: archives past 4 GiB or 65535 entries are refused
//! - No encryption, comments, or multi-disk archives

mod crc32;
mod error;
mod structures;
mod writer;

pub use crc32::{Crc32, checksum};
pub use error::{ArchiveError, Result};
pub use structures::*;
pub use writer::ZipWriter;
