//! # rzip
//!
//! A Rust zip utility that assembles store-only ZIP archives from local
//! files and HTTP URLs.
//!
//! This library builds a complete, standards-conformant ZIP archive in memory
//! from an ordered collection of named byte blobs. Every entry is stored
//! uncompressed (method 0), checksummed with CRC-32 and stamped with a
//! DOS-encoded modification time. Source content is acquired up front by
//! [`Source`] collaborators; the archive core itself performs no I/O.
//!
//! ## Features
//!
//! - Synchronous, single-pass archive assembly with deterministic output
//! - Store entries from in-memory bytes, local files, or HTTP/HTTPS URLs
//! - UTF-8 file names and redundant data descriptors for maximal reader
//!   compatibility
//! - Typed rejection of entries that would overflow ZIP's 16/32-bit fields
//!
//! ## Example
//!
//! ```
//! use rzip::ZipWriter;
//!
//! fn main() -> Result<(), rzip::ArchiveError> {
//!     let mut writer = ZipWriter::new();
//!     writer.add_entry("hello.txt", b"hello world", None)?;
//!     writer.add_entry("empty.txt", b"", None)?;
//!     let archive = writer.finish()?;
//!     assert_eq!(&archive[0..2], b"PK");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use io::{HttpSource, LocalFileSource, Source};
pub use zip::{ArchiveError, Crc32, DosDateTime, EntryRecord, ZipWriter};
