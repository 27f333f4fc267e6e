//! Low-level ZIP archive writer.
//!
//! This module handles the binary encoding of ZIP file structures,
//! appending them to a single in-memory output buffer.
//!
//! ## Assembly Strategy
//!
//! ZIP files are written front to back:
//! 1. For each entry, a Local File Header, the stored bytes, and a
//!    trailing data descriptor
//! 2. The Central Directory, one record per entry pointing back at its
//!    Local File Header offset
//! 3. The End of Central Directory (EOCD) record summarizing the directory
//!
//! Every entry is fully buffered before its header is written, so the CRC
//! and sizes go directly into the Local File Header. The data descriptor
//! restates them for readers that honor flag bit 3; both copies always
//! agree.

use byteorder::{LittleEndian, WriteBytesExt};
use time::OffsetDateTime;

use super::crc32::Crc32;
use super::error::{ArchiveError, Result};
use super::structures::*;

/// Store-only ZIP archive writer.
///
/// Entries are encoded in call order into one contiguous buffer, which
/// [`finish()`](Self::finish) completes and hands back. Each writer builds
/// exactly one archive and holds no state beyond its buffer and entry
/// table, so concurrent builds are fully independent.
///
/// Construction is synchronous and deterministic: two writers fed the same
/// sequence of names, contents and timestamps produce byte-identical
/// archives.
///
/// ## Example
///
/// ```
/// use rzip::ZipWriter;
///
/// # fn main() -> rzip::zip::Result<()> {
/// let mut writer = ZipWriter::new();
/// writer.add_entry("hello.txt", b"hello world", None)?;
/// let archive = writer.finish()?;
/// assert_eq!(&archive[0..2], b"PK");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ZipWriter {
    /// Output buffer; its length is the running offset counter
    buf: Vec<u8>,
    /// Metadata for every entry written so far, in input order
    entries: Vec<EntryRecord>,
}

impl ZipWriter {
    /// Create a writer with an empty archive buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries written so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Metadata recorded for the entries written so far, in input order.
    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    /// Encode one entry: Local File Header, stored content, data descriptor.
    ///
    /// The content is checksummed and measured before the header is
    /// written, so header, descriptor and (later) central directory all
    /// carry the same CRC and sizes. `modified` defaults to the current
    /// time (UTC) when absent; pass an explicit timestamp for reproducible
    /// output.
    ///
    /// # Errors
    ///
    /// Rejects empty names, names over 65535 bytes, content over the
    /// 32-bit size limit, a 65536th entry, and entries that would push any
    /// archive offset past 32 bits. Validation happens before any byte is
    /// appended, so a failed call leaves the archive exactly as it was.
    pub fn add_entry(
        &mut self,
        name: &str,
        content: &[u8],
        modified: Option<OffsetDateTime>,
    ) -> Result<()> {
        let name_bytes = name.as_bytes();
        if name_bytes.is_empty() {
            return Err(ArchiveError::EmptyName);
        }
        if name_bytes.len() > u16::MAX as usize {
            return Err(ArchiveError::NameTooLong {
                len: name_bytes.len(),
            });
        }
        if content.len() > u32::MAX as usize {
            return Err(ArchiveError::ContentTooLarge { len: content.len() });
        }
        if self.entries.len() == u16::MAX as usize {
            return Err(ArchiveError::TooManyEntries);
        }

        let block_len = LFH_SIZE + name_bytes.len() + content.len() + DESCRIPTOR_SIZE;
        let lfh_offset = self.ensure_fits(block_len)?;

        let dos = DosDateTime::from_datetime(modified.unwrap_or_else(OffsetDateTime::now_utc));

        let mut crc = Crc32::new();
        crc.append(content);

        let entry = EntryRecord {
            name: name_bytes.to_vec(),
            crc32: crc.finalize(),
            compressed_size: content.len() as u32,
            uncompressed_size: content.len() as u32,
            lfh_offset,
            last_mod_time: dos.time,
            last_mod_date: dos.date,
        };

        write_local_header(&mut self.buf, &entry)?;
        self.buf.extend_from_slice(content);
        write_descriptor(&mut self.buf, &entry)?;
        self.entries.push(entry);

        Ok(())
    }

    /// Append the Central Directory and End of Central Directory record,
    /// returning the finished archive bytes.
    ///
    /// With zero entries this produces the minimal valid archive: the bare
    /// 22-byte end record with all counts, sizes and offsets zero.
    ///
    /// # Errors
    ///
    /// Fails with [`ArchiveError::ArchiveTooLarge`] if the directory would
    /// push the archive past the 32-bit offset limit. The directory length
    /// is computed from the entry table up front, so nothing is appended
    /// on failure.
    pub fn finish(self) -> Result<Vec<u8>> {
        let ZipWriter { mut buf, entries } = self;

        let cd_offset = buf.len() as u64;
        let cd_size: u64 = entries
            .iter()
            .map(|e| (CDFH_SIZE + e.name.len()) as u64)
            .sum();
        let required = cd_offset + cd_size + EOCD_SIZE as u64;
        if required > u32::MAX as u64 {
            return Err(ArchiveError::ArchiveTooLarge { required });
        }

        for entry in &entries {
            write_central_record(&mut buf, entry)?;
        }
        write_end_record(
            &mut buf,
            entries.len() as u16,
            cd_size as u32,
            cd_offset as u32,
        )?;

        Ok(buf)
    }

    /// Check that `additional` more bytes keep every offset within 32-bit
    /// range, returning the offset at which they will land.
    fn ensure_fits(&self, additional: usize) -> Result<u32> {
        let required = self.buf.len() as u64 + additional as u64;
        if required > u32::MAX as u64 {
            return Err(ArchiveError::ArchiveTooLarge { required });
        }
        Ok(self.buf.len() as u32)
    }
}

fn write_local_header(buf: &mut Vec<u8>, entry: &EntryRecord) -> Result<()> {
    buf.extend_from_slice(LFH_SIGNATURE);
    buf.write_u16::<LittleEndian>(VERSION)?;
    buf.write_u16::<LittleEndian>(GP_FLAGS)?;
    buf.write_u16::<LittleEndian>(METHOD_STORED)?;
    buf.write_u16::<LittleEndian>(entry.last_mod_time)?;
    buf.write_u16::<LittleEndian>(entry.last_mod_date)?;
    buf.write_u32::<LittleEndian>(entry.crc32)?;
    buf.write_u32::<LittleEndian>(entry.compressed_size)?;
    buf.write_u32::<LittleEndian>(entry.uncompressed_size)?;
    buf.write_u16::<LittleEndian>(entry.name.len() as u16)?;
    buf.write_u16::<LittleEndian>(0)?; // extra field length
    buf.extend_from_slice(&entry.name);
    Ok(())
}

fn write_descriptor(buf: &mut Vec<u8>, entry: &EntryRecord) -> Result<()> {
    buf.extend_from_slice(DESCRIPTOR_SIGNATURE);
    buf.write_u32::<LittleEndian>(entry.crc32)?;
    buf.write_u32::<LittleEndian>(entry.compressed_size)?;
    buf.write_u32::<LittleEndian>(entry.uncompressed_size)?;
    Ok(())
}

fn write_central_record(buf: &mut Vec<u8>, entry: &EntryRecord) -> Result<()> {
    buf.extend_from_slice(CDFH_SIGNATURE);
    buf.write_u16::<LittleEndian>(VERSION)?; // version made by
    buf.write_u16::<LittleEndian>(VERSION)?; // version needed to extract
    buf.write_u16::<LittleEndian>(GP_FLAGS)?;
    buf.write_u16::<LittleEndian>(METHOD_STORED)?;
    buf.write_u16::<LittleEndian>(entry.last_mod_time)?;
    buf.write_u16::<LittleEndian>(entry.last_mod_date)?;
    buf.write_u32::<LittleEndian>(entry.crc32)?;
    buf.write_u32::<LittleEndian>(entry.compressed_size)?;
    buf.write_u32::<LittleEndian>(entry.uncompressed_size)?;
    buf.write_u16::<LittleEndian>(entry.name.len() as u16)?;
    buf.write_u16::<LittleEndian>(0)?; // extra field length
    buf.write_u16::<LittleEndian>(0)?; // file comment length
    buf.write_u16::<LittleEndian>(0)?; // disk number start
    buf.write_u16::<LittleEndian>(0)?; // internal file attributes
    buf.write_u32::<LittleEndian>(0)?; // external file attributes
    buf.write_u32::<LittleEndian>(entry.lfh_offset)?;
    buf.extend_from_slice(&entry.name);
    Ok(())
}

fn write_end_record(buf: &mut Vec<u8>, entry_count: u16, cd_size: u32, cd_offset: u32) -> Result<()> {
    buf.extend_from_slice(EOCD_SIGNATURE);
    buf.write_u16::<LittleEndian>(0)?; // number of this disk
    buf.write_u16::<LittleEndian>(0)?; // disk where the directory starts
    buf.write_u16::<LittleEndian>(entry_count)?; // entries on this disk
    buf.write_u16::<LittleEndian>(entry_count)?; // entries total
    buf.write_u32::<LittleEndian>(cd_size)?;
    buf.write_u32::<LittleEndian>(cd_offset)?;
    buf.write_u16::<LittleEndian>(0)?; // comment length
    Ok(())
}
