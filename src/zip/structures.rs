use time::{OffsetDateTime, UtcOffset};

/// Local File Header (LFH) - 30 bytes fixed prefix
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// Data descriptor - 16 bytes
pub const DESCRIPTOR_SIGNATURE: &[u8] = b"PK\x07\x08";
pub const DESCRIPTOR_SIZE: usize = 16;

/// Central Directory File Header (CDFH) - 46 bytes fixed prefix
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
pub const CDFH_SIZE: usize = 46;

/// End of Central Directory (EOCD) - 22 bytes
pub const EOCD_SIGNATURE: &[u8] = b"PK\x05\x06";
pub const EOCD_SIZE: usize = 22;

/// ZIP specification version 2.0, the minimum that understands data
/// descriptors. Used for both version-made-by and version-needed.
pub const VERSION: u16 = 20;

/// General-purpose flags: bit 3 (CRC and sizes restated in a trailing data
/// descriptor) and bit 11 (file name is UTF-8).
pub const GP_FLAGS: u16 = (1 << 3) | (1 << 11);

/// Compression method 0: content is stored verbatim.
pub const METHOD_STORED: u16 = 0;

/// MS-DOS date and time as stored in ZIP headers.
///
/// A legacy 16-bit pair with 2-second resolution and a 1980 epoch, still
/// mandated by the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosDateTime {
    pub time: u16,
    pub date: u16,
}

impl DosDateTime {
    /// Encode a calendar timestamp into DOS date/time fields.
    ///
    /// The timestamp is converted to UTC and its calendar fields packed as
    /// `hour << 11 | minute << 5 | second / 2` and
    /// `(year - 1980) << 9 | month << 5 | day`. Seconds always lose their
    /// low bit.
    ///
    /// Timestamps outside the representable range are clamped rather than
    /// wrapped: anything before 1980-01-01 00:00:00 becomes the DOS epoch,
    /// anything after 2107-12-31 23:59:58 becomes that maximum.
    pub fn from_datetime(datetime: OffsetDateTime) -> Self {
        let utc = datetime.to_offset(UtcOffset::UTC);
        let year = utc.year();

        if year < 1980 {
            return Self {
                time: 0,
                date: 1 << 5 | 1,
            };
        }
        if year > 2107 {
            return Self {
                time: 23 << 11 | 59 << 5 | 58 / 2,
                date: 127 << 9 | 12 << 5 | 31,
            };
        }

        let time =
            (utc.hour() as u16) << 11 | (utc.minute() as u16) << 5 | (utc.second() as u16) / 2;
        let date = ((year - 1980) as u16) << 9 | (utc.month() as u16) << 5 | utc.day() as u16;

        Self { time, date }
    }

    /// Decode the date field to (year, month, day)
    pub fn ymd(&self) -> (u16, u8, u8) {
        let day = (self.date & 0x1F) as u8;
        let month = ((self.date >> 5) & 0x0F) as u8;
        let year = ((self.date >> 9) & 0x7F) + 1980;
        (year, month, day)
    }

    /// Decode the time field to (hour, minute, second)
    pub fn hms(&self) -> (u8, u8, u8) {
        let second = ((self.time & 0x1F) * 2) as u8;
        let minute = ((self.time >> 5) & 0x3F) as u8;
        let hour = ((self.time >> 11) & 0x1F) as u8;
        (hour, minute, second)
    }
}

/// Metadata recorded for one stored entry.
///
/// Filled in while the entry block is encoded, then replayed in original
/// order to build the central directory.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// UTF-8 file name bytes, 1 to 65535 bytes long
    pub name: Vec<u8>,
    /// CRC-32 of the stored content
    pub crc32: u32,
    /// Stored byte count; equals `uncompressed_size` since nothing is compressed
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    /// Offset of this entry's Local File Header from the archive start
    pub lfh_offset: u32,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
}

impl EntryRecord {
    /// Total length of this entry's block: header, name, content, descriptor.
    pub fn block_len(&self) -> usize {
        LFH_SIZE + self.name.len() + self.uncompressed_size as usize + DESCRIPTOR_SIZE
    }
}
