//! Round-trip tests: every archive the writer produces must parse with a
//! standards-conformant ZIP reader and yield the original names, bytes and
//! checksums.
//!
//! The reader below is deliberately strict: it starts from the End of
//! Central Directory record, walks the Central Directory, and checks every
//! Local File Header and data descriptor against the directory entry that
//! points at it.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use rzip::ZipWriter;
use rzip::zip::{DosDateTime, checksum};
use time::macros::datetime;

const EOCD_SIZE: usize = 22;
const LFH_SIZE: usize = 30;

struct ParsedEntry {
    name: String,
    crc32: u32,
    content: Vec<u8>,
    mod_time: u16,
    mod_date: u16,
}

/// Parse a whole archive, verifying structural invariants along the way.
fn parse_archive(data: &[u8]) -> Vec<ParsedEntry> {
    assert!(data.len() >= EOCD_SIZE, "archive shorter than the end record");

    // The writer never emits a comment, so the EOCD sits at a fixed
    // position at the tail.
    let eocd = &data[data.len() - EOCD_SIZE..];
    assert_eq!(&eocd[0..4], b"PK\x05\x06", "bad EOCD signature");

    let mut cursor = Cursor::new(&eocd[4..]);
    let disk_number = cursor.read_u16::<LittleEndian>().unwrap();
    let disk_with_cd = cursor.read_u16::<LittleEndian>().unwrap();
    let disk_entries = cursor.read_u16::<LittleEndian>().unwrap();
    let total_entries = cursor.read_u16::<LittleEndian>().unwrap();
    let cd_size = cursor.read_u32::<LittleEndian>().unwrap() as usize;
    let cd_offset = cursor.read_u32::<LittleEndian>().unwrap() as usize;
    let comment_len = cursor.read_u16::<LittleEndian>().unwrap();

    assert_eq!(disk_number, 0);
    assert_eq!(disk_with_cd, 0);
    assert_eq!(disk_entries, total_entries);
    assert_eq!(comment_len, 0);
    assert_eq!(
        cd_offset + cd_size + EOCD_SIZE,
        data.len(),
        "directory span does not reach the end record"
    );

    let cd = &data[cd_offset..cd_offset + cd_size];
    let mut cursor = Cursor::new(cd);
    let mut entries = Vec::with_capacity(total_entries as usize);
    for _ in 0..total_entries {
        entries.push(parse_entry(data, &mut cursor));
    }
    assert_eq!(
        cursor.position() as usize,
        cd.len(),
        "directory has trailing bytes no record claims"
    );

    entries
}

/// Parse one Central Directory record, then follow its offset back to the
/// Local File Header, content and data descriptor.
fn parse_entry(data: &[u8], cursor: &mut Cursor<&[u8]>) -> ParsedEntry {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig).unwrap();
    assert_eq!(&sig, b"PK\x01\x02", "bad central directory signature");

    let _version_made_by = cursor.read_u16::<LittleEndian>().unwrap();
    let _version_needed = cursor.read_u16::<LittleEndian>().unwrap();
    let flags = cursor.read_u16::<LittleEndian>().unwrap();
    let method = cursor.read_u16::<LittleEndian>().unwrap();
    let mod_time = cursor.read_u16::<LittleEndian>().unwrap();
    let mod_date = cursor.read_u16::<LittleEndian>().unwrap();
    let crc32 = cursor.read_u32::<LittleEndian>().unwrap();
    let compressed_size = cursor.read_u32::<LittleEndian>().unwrap();
    let uncompressed_size = cursor.read_u32::<LittleEndian>().unwrap();
    let name_len = cursor.read_u16::<LittleEndian>().unwrap() as usize;
    let extra_len = cursor.read_u16::<LittleEndian>().unwrap();
    let comment_len = cursor.read_u16::<LittleEndian>().unwrap();
    let disk_start = cursor.read_u16::<LittleEndian>().unwrap();
    let internal_attrs = cursor.read_u16::<LittleEndian>().unwrap();
    let external_attrs = cursor.read_u32::<LittleEndian>().unwrap();
    let lfh_offset = cursor.read_u32::<LittleEndian>().unwrap() as usize;

    assert_eq!(flags, 0x0808, "expected descriptor + UTF-8 flag bits");
    assert_eq!(method, 0, "expected stored entries only");
    assert_eq!(compressed_size, uncompressed_size);
    assert_eq!(extra_len, 0);
    assert_eq!(comment_len, 0);
    assert_eq!(disk_start, 0);
    assert_eq!(internal_attrs, 0);
    assert_eq!(external_attrs, 0);

    let mut name_bytes = vec![0u8; name_len];
    cursor.read_exact(&mut name_bytes).unwrap();
    let name = String::from_utf8(name_bytes.clone()).expect("names are UTF-8");

    // Local header must agree with the directory record field for field.
    let lfh = &data[lfh_offset..lfh_offset + LFH_SIZE];
    assert_eq!(&lfh[0..4], b"PK\x03\x04", "bad local header signature");
    let mut lfh_cursor = Cursor::new(&lfh[4..]);
    let _lfh_version = lfh_cursor.read_u16::<LittleEndian>().unwrap();
    assert_eq!(lfh_cursor.read_u16::<LittleEndian>().unwrap(), flags);
    assert_eq!(lfh_cursor.read_u16::<LittleEndian>().unwrap(), method);
    assert_eq!(lfh_cursor.read_u16::<LittleEndian>().unwrap(), mod_time);
    assert_eq!(lfh_cursor.read_u16::<LittleEndian>().unwrap(), mod_date);
    assert_eq!(lfh_cursor.read_u32::<LittleEndian>().unwrap(), crc32);
    assert_eq!(lfh_cursor.read_u32::<LittleEndian>().unwrap(), compressed_size);
    assert_eq!(lfh_cursor.read_u32::<LittleEndian>().unwrap(), uncompressed_size);
    assert_eq!(lfh_cursor.read_u16::<LittleEndian>().unwrap() as usize, name_len);
    assert_eq!(lfh_cursor.read_u16::<LittleEndian>().unwrap(), 0); // extra field
    assert_eq!(&data[lfh_offset + LFH_SIZE..lfh_offset + LFH_SIZE + name_len], &name_bytes[..]);

    // Stored content, copied verbatim between header and descriptor
    let content_at = lfh_offset + LFH_SIZE + name_len;
    let content = data[content_at..content_at + uncompressed_size as usize].to_vec();

    // Trailing data descriptor restates the header fields exactly
    let desc_at = content_at + uncompressed_size as usize;
    let desc = &data[desc_at..desc_at + 16];
    assert_eq!(&desc[0..4], b"PK\x07\x08", "bad descriptor signature");
    let mut desc_cursor = Cursor::new(&desc[4..]);
    assert_eq!(desc_cursor.read_u32::<LittleEndian>().unwrap(), crc32);
    assert_eq!(desc_cursor.read_u32::<LittleEndian>().unwrap(), compressed_size);
    assert_eq!(desc_cursor.read_u32::<LittleEndian>().unwrap(), uncompressed_size);

    ParsedEntry {
        name,
        crc32,
        content,
        mod_time,
        mod_date,
    }
}

#[test]
fn round_trip_preserves_names_bytes_and_checksums() {
    let stamp = datetime!(2023-11-05 08:15:26 UTC);
    let binary: Vec<u8> = (0u8..=255).collect();
    let inputs: Vec<(&str, &[u8])> = vec![
        ("test.txt", b"abc"),
        ("docs/readme.md", b"# readme\n\nsome text\n"),
        ("päckchen.txt", "grüße".as_bytes()),
        ("binary.dat", &binary),
        ("empty.txt", b""),
    ];

    let mut writer = ZipWriter::new();
    for (name, content) in &inputs {
        writer.add_entry(name, content, Some(stamp)).unwrap();
    }
    let archive = writer.finish().unwrap();

    let parsed = parse_archive(&archive);
    assert_eq!(parsed.len(), inputs.len());

    for (entry, (name, content)) in parsed.iter().zip(&inputs) {
        assert_eq!(entry.name, *name);
        assert_eq!(entry.content, *content);
        assert_eq!(entry.crc32, checksum(content));
    }
}

#[test]
fn round_trip_preserves_timestamps_at_dos_resolution() {
    let mut writer = ZipWriter::new();
    writer
        .add_entry("stamped.txt", b"x", Some(datetime!(2021-06-01 12:34:57 UTC)))
        .unwrap();
    let archive = writer.finish().unwrap();

    let entry = &parse_archive(&archive)[0];
    let dos = DosDateTime {
        time: entry.mod_time,
        date: entry.mod_date,
    };
    assert_eq!(dos.ymd(), (2021, 6, 1));
    // odd second truncates to the 2-second grid
    assert_eq!(dos.hms(), (12, 34, 56));
}

#[test]
fn zero_entry_archive_is_valid_and_minimal() {
    let archive = ZipWriter::new().finish().unwrap();
    assert_eq!(archive.len(), EOCD_SIZE);
    assert!(parse_archive(&archive).is_empty());
}

#[test]
fn directory_count_tracks_many_entries() {
    let stamp = datetime!(2024-01-02 03:04:06 UTC);
    let mut writer = ZipWriter::new();
    for i in 0..40 {
        writer
            .add_entry(&format!("file-{i:02}.bin"), &[i as u8; 17], Some(stamp))
            .unwrap();
    }
    let archive = writer.finish().unwrap();

    let parsed = parse_archive(&archive);
    assert_eq!(parsed.len(), 40);
    for (i, entry) in parsed.iter().enumerate() {
        assert_eq!(entry.name, format!("file-{i:02}.bin"));
        assert_eq!(entry.content, vec![i as u8; 17]);
    }
}
