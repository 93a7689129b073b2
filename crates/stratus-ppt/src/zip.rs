//! Stored-entry zip writer.
//!
//! OOXML packages are plain zip archives; slide XML is small enough that
//! compressing it buys nothing, so every entry is stored. Only the pieces
//! of the format a reader actually checks are emitted: local file headers,
//! the central directory, and the end-of-central-directory record.

use flate2::Crc;

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;

fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(data);
    crc.sum()
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write a zip archive of `(name, contents)` entries.
pub fn write_archive(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut directory = Vec::new();

    for (name, contents) in entries {
        let offset = out.len() as u32;
        let checksum = crc32(contents);
        let size = contents.len() as u32;
        let name_bytes = name.as_bytes();

        // Local file header
        push_u32(&mut out, LOCAL_HEADER_SIG);
        push_u16(&mut out, 20); // version needed
        push_u16(&mut out, 0); // flags
        push_u16(&mut out, 0); // method: stored
        push_u16(&mut out, 0); // mod time
        push_u16(&mut out, 0); // mod date
        push_u32(&mut out, checksum);
        push_u32(&mut out, size);
        push_u32(&mut out, size);
        push_u16(&mut out, name_bytes.len() as u16);
        push_u16(&mut out, 0); // extra length
        out.extend_from_slice(name_bytes);
        out.extend_from_slice(contents);

        // Matching central directory record
        push_u32(&mut directory, CENTRAL_DIR_SIG);
        push_u16(&mut directory, 20); // version made by
        push_u16(&mut directory, 20); // version needed
        push_u16(&mut directory, 0);
        push_u16(&mut directory, 0);
        push_u16(&mut directory, 0);
        push_u16(&mut directory, 0);
        push_u32(&mut directory, checksum);
        push_u32(&mut directory, size);
        push_u32(&mut directory, size);
        push_u16(&mut directory, name_bytes.len() as u16);
        push_u16(&mut directory, 0); // extra length
        push_u16(&mut directory, 0); // comment length
        push_u16(&mut directory, 0); // disk number
        push_u16(&mut directory, 0); // internal attrs
        push_u32(&mut directory, 0); // external attrs
        push_u32(&mut directory, offset);
        directory.extend_from_slice(name_bytes);
    }

    let directory_offset = out.len() as u32;
    out.extend_from_slice(&directory);

    push_u32(&mut out, END_OF_CENTRAL_DIR_SIG);
    push_u16(&mut out, 0); // disk number
    push_u16(&mut out, 0); // directory start disk
    push_u16(&mut out, entries.len() as u16);
    push_u16(&mut out, entries.len() as u16);
    push_u32(&mut out, directory.len() as u32);
    push_u32(&mut out, directory_offset);
    push_u16(&mut out, 0); // comment length

    out
}
