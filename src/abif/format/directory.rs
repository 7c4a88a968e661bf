//! Directory table parsing.
//!
//! The directory is an array of fixed-size records, one per field in the file:
//!
//! ```text
//! [4 bytes] Tag name
//! [4 bytes] Tag number       (big-endian i32)
//! [2 bytes] Element type     (big-endian i16)
//! [2 bytes] Element size     (big-endian i16)
//! [4 bytes] Element count    (big-endian i32)
//! [4 bytes] Data size        (big-endian i32)
//! [4 bytes] Data offset      (big-endian i32)
//! [4 bytes] Data handle      (unused)
//! ```

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};

use crate::abif::source::{check_bounds, ByteSource};
use crate::abif::types::{
    error::{AbifError, Result},
    models::{AbifHeader, DirectoryEntry, DIRECTORY_ENTRY_SIZE},
};

/// Reads every directory entry declared by `header`, in file order.
///
/// # Errors
/// Returns [`AbifError::TruncatedInput`] if the table extends past the end of
/// the source.
pub fn parse<S: ByteSource + ?Sized>(source: &S, header: &AbifHeader) -> Result<Vec<DirectoryEntry>> {
    if header.element_count == 0 {
        debug!("Directory is empty");
        return Ok(Vec::new());
    }

    let offset = u64::from(header.directory_offset);
    let table_len = u64::from(header.element_count) * DIRECTORY_ENTRY_SIZE;
    check_bounds(offset, table_len, source.len())?;
    let table_len = u32::try_from(table_len).map_err(|_| {
        AbifError::InvalidFormat(format!("Directory table too large: {} bytes", table_len))
    })?;

    debug!(
        "Reading {} directory entries ({} bytes) at offset {}",
        header.element_count, table_len, offset
    );
    let table = source.read_at(offset, table_len)?;

    let entries = table
        .chunks_exact(DIRECTORY_ENTRY_SIZE as usize)
        .map(parse_entry)
        .collect::<Result<Vec<_>>>()?;

    debug!("Directory parsed: {} entries", entries.len());
    Ok(entries)
}

/// Decodes a single 28-byte directory record.
fn parse_entry(mut record: &[u8]) -> Result<DirectoryEntry> {
    let mut name = [0u8; 4];
    record.read_exact(&mut name)?;

    let entry = DirectoryEntry {
        name,
        tag_number: record.read_i32::<BigEndian>()?,
        element_type: record.read_i16::<BigEndian>()?,
        element_size: record.read_i16::<BigEndian>()?,
        element_count: record.read_i32::<BigEndian>()?,
        data_size: record.read_i32::<BigEndian>()?,
        data_offset: record.read_i32::<BigEndian>()?,
    };
    // The remaining 4 bytes are the data handle.

    trace!(
        "Directory entry {}: type={}, size={}, count={}, data_size={}, offset={}",
        entry,
        entry.element_type,
        entry.element_size,
        entry.element_count,
        entry.data_size,
        entry.data_offset
    );
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abif::types::models::AbifVersion;

    fn header(element_count: u32, directory_offset: u32) -> AbifHeader {
        AbifHeader {
            version: AbifVersion { major: 1, minor: 1 },
            element_count,
            directory_offset,
        }
    }

    fn record(name: &[u8; 4], tag: i32, count: i32, offset: i32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(28);
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(&tag.to_be_bytes());
        bytes.extend_from_slice(&4i16.to_be_bytes());
        bytes.extend_from_slice(&2i16.to_be_bytes());
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes.extend_from_slice(&(count * 2).to_be_bytes());
        bytes.extend_from_slice(&offset.to_be_bytes());
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        bytes
    }

    #[test]
    fn decodes_records_in_file_order() {
        let mut bytes = vec![0u8; 8];
        bytes.extend(record(b"DATA", 9, 3, 100));
        bytes.extend(record(b"PBAS", 2, 4, -1));

        let entries = parse(&bytes, &header(2, 8)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(&entries[0].name, b"DATA");
        assert_eq!(entries[0].tag_number, 9);
        assert_eq!(entries[0].element_type, 4);
        assert_eq!(entries[0].element_size, 2);
        assert_eq!(entries[0].element_count, 3);
        assert_eq!(entries[0].data_size, 6);
        assert_eq!(entries[0].data_offset, 100);
        assert!(entries[1].matches(b"PBAS", 2));
        assert_eq!(entries[1].data_offset, -1);
    }

    #[test]
    fn empty_directory_skips_the_read() {
        let bytes = vec![0u8; 4];
        assert!(parse(&bytes, &header(0, 9_999)).unwrap().is_empty());
    }

    #[test]
    fn oversized_count_is_truncated() {
        let mut bytes = vec![0u8; 8];
        bytes.extend(record(b"DATA", 9, 3, 100));
        let err = parse(&bytes, &header(2, 8)).unwrap_err();
        assert!(matches!(err, AbifError::TruncatedInput { offset: 8, length: 56, available: 28 }));
    }

    #[test]
    fn huge_count_does_not_overflow() {
        let bytes = vec![0u8; 64];
        let err = parse(&bytes, &header(u32::MAX, u32::MAX)).unwrap_err();
        assert!(matches!(err, AbifError::TruncatedInput { .. }));
    }
}
