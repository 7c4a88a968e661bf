//! ABIF file header parsing and validation.
//!
//! Only four header fields matter to the decoder:
//!
//! ```text
//! [offset  0, 4 bytes] Signature, always "ABIF"
//! [offset  4, 2 bytes] Version (big-endian u16, major * 100 + minor)
//! [offset 18, 4 bytes] Number of directory entries (big-endian u32)
//! [offset 26, 4 bytes] Directory table offset (big-endian u32)
//! ```

use byteorder::{BigEndian, ByteOrder};
use log::{debug, info, trace};

use crate::abif::source::ByteSource;
use crate::abif::types::{
    error::{AbifError, Result},
    models::{AbifHeader, AbifVersion, ABIF_MAGIC},
};

const MAGIC_LEN: u32 = 4;
const VERSION_OFFSET: u64 = 4;
const ELEMENT_COUNT_OFFSET: u64 = 18;
const DIRECTORY_OFFSET_OFFSET: u64 = 26;

/// Parses and validates the header at the start of the source.
///
/// # Errors
/// - [`AbifError::UnrecognizedFormat`] if the source does not start with `ABIF`
/// - [`AbifError::UnsupportedVersion`] if the major version is above 1
/// - [`AbifError::TruncatedInput`] if the source ends inside the header
pub fn parse<S: ByteSource + ?Sized>(source: &S) -> Result<AbifHeader> {
    info!("Parsing ABIF header");

    // Step 1: Check the signature
    let magic_len = source.len().min(u64::from(MAGIC_LEN)) as u32;
    let magic = source.read_at(0, magic_len)?;
    if magic.as_slice() != ABIF_MAGIC {
        return Err(AbifError::UnrecognizedFormat {
            found: magic.escape_ascii().to_string(),
        });
    }

    // Step 2: Check the major version
    let raw_version = BigEndian::read_u16(&source.read_at(VERSION_OFFSET, 2)?);
    trace!("Raw version: {}", raw_version);
    let version = AbifVersion::try_from(raw_version)?;

    // Step 3: Locate the directory
    let element_count = BigEndian::read_u32(&source.read_at(ELEMENT_COUNT_OFFSET, 4)?);
    let directory_offset = BigEndian::read_u32(&source.read_at(DIRECTORY_OFFSET_OFFSET, 4)?);
    debug!(
        "Header fields: version={}, elements={}, directory_offset={}",
        version, element_count, directory_offset
    );

    Ok(AbifHeader {
        version,
        element_count,
        directory_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(magic: &[u8; 4], version: u16, count: u32, offset: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; 34];
        bytes[0..4].copy_from_slice(magic);
        bytes[4..6].copy_from_slice(&version.to_be_bytes());
        bytes[18..22].copy_from_slice(&count.to_be_bytes());
        bytes[26..30].copy_from_slice(&offset.to_be_bytes());
        bytes
    }

    #[test]
    fn reads_big_endian_fields() {
        let header = parse(&header_bytes(b"ABIF", 101, 0x0102_0304, 128)).unwrap();
        assert_eq!(header.version, AbifVersion { major: 1, minor: 1 });
        assert_eq!(header.element_count, 0x0102_0304);
        assert_eq!(header.directory_offset, 128);
    }

    #[test]
    fn rejects_wrong_signature() {
        let err = parse(&header_bytes(b"FIBA", 101, 0, 0)).unwrap_err();
        assert!(matches!(err, AbifError::UnrecognizedFormat { found } if found == "FIBA"));
    }

    #[test]
    fn short_source_is_unrecognized() {
        let err = parse(b"AB".as_slice()).unwrap_err();
        assert!(matches!(err, AbifError::UnrecognizedFormat { .. }));
    }

    #[test]
    fn version_boundary() {
        assert!(parse(&header_bytes(b"ABIF", 199, 0, 0)).is_ok());
        let err = parse(&header_bytes(b"ABIF", 200, 0, 0)).unwrap_err();
        assert!(matches!(err, AbifError::UnsupportedVersion(200)));
    }

    #[test]
    fn header_cut_short_is_truncated() {
        let mut bytes = header_bytes(b"ABIF", 101, 0, 0);
        bytes.truncate(20);
        assert!(matches!(parse(&bytes), Err(AbifError::TruncatedInput { .. })));
    }
}
