//! Core ABIF reader module

pub mod format;
pub mod reader;
pub mod source;
pub mod types;

use std::path::Path;

pub use reader::AbifReader;
pub use source::{ByteSource, SeekableSource};
pub use types::error::{AbifError, Result};
use types::models::ChromatogramRecord;

/// Decodes an entire ABIF image from `source`.
///
/// This is a pure function of the source bytes: decoding the same bytes twice
/// yields equal records.
///
/// # Errors
/// Returns the first error met while validating the header, reading the
/// directory or extracting a field. No partial record is returned.
pub fn decode<S: ByteSource + ?Sized>(source: &S) -> Result<ChromatogramRecord> {
    AbifReader::new(source)?.read_chromatogram()
}

/// Opens and decodes the ABIF file at `path`.
pub fn decode_file(path: impl AsRef<Path>) -> Result<ChromatogramRecord> {
    AbifReader::open(path)?.read_chromatogram()
}
