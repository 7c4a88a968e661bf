//! Byte source abstractions for the decoder.
//!
//! This module provides the [`ByteSource`] trait: bounded reads addressed by
//! absolute offset, with no cursor shared between calls. It is implemented for
//! in-memory buffers and, through [`SeekableSource`], for any `Read + Seek`
//! handle such as an open `File`.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use log::{info, trace};

use super::types::error::{AbifError, Result};

/// Random-access byte source of known finite length.
pub trait ByteSource {
    /// Total number of bytes in the source.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads exactly `length` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`AbifError::TruncatedInput`] if fewer than `length` bytes are
    /// available at `offset`.
    fn read_at(&self, offset: u64, length: u32) -> Result<Vec<u8>>;
}

/// Fails with `TruncatedInput` unless `offset + length` lies within `available`.
pub(crate) fn check_bounds(offset: u64, length: u64, available: u64) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= available => Ok(()),
        _ => Err(AbifError::TruncatedInput {
            offset,
            length,
            available: available.saturating_sub(offset),
        }),
    }
}

impl ByteSource for [u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn read_at(&self, offset: u64, length: u32) -> Result<Vec<u8>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        check_bounds(offset, u64::from(length), ByteSource::len(self))?;
        let start = offset as usize;
        Ok(self[start..start + length as usize].to_vec())
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> u64 {
        ByteSource::len(self.as_slice())
    }

    fn read_at(&self, offset: u64, length: u32) -> Result<Vec<u8>> {
        self.as_slice().read_at(offset, length)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_at(&self, offset: u64, length: u32) -> Result<Vec<u8>> {
        (**self).read_at(offset, length)
    }
}

/// A [`ByteSource`] over any seekable reader.
///
/// The handle sits behind a mutex so reads can be issued through `&self`;
/// every read seeks to its own absolute offset first.
#[derive(Debug)]
pub struct SeekableSource<R> {
    inner: Mutex<R>,
    len: u64,
}

impl<R: Read + Seek> SeekableSource<R> {
    /// Wraps a reader, discovering its length by seeking to the end.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        trace!("Seekable source length: {} bytes", len);
        Ok(Self {
            inner: Mutex::new(inner),
            len,
        })
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> Result<R> {
        self.inner.into_inner().map_err(|_| AbifError::LockPoisoned)
    }
}

impl SeekableSource<File> {
    /// Opens the file at `path` as a byte source.
    ///
    /// # Errors
    /// Returns [`AbifError::UnsupportedInputType`] if the path does not name a
    /// regular file, or an I/O error if it cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening ABIF file: {}", path.display());
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(AbifError::UnsupportedInputType(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> ByteSource for SeekableSource<R> {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, length: u32) -> Result<Vec<u8>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        check_bounds(offset, u64::from(length), self.len)?;

        let mut inner = self.inner.lock().map_err(|_| AbifError::LockPoisoned)?;
        inner.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; length as usize];
        inner.read_exact(&mut buf).map_err(|e| match e.kind() {
            // The underlying file shrank after the length was taken.
            ErrorKind::UnexpectedEof => AbifError::TruncatedInput {
                offset,
                length: u64::from(length),
                available: self.len.saturating_sub(offset),
            },
            _ => AbifError::Io(e),
        })?;
        Ok(buf)
    }
}
