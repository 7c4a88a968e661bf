use std::fs::File;
use std::path::Path;

use log::info;

use super::format::{directory, fields, header, tags};
use super::format::tags::ResolvedTags;
use super::source::{ByteSource, SeekableSource};
use super::types::error::Result;
use super::types::models::*;

/// The main reader for ABIF trace files.
///
/// Construction validates the header, reads the directory and resolves the
/// field roles. Field data is read on demand; nothing is cached and no method
/// mutates the reader, so repeated calls return identical results.
#[derive(Debug)]
pub struct AbifReader<S> {
    source: S,
    header: AbifHeader,
    directory: Vec<DirectoryEntry>,
    tags: ResolvedTags,
}

impl AbifReader<SeekableSource<File>> {
    /// Opens the ABIF file at `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The path is not a regular file or cannot be opened
    /// - The file does not start with `ABIF`
    /// - The major version is above 1
    /// - The directory extends past the end of the file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(SeekableSource::open(path)?)
    }
}

impl<S: ByteSource> AbifReader<S> {
    /// Validates the header and reads the directory of `source`.
    pub fn new(source: S) -> Result<Self> {
        let header = header::parse(&source)?;
        let directory = directory::parse(&source, &header)?;
        let tags = tags::resolve(&directory)?;

        info!(
            "ABIF file opened: version {}, {} directory entries, {} samples, {} bases",
            header.version,
            directory.len(),
            tags.num_samples(),
            tags.num_bases()
        );

        Ok(Self {
            source,
            header,
            directory,
            tags,
        })
    }

    pub fn header(&self) -> &AbifHeader {
        &self.header
    }

    /// All directory entries in file order.
    pub fn directory(&self) -> &[DirectoryEntry] {
        &self.directory
    }

    /// Finds the first directory entry with the given key.
    pub fn find(&self, name: &[u8; 4], tag_number: i32) -> Option<&DirectoryEntry> {
        self.directory.iter().find(|entry| entry.matches(name, tag_number))
    }

    /// Returns the entry resolved for `role`, if the file has one.
    pub fn entry(&self, role: FieldRole) -> Option<&DirectoryEntry> {
        self.tags.entry(role)
    }

    /// Number of samples in every trace.
    pub fn num_samples(&self) -> u32 {
        self.tags.num_samples()
    }

    /// Number of called bases.
    pub fn num_bases(&self) -> u32 {
        self.tags.num_bases()
    }

    pub fn trace(&self, channel: Channel) -> Result<Vec<u16>> {
        fields::extract_trace(&self.source, &self.tags, channel)
    }

    pub fn called_bases(&self) -> Result<Vec<char>> {
        fields::extract_base_calls(&self.source, &self.tags)
    }

    pub fn quality_scores(&self) -> Result<Vec<u8>> {
        fields::extract_quality_scores(&self.source, &self.tags)
    }

    pub fn peak_indexes(&self) -> Result<Vec<u16>> {
        fields::extract_peak_indexes(&self.source, &self.tags)
    }

    /// Decodes every field into a [`ChromatogramRecord`].
    ///
    /// Fails as a whole on the first extractor error.
    pub fn read_chromatogram(&self) -> Result<ChromatogramRecord> {
        let traces = [
            self.trace(Channel::G)?,
            self.trace(Channel::A)?,
            self.trace(Channel::T)?,
            self.trace(Channel::C)?,
        ];
        let record = ChromatogramRecord::new(
            traces,
            self.called_bases()?,
            self.quality_scores()?,
            self.peak_indexes()?,
        );

        info!(
            "Chromatogram decoded: {} samples per channel, {} bases, {} quality scores, {} peaks",
            record.num_samples(),
            record.num_bases(),
            record.quality_scores().len(),
            record.peak_indexes().len()
        );
        Ok(record)
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}
