//! Core data structures for ABIF format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The file header and its version
//! - Directory entries describing every field in the file
//! - Field roles and trace channels used for tag resolution
//! - The decoded chromatogram

use std::fmt;

use serde::Serialize;

use super::error::{AbifError, Result};

/// The four-byte signature every ABIF file starts with.
pub const ABIF_MAGIC: &[u8; 4] = b"ABIF";

/// Size in bytes of one on-disk directory record.
pub const DIRECTORY_ENTRY_SIZE: u64 = 28;

/// ABIF file version, stored on disk as `major * 100 + minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbifVersion {
    pub major: u16,
    pub minor: u16,
}

impl AbifVersion {
    /// Highest major version this reader understands.
    pub const MAX_SUPPORTED_MAJOR: u16 = 1;

    /// Returns the version as stored in the file.
    pub fn raw(&self) -> u16 {
        self.major * 100 + self.minor
    }
}

impl TryFrom<u16> for AbifVersion {
    type Error = AbifError;
    fn try_from(raw: u16) -> Result<Self> {
        let major = raw / 100;
        if major > Self::MAX_SUPPORTED_MAJOR {
            return Err(AbifError::UnsupportedVersion(raw));
        }
        Ok(Self {
            major,
            minor: raw % 100,
        })
    }
}

impl fmt::Display for AbifVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

/// Parsed and validated ABIF file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbifHeader {
    pub version: AbifVersion,
    /// Number of records in the directory table.
    pub element_count: u32,
    /// Absolute byte offset of the directory table.
    pub directory_offset: u32,
}

/// A single record from the directory table.
///
/// Each entry names one field instance in the file and tells where its data
/// lives. The 4-byte data handle that closes every on-disk record is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: [u8; 4],
    pub tag_number: i32,
    pub element_type: i16,
    pub element_size: i16,
    pub element_count: i32,
    pub data_size: i32,
    pub data_offset: i32,
}

impl DirectoryEntry {
    /// Returns the tag name as text, replacing non-ASCII bytes.
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    /// Returns `true` if this entry carries the given `(name, tag_number)` key.
    pub fn matches(&self, name: &[u8; 4], tag_number: i32) -> bool {
        &self.name == name && self.tag_number == tag_number
    }

    /// Element count as an unsigned length.
    pub fn count(&self) -> Result<u32> {
        u32::try_from(self.element_count).map_err(|_| {
            AbifError::InvalidFormat(format!(
                "Negative element count {} in {}/{}",
                self.element_count,
                self.name_lossy(),
                self.tag_number
            ))
        })
    }

    /// Data offset as an absolute file position.
    pub fn offset(&self) -> Result<u64> {
        u64::try_from(self.data_offset).map_err(|_| {
            AbifError::InvalidFormat(format!(
                "Negative data offset {} in {}/{}",
                self.data_offset,
                self.name_lossy(),
                self.tag_number
            ))
        })
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.name_lossy(), self.tag_number)
    }
}

/// One of the four fluorescence channels.
///
/// Variants are declared in on-disk order: `DATA` tags 9, 10, 11 and 12 hold
/// the G, A, T and C channels respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    G,
    A,
    T,
    C,
}

impl Channel {
    /// All channels in tag-number order.
    pub const ALL: [Channel; 4] = [Channel::G, Channel::A, Channel::T, Channel::C];

    /// Tag number of this channel's `DATA` entry.
    pub fn tag_number(self) -> i32 {
        match self {
            Channel::G => 9,
            Channel::A => 10,
            Channel::T => 11,
            Channel::C => 12,
        }
    }

    pub fn from_tag_number(tag_number: i32) -> Option<Self> {
        match tag_number {
            9 => Some(Channel::G),
            10 => Some(Channel::A),
            11 => Some(Channel::T),
            12 => Some(Channel::C),
            _ => None,
        }
    }

    /// The nucleotide this channel reports.
    pub fn base(self) -> char {
        match self {
            Channel::G => 'G',
            Channel::A => 'A',
            Channel::T => 'T',
            Channel::C => 'C',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}

/// Semantic role of a directory entry, keyed on `(name, tag_number)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Trace(Channel),
    BaseCalls,
    QualityScores,
    PeakLocations,
}

impl FieldRole {
    pub const COUNT: usize = 7;

    pub const ALL: [FieldRole; Self::COUNT] = [
        FieldRole::Trace(Channel::G),
        FieldRole::Trace(Channel::A),
        FieldRole::Trace(Channel::T),
        FieldRole::Trace(Channel::C),
        FieldRole::BaseCalls,
        FieldRole::QualityScores,
        FieldRole::PeakLocations,
    ];

    /// The `(name, tag_number)` pair identifying this role in the directory.
    pub fn key(self) -> (&'static [u8; 4], i32) {
        match self {
            FieldRole::Trace(channel) => (b"DATA", channel.tag_number()),
            FieldRole::BaseCalls => (b"PBAS", 2),
            FieldRole::QualityScores => (b"PCON", 2),
            FieldRole::PeakLocations => (b"PLOC", 2),
        }
    }

    /// Maps a directory key to its role, if it has one.
    pub fn resolve(name: &[u8; 4], tag_number: i32) -> Option<Self> {
        match name {
            b"DATA" => Channel::from_tag_number(tag_number).map(FieldRole::Trace),
            b"PBAS" if tag_number == 2 => Some(FieldRole::BaseCalls),
            b"PCON" if tag_number == 2 => Some(FieldRole::QualityScores),
            b"PLOC" if tag_number == 2 => Some(FieldRole::PeakLocations),
            _ => None,
        }
    }

    /// Slot index in the resolved tag table.
    pub fn index(self) -> usize {
        match self {
            FieldRole::Trace(channel) => match channel {
                Channel::G => 0,
                Channel::A => 1,
                Channel::T => 2,
                Channel::C => 3,
            },
            FieldRole::BaseCalls => 4,
            FieldRole::QualityScores => 5,
            FieldRole::PeakLocations => 6,
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldRole::Trace(channel) => write!(f, "trace {}", channel),
            FieldRole::BaseCalls => write!(f, "base calls"),
            FieldRole::QualityScores => write!(f, "quality scores"),
            FieldRole::PeakLocations => write!(f, "peak locations"),
        }
    }
}

/// Decoded contents of an ABIF file.
///
/// Built once per successful decode and handed to the caller by value.
/// Fields absent from the file are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChromatogramRecord {
    trace_a: Vec<u16>,
    trace_c: Vec<u16>,
    trace_g: Vec<u16>,
    trace_t: Vec<u16>,
    called_bases: Vec<char>,
    quality_scores: Vec<u8>,
    peak_indexes: Vec<u16>,
}

impl ChromatogramRecord {
    pub(crate) fn new(
        [trace_g, trace_a, trace_t, trace_c]: [Vec<u16>; 4],
        called_bases: Vec<char>,
        quality_scores: Vec<u8>,
        peak_indexes: Vec<u16>,
    ) -> Self {
        Self {
            trace_a,
            trace_c,
            trace_g,
            trace_t,
            called_bases,
            quality_scores,
            peak_indexes,
        }
    }

    pub fn trace_a(&self) -> &[u16] {
        &self.trace_a
    }

    pub fn trace_c(&self) -> &[u16] {
        &self.trace_c
    }

    pub fn trace_g(&self) -> &[u16] {
        &self.trace_g
    }

    pub fn trace_t(&self) -> &[u16] {
        &self.trace_t
    }

    /// Returns the trace for the given channel.
    pub fn trace(&self, channel: Channel) -> &[u16] {
        match channel {
            Channel::G => &self.trace_g,
            Channel::A => &self.trace_a,
            Channel::T => &self.trace_t,
            Channel::C => &self.trace_c,
        }
    }

    /// Base calls, one character per called position.
    pub fn called_bases(&self) -> &[char] {
        &self.called_bases
    }

    /// Base calls joined into a single string.
    pub fn called_sequence(&self) -> String {
        self.called_bases.iter().collect()
    }

    /// Per-base quality scores (0–255), aligned with [`called_bases`](Self::called_bases).
    pub fn quality_scores(&self) -> &[u8] {
        &self.quality_scores
    }

    /// Trace sample index of each called base.
    pub fn peak_indexes(&self) -> &[u16] {
        &self.peak_indexes
    }

    /// Number of samples in the G channel, which governs every trace length.
    pub fn num_samples(&self) -> usize {
        self.trace_g.len()
    }

    pub fn num_bases(&self) -> usize {
        self.called_bases.len()
    }
}
