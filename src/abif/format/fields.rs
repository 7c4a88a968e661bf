//! Typed field extractors.
//!
//! Each extractor looks up its entry in [`ResolvedTags`], reads the entry's
//! bytes from the source and decodes the number of elements fixed by
//! `num_samples` or `num_bases`. An absent entry yields an empty sequence.
//! Extractors only read, so they can run in any order.

use byteorder::{BigEndian, ByteOrder};
use log::{debug, warn};

use crate::abif::source::ByteSource;
use crate::abif::types::{
    error::{AbifError, Result},
    models::{Channel, FieldRole},
};

use super::tags::ResolvedTags;

/// Decodes `num_samples` big-endian `u16` values for one trace channel.
///
/// Reads the `element_count * 2` bytes the entry declares.
pub fn extract_trace<S: ByteSource + ?Sized>(
    source: &S,
    tags: &ResolvedTags,
    channel: Channel,
) -> Result<Vec<u16>> {
    let Some(entry) = tags.entry(FieldRole::Trace(channel)) else {
        debug!("No trace for channel {}", channel);
        return Ok(Vec::new());
    };
    let count = entry.count()?;
    if count < tags.num_samples() {
        warn!(
            "{} holds {} samples but the G channel declares {}",
            entry,
            count,
            tags.num_samples()
        );
    }

    let offset = entry.offset()?;
    let bytes = source.read_at(offset, count * 2)?;
    decode_u16s(&bytes, tags.num_samples(), offset)
}

/// Decodes `num_bases` ASCII base calls from the `PBAS`/2 entry.
pub fn extract_base_calls<S: ByteSource + ?Sized>(source: &S, tags: &ResolvedTags) -> Result<Vec<char>> {
    let bytes = read_per_base(source, tags, FieldRole::BaseCalls, 1)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Decodes `num_bases` quality scores from the `PCON`/2 entry.
pub fn extract_quality_scores<S: ByteSource + ?Sized>(source: &S, tags: &ResolvedTags) -> Result<Vec<u8>> {
    read_per_base(source, tags, FieldRole::QualityScores, 1)
}

/// Decodes `num_bases` big-endian `u16` peak indices from the `PLOC`/2 entry.
pub fn extract_peak_indexes<S: ByteSource + ?Sized>(source: &S, tags: &ResolvedTags) -> Result<Vec<u16>> {
    let Some(entry) = tags.entry(FieldRole::PeakLocations) else {
        debug!("No entry for {}", FieldRole::PeakLocations);
        return Ok(Vec::new());
    };
    let offset = entry.offset()?;
    let bytes = read_per_base(source, tags, FieldRole::PeakLocations, 2)?;
    decode_u16s(&bytes, tags.num_bases(), offset)
}

/// Reads `num_bases * width` bytes at the entry resolved for `role`.
fn read_per_base<S: ByteSource + ?Sized>(
    source: &S,
    tags: &ResolvedTags,
    role: FieldRole,
    width: u32,
) -> Result<Vec<u8>> {
    let Some(entry) = tags.entry(role) else {
        debug!("No entry for {}", role);
        return Ok(Vec::new());
    };
    if entry.count()? != tags.num_bases() {
        warn!(
            "{} declares {} elements but {} bases were called",
            entry,
            entry.element_count,
            tags.num_bases()
        );
    }
    source.read_at(entry.offset()?, tags.num_bases() * width)
}

/// Decodes the first `count` big-endian `u16` values of `bytes`.
fn decode_u16s(bytes: &[u8], count: u32, offset: u64) -> Result<Vec<u16>> {
    let needed = count as usize * 2;
    if bytes.len() < needed {
        return Err(AbifError::TruncatedInput {
            offset,
            length: needed as u64,
            available: bytes.len() as u64,
        });
    }
    let mut values = vec![0u16; count as usize];
    BigEndian::read_u16_into(&bytes[..needed], &mut values);
    Ok(values)
}
