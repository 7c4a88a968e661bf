//! Resolution of directory entries to field roles.
//!
//! A single pass over the directory fills one slot per [`FieldRole`]; the
//! extractors then look their entry up by role instead of rescanning.

use log::{debug, warn};

use crate::abif::types::{
    error::Result,
    models::{Channel, DirectoryEntry, FieldRole},
};

/// Directory entries keyed by role, plus the counts that bound extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTags {
    slots: [Option<DirectoryEntry>; FieldRole::COUNT],
    num_samples: u32,
    num_bases: u32,
}

impl ResolvedTags {
    /// Returns the entry resolved for `role`, if the file has one.
    pub fn entry(&self, role: FieldRole) -> Option<&DirectoryEntry> {
        self.slots[role.index()].as_ref()
    }

    /// Samples per trace, taken from the G channel (`DATA`/9) entry.
    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    /// Called bases, taken from the `PBAS`/2 entry.
    pub fn num_bases(&self) -> u32 {
        self.num_bases
    }
}

/// Maps every recognised `(name, tag_number)` in `directory` to its role.
///
/// The first entry for a role wins; later duplicates are logged and ignored.
/// Roles with no entry stay empty.
///
/// # Errors
/// Returns [`AbifError::InvalidFormat`](crate::AbifError::InvalidFormat) if a
/// resolved entry declares a negative element count.
pub fn resolve(directory: &[DirectoryEntry]) -> Result<ResolvedTags> {
    let mut tags = ResolvedTags::default();

    for entry in directory {
        let Some(role) = FieldRole::resolve(&entry.name, entry.tag_number) else {
            continue;
        };
        let slot = &mut tags.slots[role.index()];
        if slot.is_some() {
            warn!("Duplicate {} entry for {}; keeping the first", entry, role);
            continue;
        }
        entry.count()?;
        if (0..=4).contains(&entry.data_size) && entry.element_count > 0 {
            warn!(
                "{} declares {} data bytes, which the format may store inline; reading from offset {}",
                entry, entry.data_size, entry.data_offset
            );
        }
        *slot = Some(*entry);
    }

    tags.num_samples = match tags.entry(FieldRole::Trace(Channel::G)) {
        Some(entry) => entry.count()?,
        None => 0,
    };
    tags.num_bases = match tags.entry(FieldRole::BaseCalls) {
        Some(entry) => entry.count()?,
        None => 0,
    };

    for role in FieldRole::ALL {
        match tags.entry(role) {
            Some(entry) => debug!("Resolved {} -> {} ({} elements)", role, entry, entry.element_count),
            None => debug!("No entry for {}", role),
        }
    }
    debug!(
        "Extraction bounds: samples={}, bases={}",
        tags.num_samples, tags.num_bases
    );

    Ok(tags)
}
