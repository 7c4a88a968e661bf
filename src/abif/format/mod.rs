//! File format parsing layer for ABIF trace files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! the [`ByteSource`](crate::abif::source::ByteSource) and the high-level
//! [`AbifReader`](crate::abif::reader::AbifReader).
//!
//! # Module Organization
//!
//! - [`header`]: Validates the signature and version, locates the directory
//! - [`directory`]: Decodes the fixed-size directory records
//! - [`tags`]: Maps directory entries to field roles
//! - [`fields`]: Decodes traces, base calls, quality scores and peak locations
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← header::parse()
//! ├─────────────────┤
//! │  Field Data     │ ← fields::extract_*()
//! │  (addressed by  │
//! │   entries)      │
//! ├─────────────────┤
//! │  Directory      │ ← directory::parse(), tags::resolve()
//! │  (28 bytes per  │
//! │   entry)        │
//! └─────────────────┘
//! ```

pub mod directory;
pub mod fields;
pub mod header;
pub mod tags;
