//! # abif-reader
//!
//! A reader for ABIF (`.ab1`) trace files produced by capillary DNA sequencers.
//! Decodes the four fluorescence traces, the called bases, per-base quality
//! scores and per-base peak locations.
//!
//! ```no_run
//! let record = abif_reader::decode_file("sample.ab1")?;
//! println!("{}", record.called_sequence());
//! # Ok::<(), abif_reader::AbifError>(())
//! ```
pub mod abif;

// Re-export the main types for convenience
pub use abif::{
    decode,
    decode_file,
    AbifError,
    AbifReader,
    ByteSource,
    Result,
    SeekableSource,
    types::models::{
        AbifHeader,
        AbifVersion,
        Channel,
        ChromatogramRecord,
        DirectoryEntry,
        FieldRole,
    },
};
