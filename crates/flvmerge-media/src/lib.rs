//! flvmerge-media: FLV container parsing and the merge engine
//!
//! This crate holds everything flvmerge does to bytes: decoding and
//! re-encoding the FLV tag stream, editing onMetaData script payloads, and
//! merging several sources into one continuous output.
//!
//! # Modules
//!
//! - `codec` - big-endian integer/double codec for FLV's fixed-width fields
//! - `container` - file header, tag kinds, tag records
//! - `search` - naive byte-pattern search used on script payloads
//! - `reader` / `writer` - sequential tag-stream I/O
//! - `script` - duration lookup and keyframe-index stripping
//! - `merge` - the merge engine
//!
//! # Merge flow
//!
//! [`MergeEngine`] drives one [`TagStreamReader`] per source and a single
//! [`TagStreamWriter`]:
//!
//! 1. The first source supplies the output header and its metadata tag,
//!    with the keyframe index stripped (its byte offsets are meaningless
//!    in the merged file).
//! 2. Every source's audio/video tags are rebased so both streams continue
//!    at or after everything already written.
//! 3. Each source's metadata duration is accumulated, and after the last
//!    source the total is patched back over the output's duration field.

pub mod codec;
pub mod container;
pub mod error;
pub mod merge;
pub mod reader;
pub mod script;
pub mod search;
pub mod writer;

pub use container::{FileHeader, Tag, TagKind};
pub use error::{Error, Result};
pub use merge::{MergeEngine, MergeSummary, SourceSummary};
pub use reader::TagStreamReader;
pub use writer::TagStreamWriter;
