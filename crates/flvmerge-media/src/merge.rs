//! Merge orchestration: timestamp rebasing, duration accumulation, and the
//! final in-place duration patch.

use crate::container::{TagKind, TAG_PREFIX_LEN};
use crate::reader::TagStreamReader;
use crate::writer::TagStreamWriter;
use crate::{script, Error, Result};
use std::io::{Read, Seek, Write};

/// Per-source result, for progress reporting.
#[derive(Debug, Clone, Copy)]
pub struct SourceSummary {
    /// Tags written to the output from this source.
    pub tags_written: u64,
    /// Duration parsed from this source's metadata, in seconds.
    pub duration_secs: f64,
}

/// Whole-run result returned by [`MergeEngine::finish`].
#[derive(Debug, Clone, Copy)]
pub struct MergeSummary {
    /// Number of sources merged.
    pub sources: usize,
    /// Total duration written into the output metadata, in seconds.
    pub total_duration_secs: f64,
    /// Size of the output stream in bytes.
    pub bytes_written: u64,
}

/// Merges an ordered sequence of FLV sources into one sink.
///
/// Sources are appended one at a time with [`append`](Self::append);
/// [`finish`](Self::finish) patches the accumulated duration back into the
/// first source's metadata tag and flushes the sink. Any error aborts the
/// run, leaving the output incomplete; nothing is retried.
pub struct MergeEngine<W> {
    writer: TagStreamWriter<W>,
    total_duration_secs: f64,
    last_audio_ts: u32,
    last_video_ts: u32,
    duration_patch_offset: Option<u64>,
    sources_merged: usize,
}

impl<W: Write + Seek> MergeEngine<W> {
    /// Create an engine writing to `sink`, which must be positioned at the
    /// start of the output.
    pub fn new(sink: W) -> Self {
        Self {
            writer: TagStreamWriter::new(sink),
            total_duration_secs: 0.0,
            last_audio_ts: 0,
            last_video_ts: 0,
            duration_patch_offset: None,
            sources_merged: 0,
        }
    }

    /// Append one source to the output.
    ///
    /// The first source contributes the output header and its metadata tag
    /// (with the keyframe index stripped); every source contributes its
    /// audio and video tags, rebased so both streams continue at or after
    /// every timestamp already written. Each source's first script tag has
    /// its duration added to the running total. Extra script tags, script
    /// tags from later sources, and unrecognized tag kinds are dropped.
    pub fn append<R: Read>(&mut self, source: R) -> Result<SourceSummary> {
        let first_source = self.sources_merged == 0;
        let mut reader = TagStreamReader::open(source)?;

        if first_source {
            self.writer.write_header(reader.header())?;
            self.writer.write_sentinel()?;
        }

        // Whichever stream ended later in the sources so far sets the base,
        // so neither audio nor video can step backwards.
        let base_ts = self.last_audio_ts.max(self.last_video_ts);
        let mut found_duration = false;
        let mut tags_written = 0u64;
        let mut source_duration = 0.0f64;

        while let Some((mut tag, payload)) = reader.read_next()? {
            match tag.kind {
                TagKind::Script if !found_duration => {
                    let (duration, value_offset) = script::read_duration(payload)?;
                    self.total_duration_secs += duration;
                    source_duration = duration;
                    found_duration = true;
                    if first_source {
                        let mut payload = payload.to_vec();
                        script::strip_keyframes(&mut tag, &mut payload)?;
                        self.duration_patch_offset = Some(
                            self.writer.position()?
                                + TAG_PREFIX_LEN as u64
                                + value_offset as u64,
                        );
                        self.writer.write_tag(&tag, &payload)?;
                        tags_written += 1;
                    }
                }
                TagKind::Script => {
                    tracing::debug!("dropping extra script tag");
                }
                TagKind::Audio => {
                    tag.timestamp = base_ts + tag.timestamp;
                    self.last_audio_ts = tag.timestamp;
                    self.writer.write_tag(&tag, payload)?;
                    tags_written += 1;
                }
                TagKind::Video => {
                    tag.timestamp = base_ts + tag.timestamp;
                    self.last_video_ts = tag.timestamp;
                    self.writer.write_tag(&tag, payload)?;
                    tags_written += 1;
                }
                TagKind::Other(raw) => {
                    tracing::debug!(kind = raw, "dropping unrecognized tag kind");
                }
            }
        }

        self.sources_merged += 1;
        tracing::info!(
            source = self.sources_merged,
            tags = tags_written,
            duration_secs = source_duration,
            "source merged"
        );
        Ok(SourceSummary {
            tags_written,
            duration_secs: source_duration,
        })
    }

    /// Patch the accumulated duration into the output metadata and flush.
    ///
    /// Fails with [`Error::NoDurationMetadata`] if the first source never
    /// produced a script tag, before any seek is attempted.
    pub fn finish(mut self) -> Result<MergeSummary> {
        let offset = self.duration_patch_offset.ok_or(Error::NoDurationMetadata)?;
        let bytes_written = self.writer.position()?;
        self.writer.patch_f64(offset, self.total_duration_secs)?;
        self.writer.into_inner()?;
        Ok(MergeSummary {
            sources: self.sources_merged,
            total_duration_secs: self.total_duration_secs,
            bytes_written,
        })
    }
}
