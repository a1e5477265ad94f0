//! Block-aware line scanner
//!
//! Sliced G-code opens with comment blocks delimited by sentinel lines:
//!
//! ```text
//! ; HEADER_BLOCK_START
//! ; generated by OrcaSlicer 2.1.1 on 2024-06-01 at 12:00:00
//! ; HEADER_BLOCK_END
//!
//! ; THUMBNAIL_BLOCK_START
//! ; thumbnail begin 96x96 4412
//! ; iVBORw0KGgoAAAANSUhEUgAAAGAAAABgCAYAAADimHc4AAAQ...
//! ; thumbnail end
//! ; THUMBNAIL_BLOCK_END
//!
//! ; CONFIG_BLOCK_START
//! ; filament_type = PLA
//! ; CONFIG_BLOCK_END
//!
//! ; EXECUTABLE_BLOCK_START
//! ```
//!
//! The scanner consumes one line at a time, never looking back, and routes
//! each line to the field parser for the block it is in. Everything after
//! `EXECUTABLE_BLOCK_START` is motion commands, so scanning stops there.

use std::ops::ControlFlow;

use super::fields;
use crate::model::{FileMetadata, ParserConfig, SlicerIdentity};
use crate::thumbnail::decode_thumbnail;

const HEADER_BLOCK_START: &str = "; HEADER_BLOCK_START";
const HEADER_BLOCK_END: &str = "; HEADER_BLOCK_END";
const THUMBNAIL_BLOCK_START: &str = "; THUMBNAIL_BLOCK_START";
const THUMBNAIL_BLOCK_END: &str = "; THUMBNAIL_BLOCK_END";
const CONFIG_BLOCK_START: &str = "; CONFIG_BLOCK_START";
const CONFIG_BLOCK_END: &str = "; CONFIG_BLOCK_END";
const EXECUTABLE_BLOCK_START: &str = "EXECUTABLE_BLOCK_START";
const THUMBNAIL_BEGIN: &str = "; thumbnail begin";
const THUMBNAIL_END: &str = "; thumbnail end";

/// Left in front of the first line by editors that save UTF-8 with a BOM
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Block the scanner is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// Between blocks; comment lines use the fallback key/value format
    #[default]
    Outside,
    /// Inside the header block
    Header,
    /// Inside the thumbnail block; `in_data` is set between
    /// `thumbnail begin` and `thumbnail end`
    Thumbnail {
        /// Collecting base64 payload lines
        in_data: bool,
    },
    /// Inside the config block
    Config,
}

/// Streaming state machine over the lines of one instruction file
pub struct LineScanner<'a> {
    config: &'a ParserConfig,
    state: BlockState,
    thumbnail_data: String,
    identity: SlicerIdentity,
    metadata: FileMetadata,
    stopped: bool,
}

impl<'a> LineScanner<'a> {
    /// Create a scanner in the [`BlockState::Outside`] state
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            state: BlockState::Outside,
            thumbnail_data: String::new(),
            identity: SlicerIdentity::new(),
            metadata: FileMetadata::new(),
            stopped: false,
        }
    }

    /// Current block
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Base64 text collected since the last `thumbnail begin`
    pub fn thumbnail_data(&self) -> &str {
        &self.thumbnail_data
    }

    /// Whether the executable block has been reached
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Consume one line
    ///
    /// Returns [`ControlFlow::Break`] once the executable block starts; any
    /// line fed after that is ignored.
    pub fn feed(&mut self, line: &str) -> ControlFlow<()> {
        if self.stopped {
            return ControlFlow::Break(());
        }

        let line = line.trim_start_matches(BYTE_ORDER_MARK).trim();

        if line.contains(EXECUTABLE_BLOCK_START) {
            log::trace!("executable block reached, stopping scan");
            self.stopped = true;
            return ControlFlow::Break(());
        }

        // Block sentinels are always consumed; an end only closes its own block
        let next = match line {
            HEADER_BLOCK_START => BlockState::Header,
            HEADER_BLOCK_END => self.closed_if(|s| s == BlockState::Header),
            THUMBNAIL_BLOCK_START => BlockState::Thumbnail { in_data: false },
            THUMBNAIL_BLOCK_END => self.closed_if(|s| matches!(s, BlockState::Thumbnail { .. })),
            CONFIG_BLOCK_START => BlockState::Config,
            CONFIG_BLOCK_END => self.closed_if(|s| s == BlockState::Config),
            _ => {
                self.route(line);
                return ControlFlow::Continue(());
            }
        };
        if next != self.state {
            self.transition(next);
        }
        ControlFlow::Continue(())
    }

    /// Finish scanning and hand back the records
    pub fn finish(mut self) -> (SlicerIdentity, FileMetadata) {
        self.discard_partial_thumbnail("end of input");
        (self.identity, self.metadata)
    }

    fn closed_if(&self, is_open: impl Fn(BlockState) -> bool) -> BlockState {
        if is_open(self.state) {
            BlockState::Outside
        } else {
            self.state
        }
    }

    fn route(&mut self, line: &str) {
        match self.state {
            BlockState::Header => fields::parse_header_line(line, &mut self.identity, self.config),
            BlockState::Thumbnail { in_data } => self.thumbnail_line(line, in_data),
            BlockState::Config => fields::parse_config_line(line, &mut self.metadata),
            BlockState::Outside => fields::parse_additional_line(
                line,
                &mut self.identity,
                &mut self.metadata,
                self.config,
            ),
        }
    }

    fn transition(&mut self, next: BlockState) {
        if matches!(self.state, BlockState::Thumbnail { in_data: true }) {
            self.discard_partial_thumbnail("block change");
        }
        log::trace!("block {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn thumbnail_line(&mut self, line: &str, in_data: bool) {
        if starts_with_ignore_case(line, THUMBNAIL_BEGIN) {
            if in_data {
                self.discard_partial_thumbnail("new thumbnail begin");
            }
            self.state = BlockState::Thumbnail { in_data: true };
            return;
        }

        if !in_data {
            return;
        }

        if line.eq_ignore_ascii_case(THUMBNAIL_END) {
            self.state = BlockState::Thumbnail { in_data: false };
            self.flush_thumbnail();
            return;
        }

        self.thumbnail_data.push_str(fields::strip_comment(line));
    }

    fn flush_thumbnail(&mut self) {
        let encoded = std::mem::take(&mut self.thumbnail_data);
        match decode_thumbnail(&encoded, self.config.image_decoder()) {
            Ok(thumbnail) => {
                log::debug!(
                    "decoded {} thumbnail {}x{}",
                    thumbnail.format,
                    thumbnail.width,
                    thumbnail.height
                );
                self.metadata.thumbnail = Some(thumbnail);
            }
            Err(e) => self
                .config
                .report(format!("Error decoding thumbnail image: {}", e)),
        }
    }

    fn discard_partial_thumbnail(&mut self, reason: &str) {
        if !self.thumbnail_data.is_empty() {
            self.config.report(format!(
                "Discarding unterminated thumbnail data ({} chars) at {}",
                self.thumbnail_data.len(),
                reason
            ));
            self.thumbnail_data.clear();
        }
    }
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
