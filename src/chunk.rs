// riff-wavefile -- Decoding and encoding of RIFF/WAVE audio buffers.
// Copyright (c) 2016 Kevin Brothaler and the riff-wave project authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Locating chunks inside a wave buffer.
//!
//! [`locate`] is a plain byte scan: it returns the first occurrence of a tag
//! anywhere in the buffer, regardless of chunk boundaries. This is how the
//! container parser finds "WAVE", "fmt " and "data", each scan starting again
//! from offset 0. A coincidental match inside an earlier auxiliary chunk
//! (e.g. the text of a "bext" chunk containing the bytes `data`) will be
//! picked up first. Files following the usual chunk order aren't affected.
//!
//! [`list_chunks`] walks the top-level chunk headers instead, and is used for
//! discovering the chunks of a file without interpreting them.

use std::fmt;
use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

/// Size of the RIFF header: "RIFF", the chunk size and the "WAVE" form type.
pub const RIFF_HEADER_SIZE: usize = 12;

/// Size of a chunk header: the tag and the chunk size.
pub const CHUNK_HEADER_SIZE: usize = 8;

// MARK: Chunk tags

/// A four character chunk identifier. Tags are compared byte for byte, so
/// they are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    pub const RIFF: ChunkTag = ChunkTag(*b"RIFF");
    pub const WAVE: ChunkTag = ChunkTag(*b"WAVE");
    pub const FMT: ChunkTag = ChunkTag(*b"fmt ");
    pub const DATA: ChunkTag = ChunkTag(*b"data");

    pub const fn new(id: [u8; 4]) -> ChunkTag {
        ChunkTag(id)
    }

    /// Reads a tag from the first four bytes of `bytes`, if there are enough.
    pub fn from_slice(bytes: &[u8]) -> Option<ChunkTag> {
        match bytes.get(..4) {
            Some(&[a, b, c, d]) => Some(ChunkTag([a, b, c, d])),
            _ => None,
        }
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(
                f,
                "0x{:02X}{:02X}{:02X}{:02X}",
                self.0[0], self.0[1], self.0[2], self.0[3]
            ),
        }
    }
}

// MARK: Scanning

/// Returns the offset of the first occurrence of `tag` in `bytes`, or `None`
/// if the tag never occurs.
pub fn locate(bytes: &[u8], tag: ChunkTag) -> Option<usize> {
    let offset = bytes.windows(4).position(|window| window == tag.as_bytes());
    trace!(tag = %tag, offset = ?offset, "chunk lookup");
    offset
}

/// A top-level chunk found by [`list_chunks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkInfo {
    pub tag: ChunkTag,
    /// Offset of the chunk header from the start of the buffer.
    pub offset: usize,
    /// The size declared in the chunk header, excluding the header and any
    /// pad byte.
    pub size: u32,
}

impl ChunkInfo {
    /// The range of the chunk's content as declared. This may run past the
    /// end of the buffer for truncated files; it stops at `usize::MAX`.
    pub fn data_range(&self) -> Range<usize> {
        let start = self.offset.saturating_add(CHUNK_HEADER_SIZE);
        start..start.saturating_add(self.size as usize)
    }
}

/// Walks the chunk headers following the RIFF header and returns every
/// top-level chunk in file order. Odd-sized chunks are followed by a pad
/// byte, which is skipped. The walk stops at the first header that doesn't
/// fit in the buffer.
///
/// The buffer is assumed to start with a RIFF header; nothing here checks it.
pub fn list_chunks(bytes: &[u8]) -> Vec<ChunkInfo> {
    let mut chunks = Vec::new();
    let mut offset = RIFF_HEADER_SIZE;

    while let Some(header) = offset
        .checked_add(CHUNK_HEADER_SIZE)
        .and_then(|end| bytes.get(offset..end))
    {
        let tag = ChunkTag::new([header[0], header[1], header[2], header[3]]);
        let size = LittleEndian::read_u32(&header[4..]);
        chunks.push(ChunkInfo { tag, offset, size });

        offset = match (size as usize)
            .checked_add(size as usize & 1)
            .and_then(|padded| padded.checked_add(CHUNK_HEADER_SIZE))
            .and_then(|len| offset.checked_add(len))
        {
            Some(next) => next,
            None => break,
        };
    }

    trace!(count = chunks.len(), "listed chunks");
    chunks
}

// MARK: Tests
