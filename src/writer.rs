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

use std::error;
use std::fmt;
use std::io;
use std::io::Write;
use std::result;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use tracing::debug;

use super::chunk::{ChunkInfo, ChunkTag, CHUNK_HEADER_SIZE, RIFF_HEADER_SIZE};
use super::codec::{self, Samples};
use super::{FormatChunk, WaveFile};

// Size of the canonical "fmt " chunk content.
const FMT_CHUNK_SIZE: u32 = 16;

/// Size of the canonical header, up to and including the "data" chunk size.
pub const CANONICAL_HEADER_SIZE: usize = RIFF_HEADER_SIZE + CHUNK_HEADER_SIZE + FMT_CHUNK_SIZE as usize + CHUNK_HEADER_SIZE;

// MARK: Error types

#[derive(Debug)]
pub enum WriteError {
    /// The parameters for a new file are incorrect or unsupported.
    Format(WriteErrorKind),
    /// An IO error occurred.
    Io(io::Error),
}

/// Represents a result when building or writing a wave file.
pub type WriteResult<T> = result::Result<T, WriteError>;

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WriteError::Format(ref err_kind) => write!(f, "Format error: {}", err_kind),
            WriteError::Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

/// Represents a file format error, when incorrect parameters have been specified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteErrorKind {
    /// The number of channels is zero, which is invalid.
    NumChannelsIsZero,
    /// The sample rate is zero, which is invalid.
    SampleRateIsZero,
    /// A frame of this many channels doesn't fit the 16-bit block align.
    TooManyChannels(u16),
    /// The byte rate doesn't fit in 32 bits.
    ByteRateOverflow,
    /// This many bytes of sample data don't fit the RIFF chunk size.
    DataTooLarge(usize),
}

impl fmt::Display for WriteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WriteErrorKind::NumChannelsIsZero => write!(f, "Number of channels is zero"),
            WriteErrorKind::SampleRateIsZero => write!(f, "Sample rate is zero"),
            WriteErrorKind::TooManyChannels(n) => write!(f, "Too many channels: {}", n),
            WriteErrorKind::ByteRateOverflow => write!(f, "Byte rate is too large"),
            WriteErrorKind::DataTooLarge(n) => write!(f, "Sample data is too large: {} bytes", n),
        }
    }
}

impl error::Error for WriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            WriteError::Format(_) => None,
            WriteError::Io(ref err) => Some(err),
        }
    }
}

impl From<io::Error> for WriteError {
    fn from(err: io::Error) -> WriteError {
        WriteError::Io(err)
    }
}

impl From<WriteErrorKind> for WriteError {
    fn from(kind: WriteErrorKind) -> WriteError {
        WriteError::Format(kind)
    }
}

// MARK: Building

// Sample data is followed by a pad byte when its length is odd.
fn pad_len(data_len: usize) -> usize {
    data_len & 1
}

// The RIFF chunk size of a canonical file holding `data_len` bytes of samples.
fn canonical_riff_size(data_len: usize) -> Option<i32> {
    let size = (CANONICAL_HEADER_SIZE - CHUNK_HEADER_SIZE)
        .checked_add(data_len)?
        .checked_add(pad_len(data_len))?;
    if size > i32::MAX as usize {
        None
    } else {
        Some(size as i32)
    }
}

fn canonical_chunks(data_len: usize) -> Vec<ChunkInfo> {
    vec![
        ChunkInfo { tag: ChunkTag::FMT, offset: RIFF_HEADER_SIZE, size: FMT_CHUNK_SIZE },
        ChunkInfo {
            tag: ChunkTag::DATA,
            offset: CANONICAL_HEADER_SIZE - CHUNK_HEADER_SIZE,
            size: data_len as u32,
        },
    ]
}

impl WaveFile {
    /// Builds a canonical wave file holding `samples`, which must be
    /// interleaved when there is more than one channel. The format code,
    /// block align and byte rate are derived from the samples' bit depth.
    pub fn from_scratch(num_channels: u16, sample_rate: u32, samples: Samples) -> WriteResult<WaveFile> {
        if num_channels == 0 {
            return Err(WriteErrorKind::NumChannelsIsZero.into());
        } else if sample_rate == 0 {
            return Err(WriteErrorKind::SampleRateIsZero.into());
        }

        let bit_depth = samples.bit_depth();
        let block_align = num_channels
            .checked_mul(bit_depth.bytes_per_sample() as u16)
            .ok_or(WriteErrorKind::TooManyChannels(num_channels))?;
        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or(WriteErrorKind::ByteRateOverflow)?;

        let data_len = samples.encoded_len();
        let riff_chunk_size = canonical_riff_size(data_len).ok_or(WriteErrorKind::DataTooLarge(data_len))?;

        Ok(WaveFile {
            riff_tag: ChunkTag::RIFF,
            riff_chunk_size,
            wave_tag: ChunkTag::WAVE,
            format: FormatChunk {
                chunk_size: FMT_CHUNK_SIZE,
                audio_format: bit_depth.audio_format(),
                num_channels,
                sample_rate,
                byte_rate,
                block_align,
                bits_per_sample: bit_depth.bits_per_sample(),
                bit_depth,
            },
            data_tag: ChunkTag::DATA,
            data_chunk_size: data_len as i32,
            samples,
            chunks: canonical_chunks(data_len),
        })
    }

    // MARK: Writing

    /// Writes the file in the canonical layout: the RIFF header, a 16 byte
    /// "fmt " chunk and the "data" chunk. Other chunks aren't written. The
    /// RIFF and "data" sizes are computed from the samples, so a file parsed
    /// with an inconsistent size is written out consistently.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> WriteResult<()> {
        let data = codec::encode(&self.samples);
        let riff_chunk_size = canonical_riff_size(data.len()).ok_or(WriteErrorKind::DataTooLarge(data.len()))?;

        writer.write_all(&self.canonical_header(riff_chunk_size as u32, data.len() as u32))?;
        writer.write_all(&data)?;
        if pad_len(data.len()) != 0 {
            writer.write_u8(0)?;
        }

        debug!(riff_chunk_size, data_len = data.len(), bit_depth = %self.format.bit_depth, "wrote wave file");
        Ok(())
    }

    /// Encodes the file to a new buffer, in the same layout as
    /// [`write_to`](WaveFile::write_to).
    pub fn to_bytes(&self) -> WriteResult<Vec<u8>> {
        let data_len = self.samples.encoded_len();
        let mut bytes = Vec::with_capacity(CANONICAL_HEADER_SIZE + data_len + pad_len(data_len));
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    fn canonical_header(&self, riff_chunk_size: u32, data_len: u32) -> [u8; CANONICAL_HEADER_SIZE] {
        let format = &self.format;
        let mut header = [0u8; CANONICAL_HEADER_SIZE];

        header[0..4].copy_from_slice(self.riff_tag.as_bytes());
        LittleEndian::write_u32(&mut header[4..8], riff_chunk_size);
        header[8..12].copy_from_slice(self.wave_tag.as_bytes());

        header[12..16].copy_from_slice(ChunkTag::FMT.as_bytes());
        LittleEndian::write_u32(&mut header[16..20], FMT_CHUNK_SIZE);
        LittleEndian::write_i16(&mut header[20..22], format.audio_format);
        LittleEndian::write_u16(&mut header[22..24], format.num_channels);
        LittleEndian::write_u32(&mut header[24..28], format.sample_rate);
        LittleEndian::write_u32(&mut header[28..32], format.byte_rate);
        LittleEndian::write_u16(&mut header[32..34], format.block_align);
        LittleEndian::write_u16(&mut header[34..36], format.bits_per_sample);

        header[36..40].copy_from_slice(self.data_tag.as_bytes());
        LittleEndian::write_u32(&mut header[40..44], data_len);
        header
    }
}

// MARK: Tests
