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

//! Decoding and encoding of RIFF/WAVE audio held in memory.
//!
//! A [`WaveFile`] is parsed from a complete byte buffer: the header fields
//! are read and the contents of the "data" chunk are decoded into
//! [`Samples`]. Seven sample encodings are supported: 4, 8, 16, 24 and 32-bit
//! integer PCM, 32-bit IEEE float and 64-bit float. The inverse direction
//! builds a canonical wave file from samples and serializes it back to bytes.
//!
//! Reading and writing files is left to the caller; this crate only deals
//! with byte buffers.
//!
//! ```
//! use riff_wavefile::{deinterleave, Samples, WaveFile};
//!
//! let samples = Samples::Int16(vec![0, 100, -100, 200]);
//! let wave = WaveFile::from_scratch(2, 44_100, samples).unwrap();
//! let bytes = wave.to_bytes().unwrap();
//!
//! let parsed = WaveFile::from_bytes(&bytes).unwrap();
//! assert_eq!(4, parsed.format().block_align);
//! assert_eq!(vec![vec![0.0, -100.0], vec![100.0, 200.0]],
//!            deinterleave(&parsed.samples().to_f64_vec(), 2));
//! ```
//!
//! # The wave file format
//!
//! A wave file is a RIFF container. It starts with the RIFF header, followed
//! by a number of chunks, each made of a four character tag, a 32-bit
//! little-endian size, and the chunk content:
//!
//! Offset | Size | Data       | Description
//! -----: | ---: | ---------- | ----------------------------------------------
//!      0 |    4 | "RIFF"     | Marks the file as a RIFF file.
//!      4 |    4 | chunk size | The size of the rest of the file.
//!      8 |    4 | "WAVE"     | Marks the RIFF file as a wave file.
//!
//! ## The "fmt " chunk
//!
//! Offsets are relative to the start of the chunk:
//!
//! Offset | Size | Data            | Description
//! -----: | ---: | --------------- | -----------------------------------------
//!      0 |    4 | "fmt "          | Identifies this chunk.
//!      4 |    4 | chunk size      | 16 for the canonical format.
//!      8 |    2 | format          | 1 for integer PCM, 3 for IEEE float.
//!     10 |    2 | num channels    | 1 for mono, 2 for stereo, and so on.
//!     12 |    4 | sample rate     | Frames per second.
//!     16 |    4 | byte rate       | sample rate * block align.
//!     20 |    2 | block align     | Bytes per frame, one sample for each channel.
//!     22 |    2 | bits per sample | 4, 8, 16, 24, 32 or 64.
//!
//! The format code only matters for 32-bit samples, which are IEEE floats
//! when the format is 3 and signed integers otherwise. 64-bit samples are
//! always floats.
//!
//! ## The "data" chunk
//!
//! Offset | Size | Data         | Description
//! -----: | ---: | ------------ | -------------------------------------------
//!      0 |    4 | "data"       | Identifies this chunk.
//!      4 |    4 | chunk size   | The size of the sample data.
//!      8 |  ... | sample data  | Samples, interleaved by channel.
//!
//! Other chunks ("bext", "cue ", "LIST", ...) may appear anywhere after the
//! RIFF header. They are listed by [`WaveFile::chunks`] but not interpreted.
//!
//! # Locating chunks
//!
//! The "WAVE", "fmt " and "data" tags are each found by scanning the whole
//! buffer for their first occurrence, so chunks can appear in any order and
//! with arbitrary chunks between them. The downside is that the same four
//! bytes inside an earlier chunk's content will be mistaken for the tag.
//! See [`chunk::locate`].
//!
//! # Sizes
//!
//! The RIFF and "data" chunk sizes are read as signed 32-bit integers. Files
//! with chunks of 2 GiB or more therefore report negative sizes, and a
//! negative "data" size decodes to no samples.

use std::error;
use std::fmt;
use std::result;

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, warn};

// This is a helper macro that helps us validate results in our tests.
// Thank you bluss and durka42!
#[cfg(test)]
macro_rules! assert_matches {
    ($expected:pat $(if $guard:expr)*, $value:expr) => {
        match $value {
            $expected $(if $guard)* => {},
            ref actual => {
                panic!("assertion failed: `(left matches right)` (left: `{}`, right: `{:?}`",
                    stringify!($expected), actual);
            },
        }
    };
}

pub mod chunk;
pub mod codec;
pub mod interleave;
pub mod writer;

pub use chunk::{ChunkInfo, ChunkTag};
pub use codec::{BitDepth, ParseBitDepthError, Samples};
pub use interleave::{deinterleave, deinterleave_into, interleave, ChannelLayout};
pub use writer::{WriteError, WriteErrorKind, WriteResult};

// MARK: Error types

/// Represents an error that occurred while parsing a wave file. Every error
/// aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The buffer doesn't start with a "RIFF" tag.
    UnsupportedFormat,
    /// There is no "WAVE" tag in the buffer.
    MissingWaveChunk,
    /// There is no "fmt " tag in the buffer.
    MissingFmtChunk,
    /// There is no "data" tag in the buffer.
    MissingDataChunk,
    /// The buffer ends before the "fmt " chunk fields. Holds the number of
    /// bytes available after the tag.
    FmtChunkTooShort(usize),
    /// The format and bits per sample don't select a supported encoding.
    UnsupportedBitDepth { audio_format: i16, bits_per_sample: u16 },
    /// The buffer ends before the "data" chunk size. Holds the number of
    /// bytes available after the tag.
    DataChunkTooShort(usize),
    /// The "data" chunk size doesn't describe whole frames within the
    /// buffer. Only reported with [`ReadOptions::strict_data_length`].
    MalformedDataLength {
        declared: i32,
        available: usize,
        bytes_per_sample: usize,
    },
}

/// Represents a result when parsing a wave file.
pub type ReadResult<T> = result::Result<T, ReadError>;

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ReadError::UnsupportedFormat => write!(f, "Not a supported format"),
            ReadError::MissingWaveChunk => write!(f, "Could not find the 'WAVE' chunk"),
            ReadError::MissingFmtChunk => write!(f, "Could not find the 'fmt ' chunk"),
            ReadError::MissingDataChunk => write!(f, "Could not find the 'data' chunk"),
            ReadError::FmtChunkTooShort(available) => {
                write!(f, "fmt_ chunk is too short: {} of 20 bytes", available)
            }
            ReadError::UnsupportedBitDepth { audio_format, bits_per_sample } => {
                write!(f, "Unsupported bits per sample: {} (format {})", bits_per_sample, audio_format)
            }
            ReadError::DataChunkTooShort(available) => {
                write!(f, "data chunk is too short: {} of 4 size bytes", available)
            }
            ReadError::MalformedDataLength { declared, available, bytes_per_sample } => write!(
                f,
                "Malformed data chunk length: {} bytes declared, {} available, {} bytes per sample",
                declared, available, bytes_per_sample
            ),
        }
    }
}

impl error::Error for ReadError {}

// MARK: Options

/// Controls how strictly the "data" chunk size is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// When false (the default), a size past the end of the buffer is
    /// clamped, a negative size reads no samples, and trailing bytes that
    /// don't make up a whole sample are ignored. When true, each of these
    /// is a [`ReadError::MalformedDataLength`], as is a sample count that
    /// isn't a multiple of the channel count.
    pub strict_data_length: bool,
}

impl ReadOptions {
    pub fn strict() -> ReadOptions {
        ReadOptions { strict_data_length: true }
    }
}

// MARK: Header types

/// The fields of the "fmt " chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChunk {
    pub chunk_size: u32,
    pub audio_format: i16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// The sample encoding selected by `audio_format` and `bits_per_sample`.
    pub bit_depth: BitDepth,
}

// Bytes following the "fmt " tag that hold the fields we read.
const FMT_FIELDS_SIZE: usize = 20;

/// A parsed wave file: the header fields and the decoded samples.
///
/// The header can't be modified after parsing. A new file is assembled with
/// [`WaveFile::from_scratch`].
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFile {
    riff_tag: ChunkTag,
    riff_chunk_size: i32,
    wave_tag: ChunkTag,
    format: FormatChunk,
    data_tag: ChunkTag,
    data_chunk_size: i32,
    samples: Samples,
    chunks: Vec<ChunkInfo>,
}

impl WaveFile {
    /// Parses a wave file with the default, lenient [`ReadOptions`].
    pub fn from_bytes(bytes: &[u8]) -> ReadResult<WaveFile> {
        WaveFile::from_bytes_with_options(bytes, ReadOptions::default())
    }

    /// Parses a wave file. The RIFF header, "WAVE" tag, "fmt " chunk and
    /// "data" chunk are read in that order and the first failure is returned.
    pub fn from_bytes_with_options(bytes: &[u8], options: ReadOptions) -> ReadResult<WaveFile> {
        let riff_chunk_size = read_riff_header(bytes)?;
        let wave_tag = read_wave_tag(bytes)?;
        let format = read_fmt_chunk(bytes)?;
        let (data_chunk_size, samples) = read_data_chunk(bytes, &format, options)?;

        debug!(
            riff_chunk_size,
            num_channels = format.num_channels,
            sample_rate = format.sample_rate,
            bit_depth = %format.bit_depth,
            data_chunk_size,
            num_samples = samples.len(),
            "parsed wave file"
        );

        Ok(WaveFile {
            riff_tag: ChunkTag::RIFF,
            riff_chunk_size,
            wave_tag,
            format,
            data_tag: ChunkTag::DATA,
            data_chunk_size,
            samples,
            chunks: chunk::list_chunks(bytes),
        })
    }

    pub fn riff_tag(&self) -> ChunkTag {
        self.riff_tag
    }

    /// The RIFF chunk size, as declared in the file.
    pub fn riff_chunk_size(&self) -> i32 {
        self.riff_chunk_size
    }

    pub fn wave_tag(&self) -> ChunkTag {
        self.wave_tag
    }

    pub fn format(&self) -> &FormatChunk {
        &self.format
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.format.bit_depth
    }

    pub fn data_tag(&self) -> ChunkTag {
        self.data_tag
    }

    /// The "data" chunk size, as declared in the file.
    pub fn data_chunk_size(&self) -> i32 {
        self.data_chunk_size
    }

    /// The decoded samples, interleaved by channel.
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// The top-level chunks following the RIFF header, in file order.
    pub fn chunks(&self) -> &[ChunkInfo] {
        &self.chunks
    }

    /// The samples as `f64`, one vector per channel.
    pub fn deinterleaved_f64(&self) -> Vec<Vec<f64>> {
        deinterleave(&self.samples.to_f64_vec(), self.format.num_channels as usize)
    }
}

// MARK: Parsing functions

fn read_riff_header(bytes: &[u8]) -> ReadResult<i32> {
    if ChunkTag::from_slice(bytes) != Some(ChunkTag::RIFF) {
        return Err(ReadError::UnsupportedFormat);
    }
    // A RIFF tag with no room for the size can't hold a "WAVE" tag either.
    match bytes.get(4..8) {
        Some(size) => Ok(LittleEndian::read_i32(size)),
        None => Err(ReadError::MissingWaveChunk),
    }
}

fn read_wave_tag(bytes: &[u8]) -> ReadResult<ChunkTag> {
    chunk::locate(bytes, ChunkTag::WAVE)
        .and_then(|start| ChunkTag::from_slice(&bytes[start..]))
        .ok_or(ReadError::MissingWaveChunk)
}

fn read_fmt_chunk(bytes: &[u8]) -> ReadResult<FormatChunk> {
    let start = chunk::locate(bytes, ChunkTag::FMT).ok_or(ReadError::MissingFmtChunk)?;
    let after_tag = &bytes[start + 4..];
    let fields = after_tag
        .get(..FMT_FIELDS_SIZE)
        .ok_or(ReadError::FmtChunkTooShort(after_tag.len()))?;

    let audio_format = LittleEndian::read_i16(&fields[4..6]);
    let bits_per_sample = LittleEndian::read_u16(&fields[18..20]);
    let bit_depth = BitDepth::from_format(audio_format, bits_per_sample)
        .ok_or(ReadError::UnsupportedBitDepth { audio_format, bits_per_sample })?;

    Ok(FormatChunk {
        chunk_size: LittleEndian::read_u32(&fields[0..4]),
        audio_format,
        num_channels: LittleEndian::read_u16(&fields[6..8]),
        sample_rate: LittleEndian::read_u32(&fields[8..12]),
        byte_rate: LittleEndian::read_u32(&fields[12..16]),
        block_align: LittleEndian::read_u16(&fields[16..18]),
        bits_per_sample,
        bit_depth,
    })
}

fn read_data_chunk(bytes: &[u8],
                   format: &FormatChunk,
                   options: ReadOptions)
                   -> ReadResult<(i32, Samples)> {
    let start = chunk::locate(bytes, ChunkTag::DATA).ok_or(ReadError::MissingDataChunk)?;
    let after_tag = &bytes[start + 4..];
    let size_field = after_tag.get(..4).ok_or(ReadError::DataChunkTooShort(after_tag.len()))?;
    let declared = LittleEndian::read_i32(size_field);

    let payload = &after_tag[4..];
    let len = validate_data_length(declared, payload.len(), format, options)?;
    Ok((declared, codec::decode(&payload[..len], format.bit_depth)))
}

/// Works out how many payload bytes to decode for a declared "data" size.
fn validate_data_length(declared: i32,
                        available: usize,
                        format: &FormatChunk,
                        options: ReadOptions)
                        -> ReadResult<usize> {
    let bytes_per_sample = format.bit_depth.bytes_per_sample();
    let malformed = ReadError::MalformedDataLength { declared, available, bytes_per_sample };

    let len = if declared < 0 {
        if options.strict_data_length {
            return Err(malformed);
        }
        warn!(declared, "negative data chunk size, reading no samples");
        0
    } else if declared as usize > available {
        if options.strict_data_length {
            return Err(malformed);
        }
        warn!(declared, available, "data chunk size runs past the end of the buffer");
        available
    } else {
        declared as usize
    };

    let remainder = len % bytes_per_sample;
    let num_samples = len / bytes_per_sample;
    let num_channels = format.num_channels as usize;
    if options.strict_data_length {
        if remainder != 0 || (num_channels != 0 && num_samples % num_channels != 0) {
            return Err(malformed);
        }
    } else if remainder != 0 {
        warn!(remainder, bytes_per_sample, "ignoring trailing bytes in data chunk");
    }

    Ok(len)
}

// MARK: Tests

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{read_data_chunk, read_fmt_chunk, read_riff_header, read_wave_tag, validate_data_length};
    use super::{BitDepth, ChunkTag, FormatChunk, ReadError, ReadOptions, Samples, WaveFile};

    fn format(bit_depth: BitDepth, num_channels: u16) -> FormatChunk {
        let width = bit_depth.bytes_per_sample() as u16;
        FormatChunk {
            chunk_size: 16,
            audio_format: bit_depth.audio_format(),
            num_channels,
            sample_rate: 8000,
            byte_rate: 8000 * (width * num_channels) as u32,
            block_align: width * num_channels,
            bits_per_sample: bit_depth.bits_per_sample(),
            bit_depth,
        }
    }

    // A canonical 16-bit mono header at 16000 Hz followed by `data`.
    fn canonical_16_bit(data_size: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut bytes = b"RIFF\x00\x00\x00\x00WAVE".to_vec();
        bytes.extend_from_slice(b"fmt \x10\x00\x00\x00\x01\x00\x01\x00\x80\x3E\x00\x00");
        bytes.extend_from_slice(b"\x00\x7D\x00\x00\x02\x00\x10\x00");
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(data_size);
        bytes.extend_from_slice(data);
        bytes
    }

    // RIFF header tests

    #[test]
    fn test_read_riff_header_ok() {
        assert_eq!(Ok(36), read_riff_header(b"RIFF\x24\x00\x00\x00WAVE"));
    }

    #[test]
    fn test_read_riff_header_size_is_signed() {
        assert_eq!(Ok(-2), read_riff_header(b"RIFF\xfe\xff\xff\xff"));
    }

    #[test]
    fn test_read_riff_header_err_incomplete() {
        assert_matches!(Err(ReadError::UnsupportedFormat), read_riff_header(b"RIF     "));
        assert_matches!(Err(ReadError::UnsupportedFormat), read_riff_header(b"RIF"));
        assert_matches!(Err(ReadError::UnsupportedFormat), read_riff_header(b""));
    }

    #[test]
    fn test_read_riff_header_err_no_room_for_size() {
        assert_matches!(Err(ReadError::MissingWaveChunk), read_riff_header(b"RIFF\x00"));
        assert_matches!(Err(ReadError::MissingWaveChunk), read_riff_header(b"RIFF"));
    }

    #[test]
    fn test_from_bytes_short_riff_buffer_has_no_wave_chunk() {
        assert_eq!(Err(ReadError::MissingWaveChunk), WaveFile::from_bytes(b"RIFF"));
        assert_eq!(Err(ReadError::MissingWaveChunk), WaveFile::from_bytes(b"RIFF\x10\x00\x00"));
    }

    #[test]
    fn test_read_riff_header_err_something_else() {
        assert_matches!(Err(ReadError::UnsupportedFormat), read_riff_header(b"JPEG     "));
        assert_matches!(Err(ReadError::UnsupportedFormat), read_riff_header(b"riff    "));
    }

    // Wave tag tests

    #[test]
    fn test_read_wave_tag_ok() {
        assert_eq!(Ok(ChunkTag::WAVE), read_wave_tag(b"RIFF    WAVE"));
    }

    #[test]
    fn test_read_wave_tag_anywhere() {
        assert_eq!(Ok(ChunkTag::WAVE), read_wave_tag(b"RIFF    junkWAVE"));
    }

    #[test]
    fn test_read_wave_tag_err_missing() {
        assert_matches!(Err(ReadError::MissingWaveChunk), read_wave_tag(b"RIFF    WAV "));
    }

    // fmt chunk tests

    #[test]
    fn test_read_fmt_chunk_pcm() {
        let bytes = canonical_16_bit(b"\x00\x00\x00\x00", b"");
        assert_eq!(
            Ok(FormatChunk {
                chunk_size: 16,
                audio_format: 1,
                num_channels: 1,
                sample_rate: 16000,
                byte_rate: 32000,
                block_align: 2,
                bits_per_sample: 16,
                bit_depth: BitDepth::Int16,
            }),
            read_fmt_chunk(&bytes)
        );
    }

    #[test]
    fn test_read_fmt_chunk_float() {
        let bytes = b"fmt \x10\x00\x00\x00\x03\x00\x02\x00\x44\xAC\x00\x00\x20\x62\x05\x00\x08\x00\x20\x00";
        let format = read_fmt_chunk(bytes).unwrap();
        assert_eq!(3, format.audio_format);
        assert_eq!(2, format.num_channels);
        assert_eq!(44100, format.sample_rate);
        assert_eq!(352_800, format.byte_rate);
        assert_eq!(8, format.block_align);
        assert_eq!(BitDepth::Float32, format.bit_depth);
    }

    #[test]
    fn test_read_fmt_chunk_err_missing() {
        assert_matches!(Err(ReadError::MissingFmtChunk), read_fmt_chunk(b"RIFF    WAVEdata"));
    }

    #[test]
    fn test_read_fmt_chunk_err_too_short() {
        assert_matches!(Err(ReadError::FmtChunkTooShort(4)), read_fmt_chunk(b"RIFF    WAVEfmt \x10\x00\x00\x00"));
        assert_matches!(Err(ReadError::FmtChunkTooShort(0)), read_fmt_chunk(b"fmt "));
    }

    #[test]
    fn test_read_fmt_chunk_err_unsupported_bits_per_sample() {
        let bytes = b"fmt \x10\x00\x00\x00\x01\x00\x01\x00\x44\xAC\x00\x00\x00\x00\x00\x00\x02\x00\x0C\x00";
        assert_matches!(
            Err(ReadError::UnsupportedBitDepth { audio_format: 1, bits_per_sample: 12 }),
            read_fmt_chunk(bytes)
        );
    }

    // data chunk tests

    #[test]
    fn test_read_data_chunk() {
        let bytes = canonical_16_bit(b"\x04\x00\x00\x00", b"\x01\x00\xff\xff");
        assert_eq!(
            Ok((4, Samples::Int16(vec![1, -1]))),
            read_data_chunk(&bytes, &format(BitDepth::Int16, 1), ReadOptions::default())
        );
    }

    #[test]
    fn test_read_data_chunk_ignores_trailing_chunks() {
        let mut bytes = canonical_16_bit(b"\x02\x00\x00\x00", b"\x05\x00");
        bytes.extend_from_slice(b"LIST\x04\x00\x00\x00INFO");
        assert_eq!(
            Ok((2, Samples::Int16(vec![5]))),
            read_data_chunk(&bytes, &format(BitDepth::Int16, 1), ReadOptions::default())
        );
    }

    #[test]
    fn test_read_data_chunk_err_missing() {
        assert_matches!(
            Err(ReadError::MissingDataChunk),
            read_data_chunk(b"RIFF    WAVEfmt ", &format(BitDepth::Int16, 1), ReadOptions::default())
        );
    }

    #[test]
    fn test_read_data_chunk_err_no_size() {
        assert_matches!(
            Err(ReadError::DataChunkTooShort(2)),
            read_data_chunk(b"data\x01\x00", &format(BitDepth::Int16, 1), ReadOptions::default())
        );
    }

    // Data length tests

    #[test]
    fn test_data_length_exact() {
        let format = format(BitDepth::Int24, 1);
        assert_eq!(Ok(300), validate_data_length(300, 300, &format, ReadOptions::default()));
        assert_eq!(Ok(300), validate_data_length(300, 310, &format, ReadOptions::strict()));
    }

    #[test]
    fn test_data_length_lenient_clamps_to_buffer() {
        let format = format(BitDepth::Int16, 1);
        assert_eq!(Ok(10), validate_data_length(1000, 10, &format, ReadOptions::default()));
    }

    #[test]
    fn test_data_length_lenient_negative_is_empty() {
        let format = format(BitDepth::Int16, 1);
        assert_eq!(Ok(0), validate_data_length(-4, 10, &format, ReadOptions::default()));
    }

    #[test]
    fn test_data_length_lenient_keeps_partial_sample_bytes() {
        // The codec drops the partial sample.
        let format = format(BitDepth::Int32, 2);
        assert_eq!(Ok(7), validate_data_length(7, 7, &format, ReadOptions::default()));
    }

    #[test]
    fn test_data_length_strict_rejects() {
        let strict = ReadOptions::strict();
        let mono = format(BitDepth::Int16, 1);
        let stereo = format(BitDepth::Int16, 2);
        assert_matches!(
            Err(ReadError::MalformedDataLength { declared: 1000, available: 10, bytes_per_sample: 2 }),
            validate_data_length(1000, 10, &mono, strict)
        );
        assert_matches!(Err(ReadError::MalformedDataLength { declared: -4, .. }),
                        validate_data_length(-4, 10, &mono, strict));
        assert_matches!(Err(ReadError::MalformedDataLength { declared: 5, .. }),
                        validate_data_length(5, 10, &mono, strict));
        // Three 16-bit samples can't be split over two channels.
        assert_matches!(Err(ReadError::MalformedDataLength { declared: 6, .. }),
                        validate_data_length(6, 10, &stereo, strict));
        assert_eq!(Ok(8), validate_data_length(8, 10, &stereo, strict));
    }

    // Whole file tests

    #[test]
    fn test_from_bytes_canonical() {
        let bytes = canonical_16_bit(b"\x04\x00\x00\x00", b"\x00\x80\xff\x7f");
        let wave = WaveFile::from_bytes(&bytes).unwrap();
        assert_eq!(ChunkTag::RIFF, wave.riff_tag());
        assert_eq!(0, wave.riff_chunk_size());
        assert_eq!(ChunkTag::WAVE, wave.wave_tag());
        assert_eq!(ChunkTag::DATA, wave.data_tag());
        assert_eq!(4, wave.data_chunk_size());
        assert_eq!(BitDepth::Int16, wave.bit_depth());
        assert_eq!(&Samples::Int16(vec![i16::MIN, i16::MAX]), wave.samples());
        assert_eq!(vec![ChunkTag::FMT, ChunkTag::DATA],
                   wave.chunks().iter().map(|c| c.tag).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_bytes_stops_at_first_failure() {
        // Both "fmt " and "data" are missing; "fmt " is reported.
        assert_matches!(Err(ReadError::MissingFmtChunk), WaveFile::from_bytes(b"RIFF    WAVE"));
        // Not RIFF at all, although everything else is present.
        let mut bytes = canonical_16_bit(b"\x00\x00\x00\x00", b"");
        bytes[0] = b'r';
        assert_matches!(Err(ReadError::UnsupportedFormat), WaveFile::from_bytes(&bytes));
    }

    #[test]
    fn test_from_bytes_with_strict_options() {
        let bytes = canonical_16_bit(b"\x08\x00\x00\x00", b"\x01\x00");
        assert_matches!(Err(ReadError::MalformedDataLength { declared: 8, available: 2, .. }),
                        WaveFile::from_bytes_with_options(&bytes, ReadOptions::strict()));
        assert_eq!(1, WaveFile::from_bytes(&bytes).unwrap().samples().len());
    }

    #[test]
    fn test_deinterleaved_f64() {
        let mut bytes = canonical_16_bit(b"\x08\x00\x00\x00", b"\x01\x00\x02\x00\x03\x00\x04\x00");
        // Two channels.
        bytes[22] = 2;
        let wave = WaveFile::from_bytes(&bytes).unwrap();
        assert_eq!(vec![vec![1.0, 3.0], vec![2.0, 4.0]], wave.deinterleaved_f64());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!("Not a supported format", ReadError::UnsupportedFormat.to_string());
        assert_eq!("Could not find the 'data' chunk", ReadError::MissingDataChunk.to_string());
    }
}
