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

//! Conversion between raw sample bytes and typed samples.
//!
//! Tag   | Bytes | Interpretation
//! ----- | ----: | -------------------------------------------------
//! "4"   |     1 | signed integer, one full byte per sample
//! "8"   |     1 | unsigned integer
//! "16"  |     2 | signed integer, little-endian
//! "24"  |     3 | signed integer, little-endian, sign-extended to 32 bits
//! "32"  |     4 | signed integer, little-endian
//! "32f" |     4 | IEEE-754 single precision, little-endian
//! "64"  |     8 | IEEE-754 double precision, little-endian

use std::error;
use std::fmt;
use std::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};

/// Format code for integer PCM data.
pub const FORMAT_PCM: i16 = 1;
/// Format code for IEEE floating-point data.
pub const FORMAT_IEEE_FLOAT: i16 = 3;

// MARK: Bit depths

/// The supported sample encodings, one per bit depth tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// "4": signed, stored as a full byte.
    Int4,
    /// "8": unsigned.
    Uint8,
    /// "16"
    Int16,
    /// "24"
    Int24,
    /// "32"
    Int32,
    /// "32f"
    Float32,
    /// "64"
    Float64,
}

impl BitDepth {
    /// Selects the encoding from the "fmt " chunk fields. 32-bit samples are
    /// floats when the format is IEEE float; every other bit depth is chosen
    /// by `bits_per_sample` alone. Returns `None` for unsupported bit depths.
    pub fn from_format(audio_format: i16, bits_per_sample: u16) -> Option<BitDepth> {
        if audio_format == FORMAT_IEEE_FLOAT && bits_per_sample == 32 {
            return Some(BitDepth::Float32);
        }
        match bits_per_sample {
            4 => Some(BitDepth::Int4),
            8 => Some(BitDepth::Uint8),
            16 => Some(BitDepth::Int16),
            24 => Some(BitDepth::Int24),
            32 => Some(BitDepth::Int32),
            64 => Some(BitDepth::Float64),
            _ => None,
        }
    }

    /// How many bytes each sample occupies in the data chunk.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            BitDepth::Int4 | BitDepth::Uint8 => 1,
            BitDepth::Int16 => 2,
            BitDepth::Int24 => 3,
            BitDepth::Int32 | BitDepth::Float32 => 4,
            BitDepth::Float64 => 8,
        }
    }

    pub fn bits_per_sample(self) -> u16 {
        match self {
            BitDepth::Int4 => 4,
            BitDepth::Uint8 => 8,
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Int32 | BitDepth::Float32 => 32,
            BitDepth::Float64 => 64,
        }
    }

    /// The format code written for this encoding in a new file.
    pub fn audio_format(self) -> i16 {
        match self {
            BitDepth::Float32 | BitDepth::Float64 => FORMAT_IEEE_FLOAT,
            _ => FORMAT_PCM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BitDepth::Int4 => "4",
            BitDepth::Uint8 => "8",
            BitDepth::Int16 => "16",
            BitDepth::Int24 => "24",
            BitDepth::Int32 => "32",
            BitDepth::Float32 => "32f",
            BitDepth::Float64 => "64",
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a bit depth tag that isn't one of the seven
/// supported tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitDepthError(pub String);

impl fmt::Display for ParseBitDepthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unsupported bit depth tag: {:?}", self.0)
    }
}

impl error::Error for ParseBitDepthError {}

impl FromStr for BitDepth {
    type Err = ParseBitDepthError;

    fn from_str(s: &str) -> Result<BitDepth, ParseBitDepthError> {
        match s {
            "4" => Ok(BitDepth::Int4),
            "8" => Ok(BitDepth::Uint8),
            "16" => Ok(BitDepth::Int16),
            "24" => Ok(BitDepth::Int24),
            "32" => Ok(BitDepth::Int32),
            "32f" => Ok(BitDepth::Float32),
            "64" => Ok(BitDepth::Float64),
            _ => Err(ParseBitDepthError(s.to_owned())),
        }
    }
}

// MARK: Samples

/// Decoded samples, one variant per bit depth. Multi-channel data is
/// interleaved.
///
/// 24-bit samples are held in an `i32`; only the low 24 bits are written
/// back out.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Int4(Vec<i8>),
    Uint8(Vec<u8>),
    Int16(Vec<i16>),
    Int24(Vec<i32>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl Samples {
    /// An empty buffer of the given bit depth.
    pub fn empty(bit_depth: BitDepth) -> Samples {
        match bit_depth {
            BitDepth::Int4 => Samples::Int4(Vec::new()),
            BitDepth::Uint8 => Samples::Uint8(Vec::new()),
            BitDepth::Int16 => Samples::Int16(Vec::new()),
            BitDepth::Int24 => Samples::Int24(Vec::new()),
            BitDepth::Int32 => Samples::Int32(Vec::new()),
            BitDepth::Float32 => Samples::Float32(Vec::new()),
            BitDepth::Float64 => Samples::Float64(Vec::new()),
        }
    }

    /// Converts plain numbers into samples of the given bit depth.
    ///
    /// Values are not clamped. Integer depths truncate toward zero and then
    /// wrap to the target width with two's-complement semantics, exactly as
    /// the encoded bytes would; 24-bit values wrap at 24 bits.
    pub fn from_f64(values: &[f64], bit_depth: BitDepth) -> Samples {
        let ints = || values.iter().map(|&v| v as i64);
        match bit_depth {
            BitDepth::Int4 => Samples::Int4(ints().map(|v| v as i8).collect()),
            BitDepth::Uint8 => Samples::Uint8(ints().map(|v| v as u8).collect()),
            BitDepth::Int16 => Samples::Int16(ints().map(|v| v as i16).collect()),
            BitDepth::Int24 => Samples::Int24(ints().map(|v| ((v << 40) >> 40) as i32).collect()),
            BitDepth::Int32 => Samples::Int32(ints().map(|v| v as i32).collect()),
            BitDepth::Float32 => Samples::Float32(values.iter().map(|&v| v as f32).collect()),
            BitDepth::Float64 => Samples::Float64(values.to_vec()),
        }
    }

    pub fn bit_depth(&self) -> BitDepth {
        match *self {
            Samples::Int4(_) => BitDepth::Int4,
            Samples::Uint8(_) => BitDepth::Uint8,
            Samples::Int16(_) => BitDepth::Int16,
            Samples::Int24(_) => BitDepth::Int24,
            Samples::Int32(_) => BitDepth::Int32,
            Samples::Float32(_) => BitDepth::Float32,
            Samples::Float64(_) => BitDepth::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match *self {
            Samples::Int4(ref v) => v.len(),
            Samples::Uint8(ref v) => v.len(),
            Samples::Int16(ref v) => v.len(),
            Samples::Int24(ref v) | Samples::Int32(ref v) => v.len(),
            Samples::Float32(ref v) => v.len(),
            Samples::Float64(ref v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of bytes these samples occupy once encoded.
    pub fn encoded_len(&self) -> usize {
        self.len() * self.bit_depth().bytes_per_sample()
    }

    /// Widens every sample to an `f64`, keeping its numeric value.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match *self {
            Samples::Int4(ref v) => v.iter().map(|&s| f64::from(s)).collect(),
            Samples::Uint8(ref v) => v.iter().map(|&s| f64::from(s)).collect(),
            Samples::Int16(ref v) => v.iter().map(|&s| f64::from(s)).collect(),
            Samples::Int24(ref v) | Samples::Int32(ref v) => v.iter().map(|&s| f64::from(s)).collect(),
            Samples::Float32(ref v) => v.iter().map(|&s| f64::from(s)).collect(),
            Samples::Float64(ref v) => v.clone(),
        }
    }
}

// MARK: Decoding and encoding

/// Decodes `bytes` as a sequence of samples of the given bit depth. Trailing
/// bytes that don't form a whole sample are ignored.
pub fn decode(bytes: &[u8], bit_depth: BitDepth) -> Samples {
    let frames = bytes.chunks_exact(bit_depth.bytes_per_sample());
    match bit_depth {
        BitDepth::Int4 => Samples::Int4(bytes.iter().map(|&b| b as i8).collect()),
        BitDepth::Uint8 => Samples::Uint8(bytes.to_vec()),
        BitDepth::Int16 => Samples::Int16(frames.map(LittleEndian::read_i16).collect()),
        BitDepth::Int24 => Samples::Int24(frames.map(LittleEndian::read_i24).collect()),
        BitDepth::Int32 => Samples::Int32(frames.map(LittleEndian::read_i32).collect()),
        BitDepth::Float32 => Samples::Float32(frames.map(LittleEndian::read_f32).collect()),
        BitDepth::Float64 => Samples::Float64(frames.map(LittleEndian::read_f64).collect()),
    }
}

/// Decodes `bytes` using a bit depth tag such as `"16"` or `"32f"`.
pub fn decode_tagged(bytes: &[u8], tag: &str) -> Result<Samples, ParseBitDepthError> {
    Ok(decode(bytes, tag.parse()?))
}

/// Encodes samples to little-endian bytes at their own bit depth. This is the
/// exact inverse of [`decode`]. 24-bit samples keep only their low 24 bits.
pub fn encode(samples: &Samples) -> Vec<u8> {
    let width = samples.bit_depth().bytes_per_sample();
    let mut bytes = vec![0u8; samples.encoded_len()];
    {
        let frames = bytes.chunks_exact_mut(width);
        match *samples {
            Samples::Int4(ref v) => frames.zip(v).for_each(|(out, &s)| out[0] = s as u8),
            Samples::Uint8(ref v) => frames.zip(v).for_each(|(out, &s)| out[0] = s),
            Samples::Int16(ref v) => frames.zip(v).for_each(|(out, &s)| LittleEndian::write_i16(out, s)),
            Samples::Int24(ref v) => frames.zip(v).for_each(|(out, &s)| LittleEndian::write_i24(out, s)),
            Samples::Int32(ref v) => frames.zip(v).for_each(|(out, &s)| LittleEndian::write_i32(out, s)),
            Samples::Float32(ref v) => frames.zip(v).for_each(|(out, &s)| LittleEndian::write_f32(out, s)),
            Samples::Float64(ref v) => frames.zip(v).for_each(|(out, &s)| LittleEndian::write_f64(out, s)),
        }
    }
    bytes
}

/// Converts plain numbers to the bit depth named by `tag` and encodes them.
/// Out of range integers wrap; see [`Samples::from_f64`].
pub fn encode_tagged(values: &[f64], tag: &str) -> Result<Vec<u8>, ParseBitDepthError> {
    Ok(encode(&Samples::from_f64(values, tag.parse()?)))
}

// MARK: Tests
