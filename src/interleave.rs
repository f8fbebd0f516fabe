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

//! Reshaping between interleaved and per-channel sample layouts.
//!
//! Wave files store multi-channel audio interleaved: one sample for each
//! channel per frame, frame after frame. These helpers convert between that
//! layout and one sequence per channel.

use std::iter::FromIterator;

/// Samples either already interleaved or held as one sequence per channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelLayout<T> {
    Interleaved(Vec<T>),
    Planar(Vec<Vec<T>>),
}

impl<T: Copy> ChannelLayout<T> {
    /// Returns the samples interleaved. Interleaved samples are returned
    /// as they are.
    pub fn into_interleaved(self) -> Vec<T> {
        match self {
            ChannelLayout::Interleaved(samples) => samples,
            ChannelLayout::Planar(channels) => interleave(&channels),
        }
    }
}

/// Interleaves one sequence per channel into a single sequence:
/// frame 0 of every channel, then frame 1 of every channel, and so on.
///
/// Channels should all be the same length. If they aren't, the output stops
/// at the end of the shortest channel.
pub fn interleave<T, C>(channels: &[C]) -> Vec<T>
    where T: Copy,
          C: AsRef<[T]>
{
    let frames = channels.iter().map(|c| c.as_ref().len()).min().unwrap_or(0);
    let mut samples = Vec::with_capacity(frames * channels.len());
    for frame in 0..frames {
        for channel in channels {
            samples.push(channel.as_ref()[frame]);
        }
    }
    samples
}

/// Splits interleaved samples into `num_channels` vectors.
///
/// Each channel gets `samples.len() / num_channels` samples; a trailing
/// partial frame is dropped. Zero channels gives an empty result.
pub fn deinterleave<T: Copy>(samples: &[T], num_channels: usize) -> Vec<Vec<T>> {
    deinterleave_into(samples, num_channels)
}

/// Like [`deinterleave`], collecting each channel into any container that can
/// be built from an iterator.
pub fn deinterleave_into<T, C>(samples: &[T], num_channels: usize) -> Vec<C>
    where T: Copy,
          C: FromIterator<T>
{
    if num_channels == 0 {
        return Vec::new();
    }
    let frames = samples.len() / num_channels;
    (0..num_channels)
        .map(|channel| {
            samples
                .iter()
                .skip(channel)
                .step_by(num_channels)
                .take(frames)
                .cloned()
                .collect()
        })
        .collect()
}

// MARK: Tests
