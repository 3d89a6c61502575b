//! Clip window sampling inside an audio record.
//!
//! A record spans `audio_size` samples starting at `start_sample` in the
//! untrimmed recording. Training draws one random window per record; testing
//! splits the record into `num_clips` evenly spaced views.

use crate::error::{OpsError, Result};
use rand::Rng;
use serde::Serialize;

/// How to pick the clip inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipSelection {
    /// Uniform jitter over the valid start range.
    Random,
    /// The `index`-th of `num_clips` evenly spaced windows.
    Uniform { index: usize, num_clips: usize },
}

/// First and last sample of a clip, in untrimmed-recording coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipWindow {
    pub start: f64,
    pub end: f64,
}

impl ClipWindow {
    /// Integer sample bounds, truncated toward zero.
    pub fn sample_range(&self) -> (u64, u64) {
        (self.start.max(0.0) as u64, self.end.max(0.0) as u64)
    }
}

/// Number of samples in a clip of `clip_secs` at `sampling_rate`.
pub fn clip_size(sampling_rate: u32, clip_secs: f64) -> u64 {
    (f64::from(sampling_rate) * clip_secs).round().max(0.0) as u64
}

/// Computes the clip window for `selection`.
///
/// When the record is shorter than a clip the valid start range collapses to
/// zero and every selection starts at the beginning of the record.
pub fn clip_window<R: Rng>(
    audio_size: u64,
    clip_size: u64,
    selection: ClipSelection,
    start_sample: u64,
    rng: &mut R,
) -> Result<ClipWindow> {
    let delta = audio_size.saturating_sub(clip_size) as f64;

    let start = match selection {
        ClipSelection::Random => rng.gen_range(0.0..=delta),
        ClipSelection::Uniform { num_clips: 0, .. } => {
            return Err(OpsError::InvalidArgument("num_clips must be >= 1".to_string()));
        }
        ClipSelection::Uniform { index, num_clips } if index >= num_clips => {
            return Err(OpsError::InvalidArgument(format!(
                "clip index {index} out of range for {num_clips} clips"
            )));
        }
        ClipSelection::Uniform { num_clips: 1, .. } => 0.0,
        ClipSelection::Uniform { index, num_clips } => delta * index as f64 / (num_clips - 1) as f64,
    };
    let end = start + clip_size as f64 - 1.0;

    let offset = start_sample as f64;
    Ok(ClipWindow { start: offset + start, end: offset + end })
}

/// Frames of edge padding needed to bring a short spectrogram up to `num_frames`.
pub fn pad_frames(num_frames: usize, frames: usize) -> usize {
    num_frames.saturating_sub(frames)
}
