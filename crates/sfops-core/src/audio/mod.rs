//! Audio record helpers mirroring the dataset loader's sampling rules.

mod clip;

pub use clip::{ClipSelection, ClipWindow, clip_size, clip_window, pad_frames};
