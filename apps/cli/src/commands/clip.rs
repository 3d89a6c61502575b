//! Clip-window command implementation.

use clap::Args;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use sfops_core::audio::{ClipSelection, ClipWindow, clip_size, clip_window};

/// Arguments for the clip-window command.
#[derive(Args, Debug)]
pub struct ClipWindowArgs {
    /// Length of the audio record in samples
    pub audio_size: u64,

    /// Sampling rate in Hz
    #[arg(long, default_value_t = 24_000)]
    pub sampling_rate: u32,

    /// Clip length in seconds
    #[arg(long, default_value_t = 1.999)]
    pub clip_secs: f64,

    /// Offset of the record inside the untrimmed recording
    #[arg(long, default_value_t = 0)]
    pub start_sample: u64,

    /// Number of evenly spaced test views; omit for one random training clip
    #[arg(long)]
    pub num_clips: Option<usize>,

    /// Seed for the random training clip
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct View {
    index: usize,
    #[serde(flatten)]
    window: ClipWindow,
}

/// Execute the clip-window command.
pub fn execute(args: &ClipWindowArgs) -> anyhow::Result<()> {
    if !args.clip_secs.is_finite() || args.clip_secs <= 0.0 {
        anyhow::bail!("--clip-secs must be a positive number");
    }
    let size = clip_size(args.sampling_rate, args.clip_secs);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if args.num_clips == Some(0) {
        anyhow::bail!("--num-clips must be at least 1");
    }
    let selections: Vec<ClipSelection> = match args.num_clips {
        Some(num_clips) => (0..num_clips).map(|index| ClipSelection::Uniform { index, num_clips }).collect(),
        None => vec![ClipSelection::Random],
    };

    let views = selections
        .into_iter()
        .enumerate()
        .map(|(index, selection)| {
            clip_window(args.audio_size, size, selection, args.start_sample, &mut rng)
                .map(|window| View { index, window })
        })
        .collect::<sfops_core::Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!("{} {} samples", "Clip size:".bold(), size);
    for view in &views {
        let (start, end) = view.window.sample_range();
        println!("  [{}] {}..={}", view.index, start, end);
    }
    Ok(())
}
