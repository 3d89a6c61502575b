//! Pretrained weight download.

use crate::error::{OpsError, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Downloads `url` to `dest`, replacing any existing file.
///
/// Parent directories are created as needed. The body is streamed to a
/// sibling `.part` file that is renamed over `dest` only once complete, so a
/// failed download leaves any previous file untouched. Returns the number of
/// bytes written. No existence check is made: every call downloads again.
pub async fn fetch_weights(client: &reqwest::Client, url: &str, dest: &Path, progress: bool) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    info!(url, dest = %dest.display(), "downloading weights");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(OpsError::Download { url: url.to_string(), reason: status.to_string() });
    }

    let bar = match response.content_length() {
        Some(len) if progress => {
            let bar = ProgressBar::new(len);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
            {
                bar.set_style(style);
            }
            Some(bar)
        }
        _ => None,
    };

    let partial = partial_path(dest);
    let written = match stream_to_file(response, &partial, bar.as_ref()).await {
        Ok(written) => written,
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                debug!(path = %partial.display(), error = %cleanup, "could not remove partial download");
            }
            return Err(e);
        }
    };
    tokio::fs::rename(&partial, dest).await?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    info!(bytes = written, dest = %dest.display(), "weights saved");
    Ok(written)
}

/// `<dest>.part`, in the destination's directory.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

async fn stream_to_file(response: reqwest::Response, path: &Path, bar: Option<&ProgressBar>) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        if let Some(bar) = bar {
            bar.set_position(written);
        }
    }
    file.flush().await?;
    Ok(written)
}
