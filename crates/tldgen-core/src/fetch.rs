//! Single GET of the raw TLD list, cached on disk.
//!
//! The raw file doubles as a download cache: once it exists and is non-empty
//! it is reused as-is unless a refresh is forced. There is no staleness check.

use crate::config::TldConfig;
use crate::error::TldError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cache behaviour for [`fetch_list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Download even if the raw file is already present.
    pub force_refresh: bool,
}

/// What [`fetch_list`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Raw file already present; no request was made.
    Cached { path: PathBuf, bytes: u64 },
    /// Body downloaded and written to `path`.
    Downloaded { path: PathBuf, bytes: u64 },
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Cached { path, .. } | FetchOutcome::Downloaded { path, .. } => path,
        }
    }
}

/// Size of `path` if it is a non-empty regular file, i.e. a usable cache.
pub fn cached_size(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .ok()
        .filter(|m| m.is_file() && m.len() > 0)
        .map(|m| m.len())
}

/// Ensure `cfg.raw_path` holds the raw list, downloading it from `cfg.source_url` if needed.
///
/// The body is buffered and only written after a 200, so a failed request
/// never leaves a partial file behind.
pub fn fetch_list(cfg: &TldConfig, policy: FetchPolicy) -> Result<FetchOutcome, TldError> {
    let path = cfg.raw_path.clone();

    if !policy.force_refresh {
        if let Some(bytes) = cached_size(&path) {
            tracing::info!("cache hit: {} ({} bytes), skipping download", path.display(), bytes);
            return Ok(FetchOutcome::Cached { path, bytes });
        }
    }

    tracing::info!("GET {}", cfg.source_url);
    let body = http_get(&cfg.source_url, cfg.connect_timeout_secs)?;
    let text = match String::from_utf8(body) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("response from {} is not valid UTF-8; replacing bad sequences", cfg.source_url);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TldError::io(parent, e))?;
    }
    fs::write(&path, &text).map_err(|e| TldError::io(&path, e))?;

    let bytes = text.len() as u64;
    tracing::info!("saved {} bytes to {}", bytes, path.display());
    Ok(FetchOutcome::Downloaded { path, bytes })
}

/// GET `url` and return the body. Anything but HTTP 200 is an error.
fn http_get(url: &str, connect_timeout_secs: Option<u64>) -> Result<Vec<u8>, TldError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(secs) = connect_timeout_secs {
        easy.connect_timeout(Duration::from_secs(secs))?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if status != 200 {
        tracing::warn!("GET {} returned HTTP {}", url, status);
        return Err(TldError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(body)
}
