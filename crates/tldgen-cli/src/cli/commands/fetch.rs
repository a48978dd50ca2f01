//! `tldgen fetch` – download the raw list unless cached.

use anyhow::Result;
use tldgen_core::config::TldConfig;
use tldgen_core::fetch::{self, FetchOutcome, FetchPolicy};

/// Announce a download before it blocks, if one is going to happen.
pub(super) fn announce(cfg: &TldConfig, policy: FetchPolicy) {
    if policy.force_refresh || fetch::cached_size(&cfg.raw_path).is_none() {
        println!("Downloading file from {}...", cfg.source_url);
    }
}

pub(super) fn report(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Downloaded { path, .. } => {
            println!("File saved as {}.", path.display());
        }
        FetchOutcome::Cached { path, .. } => {
            println!(
                "File {} already exists. Will not download again.",
                path.display()
            );
        }
    }
}

pub fn run_fetch(cfg: &TldConfig, policy: FetchPolicy) -> Result<FetchOutcome> {
    announce(cfg, policy);
    let outcome = fetch::fetch_list(cfg, policy)?;
    report(&outcome);
    Ok(outcome)
}
