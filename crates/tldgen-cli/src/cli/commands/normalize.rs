//! `tldgen normalize` – raw list to lowercase UTF-8 list.

use anyhow::Result;
use tldgen_core::config::TldConfig;
use tldgen_core::normalize::{self, NormalizeStats};

pub(super) fn report(cfg: &TldConfig, stats: &NormalizeStats) {
    println!("Added {} custom TLDs to the list.", stats.custom);
    println!(
        "File converted and saved as {} (custom TLDs + IANA TLDs).",
        cfg.normalized_path.display()
    );
    if stats.fallbacks > 0 {
        println!(
            "{} Punycode entries could not be decoded and were kept as-is.",
            stats.fallbacks
        );
    }
}

pub fn run_normalize(cfg: &TldConfig) -> Result<NormalizeStats> {
    let stats = normalize::normalize_file(cfg)?;
    report(cfg, &stats);
    Ok(stats)
}
