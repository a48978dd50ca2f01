//! `tldgen` / `tldgen all` – the whole pipeline.

use anyhow::Result;
use tldgen_core::codegen;
use tldgen_core::config::TldConfig;
use tldgen_core::fetch::FetchPolicy;
use tldgen_core::pipeline::{self, PipelineReport};

use super::{fetch, generate, normalize};

pub fn run_all(cfg: &TldConfig, policy: FetchPolicy) -> Result<PipelineReport> {
    fetch::announce(cfg, policy);
    let report = pipeline::run(cfg, policy, &codegen::timestamp_now())?;
    fetch::report(&report.fetch);
    normalize::report(cfg, &report.normalize);
    generate::report(&report.codegen);
    Ok(report)
}
