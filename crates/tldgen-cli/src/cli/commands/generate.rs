//! `tldgen generate` – normalized list to C++ header.

use anyhow::Result;
use tldgen_core::codegen::{self, CodegenSummary};
use tldgen_core::config::TldConfig;

pub(super) fn report(summary: &CodegenSummary) {
    println!("Header file created as {}.", summary.path.display());
    println!("{}", summary.summary_line());
}

pub fn run_generate(cfg: &TldConfig) -> Result<CodegenSummary> {
    let summary = codegen::generate_header(cfg, &codegen::timestamp_now())?;
    report(&summary);
    Ok(summary)
}
