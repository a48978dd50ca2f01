//! Fetch -> normalize -> codegen, stopping at the first failure.

use crate::codegen::{self, CodegenSummary};
use crate::config::TldConfig;
use crate::error::TldError;
use crate::fetch::{self, FetchOutcome, FetchPolicy};
use crate::normalize::{self, NormalizeStats};

/// Outcome of each step of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub fetch: FetchOutcome,
    pub normalize: NormalizeStats,
    pub codegen: CodegenSummary,
}

/// Run all three steps in order. Files written by earlier steps are left in
/// place when a later step fails.
pub fn run(
    cfg: &TldConfig,
    policy: FetchPolicy,
    generated_at: &str,
) -> Result<PipelineReport, TldError> {
    let fetch = fetch::fetch_list(cfg, policy)?;
    let normalize = normalize::normalize_file(cfg)?;
    let codegen = codegen::generate_header(cfg, generated_at)?;
    tracing::info!(
        "pipeline done: {} entries in {}",
        codegen.total,
        codegen.path.display()
    );
    Ok(PipelineReport {
        fetch,
        normalize,
        codegen,
    })
}
