//! Error type shared by the fetch, normalize and codegen steps.

use std::path::PathBuf;

/// Pipeline step that needs a file produced by an earlier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Normalize,
    Codegen,
}

impl Step {
    /// What the user has to do before this step can run.
    fn prerequisite(self) -> &'static str {
        match self {
            Step::Normalize => "download",
            Step::Codegen => "convert",
        }
    }
}

/// Fatal conditions. Punycode decode failures are recovered in the
/// normalizer and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum TldError {
    /// Server answered with something other than 200.
    #[error("Error downloading the list from {url}: HTTP {status}")]
    HttpStatus { url: String, status: u32 },

    /// Curl reported an error (DNS, connect, TLS, ...).
    #[error("GET request failed: {0}")]
    Transfer(#[from] curl::Error),

    /// Input file of a later step is absent.
    #[error("File {} does not exist. Please {} it first.", .path.display(), .step.prerequisite())]
    MissingInput { path: PathBuf, step: Step },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TldError::Io {
            path: path.into(),
            source,
        }
    }
}
