use crate::error::TldError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// IANA's machine-readable list, one TLD per line.
pub const IANA_TLD_URL: &str = "https://data.iana.org/TLD/tlds-alpha-by-domain.txt";

/// Settings for the whole pipeline, optionally loaded from `~/.config/tldgen/config.toml`.
///
/// The defaults reproduce the tool's fixed behaviour; a config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TldConfig {
    /// Where the raw list is downloaded from.
    pub source_url: String,
    /// Raw download cache.
    pub raw_path: PathBuf,
    /// Lowercase, Punycode-decoded list with custom entries first.
    pub normalized_path: PathBuf,
    /// Generated C++ header.
    pub header_path: PathBuf,
    /// Local TLDs written ahead of the IANA entries, in this order.
    pub custom_tlds: Vec<String>,
    /// Name of the `std::set<std::string>` constant in the header.
    pub constant_name: String,
    /// Project pointer written into the header comment.
    pub project_url: String,
    /// Connect timeout for the download. None keeps the libcurl default.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for TldConfig {
    fn default() -> Self {
        Self {
            source_url: IANA_TLD_URL.to_string(),
            raw_path: PathBuf::from("tlds-alpha-by-domain.txt"),
            normalized_path: PathBuf::from("tlds-utf8-lowercase.txt"),
            header_path: PathBuf::from("src/iana-tlds.h"),
            custom_tlds: vec!["local".to_string()],
            constant_name: "TLD_LIST".to_string(),
            project_url: "https://github.com/LuisPalacios/tldcheck".to_string(),
            connect_timeout_secs: None,
        }
    }
}

impl TldConfig {
    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), TldError> {
        let url = url::Url::parse(&self.source_url)
            .map_err(|e| TldError::Config(format!("source_url {:?}: {}", self.source_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TldError::Config(format!(
                "source_url must be http or https, got {}",
                url.scheme()
            )));
        }

        for (key, path) in [
            ("raw_path", &self.raw_path),
            ("normalized_path", &self.normalized_path),
            ("header_path", &self.header_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(TldError::Config(format!("{key} is empty")));
            }
        }

        if !is_c_identifier(&self.constant_name) {
            return Err(TldError::Config(format!(
                "constant_name {:?} is not a valid identifier",
                self.constant_name
            )));
        }

        if self.custom_tlds.iter().any(|t| t.trim().is_empty()) {
            return Err(TldError::Config("custom_tlds contains an empty entry".to_string()));
        }

        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Existing config file under the XDG config dir (`tldgen/config.toml`), if any.
pub fn find_config_file() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("tldgen") {
        Ok(dirs) => dirs.find_config_file("config.toml"),
        Err(e) => {
            tracing::debug!("no XDG base dirs ({}); using defaults", e);
            None
        }
    }
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the XDG config file is used when
/// present; otherwise built-in defaults apply. Nothing is written to disk.
pub fn load(explicit: Option<&Path>) -> Result<TldConfig, TldError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match find_config_file() {
            Some(p) => p,
            None => return Ok(TldConfig::default()),
        },
    };

    let data = fs::read_to_string(&path).map_err(|e| TldError::io(&path, e))?;
    let cfg: TldConfig = toml::from_str(&data)
        .map_err(|e| TldError::Config(format!("{}: {}", path.display(), e)))?;
    cfg.validate()?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}
